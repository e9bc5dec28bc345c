//! Plain-text character sheet export.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use planner_core::{Attribute, CharacterState};

/// Renders primary stats, traits and perks, one value per line.
pub fn render_export(state: &CharacterState) -> String {
    Sheet(state).to_string()
}

struct Sheet<'a>(&'a CharacterState);

impl fmt::Display for Sheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;

        writeln!(f, "Primary stats")?;
        for (attribute, value) in state.primary().iter() {
            writeln!(
                f,
                "{}: {:02} ({})",
                attribute.label(),
                value,
                Attribute::describe(value)
            )?;
        }

        writeln!(f, "\nTraits")?;
        if state.traits().is_empty() {
            writeln!(f, "None")?;
        }
        for trait_ in state.traits() {
            writeln!(f, "{}", trait_.label())?;
        }

        writeln!(f, "\nPerks")?;
        let mut any = false;
        for (perk, ranks) in state.perks().acquired_ranks() {
            any = true;
            writeln!(f, "{} (rank {})", perk.label(), ranks)?;
        }
        if !any {
            writeln!(f, "None")?;
        }
        Ok(())
    }
}

/// File name for an export made on `date`, e.g. `character-2024-05-01.txt`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("character-{}.txt", date.format("%Y-%m-%d"))
}

/// Writes the export into `dir` and returns the file path.
pub fn write_export(dir: &Path, state: &CharacterState, date: NaiveDate) -> io::Result<PathBuf> {
    let path = dir.join(export_file_name(date));
    std::fs::write(&path, render_export(state))?;
    tracing::info!(path = %path.display(), "character exported");
    Ok(path)
}
