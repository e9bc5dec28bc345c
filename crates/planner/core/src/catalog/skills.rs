//! Skill catalog and the per-skill base formula table.

use crate::stats::Attribute;
use crate::stats::Attribute::{Agility as AG, Charisma as CH, Endurance as EN};
use crate::stats::Attribute::{Intelligence as IN, Luck as LK, Perception as PE, Strength as ST};

/// The eighteen skills.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Skill {
    SmallGuns = 0,
    BigGuns = 1,
    EnergyWeapons = 2,
    Unarmed = 3,
    MeleeWeapons = 4,
    Throwing = 5,
    FirstAid = 6,
    Doctor = 7,
    Sneak = 8,
    Lockpick = 9,
    Steal = 10,
    Traps = 11,
    Science = 12,
    Repair = 13,
    Speech = 14,
    Barter = 15,
    Gambling = 16,
    Outdoorsman = 17,
}

/// Base formula for one skill: `offset + Σ weight × attribute`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillFormula {
    pub offset: i32,
    pub weights: &'static [(Attribute, i32)],
}

impl SkillFormula {
    const fn new(offset: i32, weights: &'static [(Attribute, i32)]) -> Self {
        Self { offset, weights }
    }
}

impl Skill {
    pub const COUNT: usize = 18;

    pub const ALL: [Skill; Self::COUNT] = [
        Skill::SmallGuns,
        Skill::BigGuns,
        Skill::EnergyWeapons,
        Skill::Unarmed,
        Skill::MeleeWeapons,
        Skill::Throwing,
        Skill::FirstAid,
        Skill::Doctor,
        Skill::Sneak,
        Skill::Lockpick,
        Skill::Steal,
        Skill::Traps,
        Skill::Science,
        Skill::Repair,
        Skill::Speech,
        Skill::Barter,
        Skill::Gambling,
        Skill::Outdoorsman,
    ];

    /// Skills penalized by Good natured.
    pub const COMBAT: [Skill; 6] = [
        Skill::SmallGuns,
        Skill::BigGuns,
        Skill::EnergyWeapons,
        Skill::Unarmed,
        Skill::MeleeWeapons,
        Skill::Throwing,
    ];

    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Skill::SmallGuns => "Small guns",
            Skill::BigGuns => "Big guns",
            Skill::EnergyWeapons => "Energy weapons",
            Skill::Unarmed => "Unarmed",
            Skill::MeleeWeapons => "Melee weapons",
            Skill::Throwing => "Throwing",
            Skill::FirstAid => "First aid",
            Skill::Doctor => "Doctor",
            Skill::Sneak => "Sneak",
            Skill::Lockpick => "Lockpick",
            Skill::Steal => "Steal",
            Skill::Traps => "Traps",
            Skill::Science => "Science",
            Skill::Repair => "Repair",
            Skill::Speech => "Speech",
            Skill::Barter => "Barter",
            Skill::Gambling => "Gambling",
            Skill::Outdoorsman => "Outdoorsman",
        }
    }

    pub const fn formula(&self) -> SkillFormula {
        match self {
            Skill::SmallGuns => SkillFormula::new(5, &[(AG, 4)]),
            Skill::BigGuns => SkillFormula::new(0, &[(AG, 2)]),
            Skill::EnergyWeapons => SkillFormula::new(0, &[(AG, 2)]),
            Skill::Unarmed => SkillFormula::new(30, &[(AG, 2), (ST, 2)]),
            Skill::MeleeWeapons => SkillFormula::new(20, &[(AG, 2), (ST, 2)]),
            Skill::Throwing => SkillFormula::new(0, &[(AG, 4)]),
            Skill::FirstAid => SkillFormula::new(0, &[(PE, 2), (IN, 2)]),
            Skill::Doctor => SkillFormula::new(5, &[(PE, 1), (IN, 1)]),
            Skill::Sneak => SkillFormula::new(5, &[(AG, 3)]),
            Skill::Lockpick => SkillFormula::new(10, &[(PE, 1), (AG, 1)]),
            Skill::Steal => SkillFormula::new(0, &[(AG, 3)]),
            Skill::Traps => SkillFormula::new(10, &[(PE, 1), (AG, 1)]),
            Skill::Science => SkillFormula::new(0, &[(IN, 4)]),
            Skill::Repair => SkillFormula::new(0, &[(IN, 3)]),
            Skill::Speech => SkillFormula::new(0, &[(CH, 5)]),
            Skill::Barter => SkillFormula::new(0, &[(CH, 4)]),
            Skill::Gambling => SkillFormula::new(0, &[(LK, 5)]),
            Skill::Outdoorsman => SkillFormula::new(0, &[(EN, 2), (IN, 2)]),
        }
    }

    /// Resolves either the snake_case identifier or the display label.
    pub fn lookup(name: &str) -> Option<Self> {
        name.parse().ok().or_else(|| {
            Self::ALL
                .into_iter()
                .find(|s| s.label().eq_ignore_ascii_case(name.trim()))
        })
    }
}
