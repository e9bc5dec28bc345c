use arrayvec::ArrayVec;

use crate::catalog::Skill;
use crate::config::RulesConfig;

/// A tagged skill and the level it was tagged at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagEntry {
    pub skill: Skill,
    pub tagged_at_level: u32,
}

impl TagEntry {
    /// Tags made at character creation grant the flat tag bonus and lock once
    /// the character leaves the creation level.
    pub const fn is_creation_tag(&self) -> bool {
        self.tagged_at_level <= RulesConfig::CREATION_LEVEL
    }
}

/// Tagged skills in the order they were tagged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaggedSkills {
    entries: ArrayVec<TagEntry, { RulesConfig::MAX_TAGGED }>,
}

impl TaggedSkills {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    pub fn contains(&self, skill: Skill) -> bool {
        self.entry(skill).is_some()
    }

    pub fn entry(&self, skill: Skill) -> Option<&TagEntry> {
        self.entries.iter().find(|e| e.skill == skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagEntry> {
        self.entries.iter()
    }

    pub fn skills(&self) -> impl Iterator<Item = Skill> + '_ {
        self.entries.iter().map(|e| e.skill)
    }

    /// Skills tagged at the creation level.
    pub fn creation_tags(&self) -> impl Iterator<Item = Skill> + '_ {
        self.entries
            .iter()
            .filter(|e| e.is_creation_tag())
            .map(|e| e.skill)
    }

    /// Appends a tag. Returns `false` when all slots are taken.
    pub(crate) fn insert(&mut self, skill: Skill, level: u32) -> bool {
        self.entries
            .try_push(TagEntry {
                skill,
                tagged_at_level: level,
            })
            .is_ok()
    }

    pub(crate) fn remove(&mut self, skill: Skill) -> Option<TagEntry> {
        let position = self.entries.iter().position(|e| e.skill == skill)?;
        Some(self.entries.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_and_capacity() {
        let mut tags = TaggedSkills::new();
        assert!(tags.insert(Skill::Speech, 1));
        assert!(tags.insert(Skill::SmallGuns, 1));
        assert!(tags.insert(Skill::Unarmed, 1));
        assert!(tags.insert(Skill::Doctor, 12));
        assert!(tags.is_full());
        assert!(!tags.insert(Skill::Barter, 12));

        let order: Vec<_> = tags.skills().collect();
        assert_eq!(
            order,
            [Skill::Speech, Skill::SmallGuns, Skill::Unarmed, Skill::Doctor]
        );
        let creation: Vec<_> = tags.creation_tags().collect();
        assert_eq!(creation.len(), 3);
        assert!(!creation.contains(&Skill::Doctor));
    }

    #[test]
    fn remove_returns_entry() {
        let mut tags = TaggedSkills::new();
        tags.insert(Skill::Lockpick, 1);
        let removed = tags.remove(Skill::Lockpick);
        assert_eq!(removed.map(|e| e.tagged_at_level), Some(1));
        assert!(tags.remove(Skill::Lockpick).is_none());
        assert!(tags.is_empty());
    }
}
