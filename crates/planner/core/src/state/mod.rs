//! Authoritative character state.
//!
//! `CharacterState` owns the stored choices (attributes, traits, tags, raised
//! skills, perk ledger, progress counters) together with the derived caches
//! (base skills, derived stats). Callers read it freely but mutate it
//! exclusively through [`crate::PlannerEngine`], which keeps the caches in
//! step with the choices.
pub mod perks;
pub mod tags;

use arrayvec::ArrayVec;

pub use perks::{OfferedPerk, PerkLedger, PerkRow};
pub use tags::{TagEntry, TaggedSkills};

use crate::catalog::{Perk, Skill, Trait};
use crate::config::RulesConfig;
use crate::stats::{
    DerivedBonuses, DerivedInputs, DerivedStats, PrimaryStats, SkillValues, StatLayer,
    derive_base_skills,
};

/// Stored choices that fail the state invariants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("perk ledger rows do not follow the catalog")]
    LedgerLayout,

    #[error("ranks of {0} do not add up to its maximum")]
    RankMismatch(Perk),

    #[error("trait {0} is selected twice")]
    DuplicateTrait(Trait),

    #[error("skill {0} is tagged twice")]
    DuplicateTag(Skill),

    #[error("{0} has negative raised points")]
    NegativeInvestment(Skill),

    #[error("level must be at least {min}", min = RulesConfig::CREATION_LEVEL)]
    LevelBelowCreation,
}

/// Canonical snapshot of a character build.
///
/// Deserializing reads only the stored choices; the caches are rebuilt.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StoredChoices"))]
pub struct CharacterState {
    rules: RulesConfig,

    pub(crate) primary: PrimaryStats,
    /// Selected traits in insertion order.
    pub(crate) traits: ArrayVec<Trait, { RulesConfig::MAX_TRAITS }>,
    pub(crate) tags: TaggedSkills,
    /// Player investment; never recomputed.
    pub(crate) raised: SkillValues,
    pub(crate) perks: PerkLedger,

    pub(crate) level: u32,
    pub(crate) skill_points: u32,
    pub(crate) perk_points: u32,
    pub(crate) tag_points: u32,

    // derived caches
    base_skills: SkillValues,
    derived: DerivedStats,
}

impl CharacterState {
    /// Creates a level-1 character with the given starting values.
    pub fn new(rules: RulesConfig) -> Self {
        let mut state = Self {
            primary: PrimaryStats::from_config(&rules),
            traits: ArrayVec::new(),
            tags: TaggedSkills::new(),
            raised: SkillValues::default(),
            perks: PerkLedger::new(),
            level: RulesConfig::CREATION_LEVEL,
            skill_points: 0,
            perk_points: 0,
            tag_points: rules.starting_tag_points,
            base_skills: SkillValues::default(),
            derived: DerivedStats::default(),
            rules,
        };
        state.recompute();
        state
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn primary(&self) -> &PrimaryStats {
        &self.primary
    }

    pub fn traits(&self) -> &[Trait] {
        &self.traits
    }

    pub fn has_trait(&self, trait_: Trait) -> bool {
        self.traits.contains(&trait_)
    }

    pub fn tags(&self) -> &TaggedSkills {
        &self.tags
    }

    pub fn is_tagged(&self, skill: Skill) -> bool {
        self.tags.contains(skill)
    }

    pub fn base_skills(&self) -> &SkillValues {
        &self.base_skills
    }

    pub fn raised_skills(&self) -> &SkillValues {
        &self.raised
    }

    /// Base plus raised, for every skill.
    pub fn final_skills(&self) -> SkillValues {
        self.base_skills.combined(&self.raised)
    }

    pub fn final_skill(&self, skill: Skill) -> i32 {
        self.base_skills.get(skill) + self.raised.get(skill)
    }

    pub fn perks(&self) -> &PerkLedger {
        &self.perks
    }

    pub fn perk_ranks(&self, perk: Perk) -> u32 {
        self.perks.ranks(perk)
    }

    pub fn derived(&self) -> &DerivedStats {
        &self.derived
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    pub fn perk_points(&self) -> u32 {
        self.perk_points
    }

    pub fn tag_points(&self) -> u32 {
        self.tag_points
    }

    /// True while the character is still at the creation level.
    pub fn in_creation(&self) -> bool {
        self.level <= RulesConfig::CREATION_LEVEL
    }

    pub fn requirements_met(&self, perk: Perk) -> bool {
        perk.requirements_met(self.level, &self.primary, &self.final_skills())
    }

    /// Every perk with ranks remaining, flagged with current eligibility.
    pub fn offered_perks(&self) -> Vec<OfferedPerk> {
        let skills = self.final_skills();
        self.perks
            .available_rows()
            .map(|row| OfferedPerk {
                perk: row.perk,
                ranks_remaining: row.ranks,
                requirements_met: row.perk.requirements_met(self.level, &self.primary, &skills),
            })
            .collect()
    }

    /// Checks the invariants the engine maintains on stored choices.
    pub fn check_consistency(&self) -> Result<(), SnapshotError> {
        if self.level < RulesConfig::CREATION_LEVEL {
            return Err(SnapshotError::LevelBelowCreation);
        }
        if !self.perks.is_well_formed() {
            return Err(SnapshotError::LedgerLayout);
        }
        if let Some(perk) = self.perks.rank_violation() {
            return Err(SnapshotError::RankMismatch(perk));
        }
        if let [first, second] = self.traits.as_slice()
            && first == second
        {
            return Err(SnapshotError::DuplicateTrait(*first));
        }
        let mut seen = Vec::with_capacity(self.tags.len());
        for skill in self.tags.skills() {
            if seen.contains(&skill) {
                return Err(SnapshotError::DuplicateTag(skill));
            }
            seen.push(skill);
        }
        if let Some((skill, _)) = self.raised.iter().find(|&(_, value)| value < 0) {
            return Err(SnapshotError::NegativeInvestment(skill));
        }
        Ok(())
    }

    /// Rebuilds base skills and derived stats from the stored choices.
    pub fn recompute(&mut self) {
        self.base_skills = derive_base_skills(
            &self.primary,
            &self.traits,
            &self.tags,
            &self.perks,
            &self.rules,
        );
        let bonuses = DerivedBonuses::collect(&self.traits, self.perks.acquired_ranks());
        let inputs = DerivedInputs::new(self.primary.clone(), &self.traits);
        self.derived = DerivedStats::compute(&inputs, &bonuses);
    }
}

/// Wire form of [`CharacterState`] without the derived caches.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StoredChoices {
    #[serde(default)]
    rules: RulesConfig,
    primary: PrimaryStats,
    traits: ArrayVec<Trait, { RulesConfig::MAX_TRAITS }>,
    tags: TaggedSkills,
    raised: SkillValues,
    perks: PerkLedger,
    level: u32,
    skill_points: u32,
    perk_points: u32,
    tag_points: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<StoredChoices> for CharacterState {
    type Error = SnapshotError;

    fn try_from(stored: StoredChoices) -> Result<Self, Self::Error> {
        let mut state = Self {
            rules: stored.rules,
            primary: stored.primary,
            traits: stored.traits,
            tags: stored.tags,
            raised: stored.raised,
            perks: stored.perks,
            level: stored.level,
            skill_points: stored.skill_points,
            perk_points: stored.perk_points,
            tag_points: stored.tag_points,
            base_skills: SkillValues::default(),
            derived: DerivedStats::default(),
        };
        state.check_consistency()?;
        state.recompute();
        Ok(state)
    }
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Attribute;

    #[test]
    fn starting_snapshot() {
        let state = CharacterState::default();
        assert!(state.primary().iter().all(|(_, v)| v == 5));
        assert_eq!(state.primary().unspent_points, 5);
        assert_eq!(state.level(), 1);
        assert_eq!(state.skill_points(), 0);
        assert_eq!(state.perk_points(), 0);
        assert_eq!(state.tag_points(), 3);
        assert_eq!(state.final_skill(Skill::SmallGuns), 25);
        assert_eq!(state.derived().hit_points, 30);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut state = CharacterState::default();
        state.primary.set(Attribute::Agility, 9);
        state.recompute();
        let once = state.clone();
        state.recompute();
        assert_eq!(state, once);
        assert_eq!(state.final_skill(Skill::SmallGuns), 41);
    }

    #[test]
    fn offered_perks_flag_eligibility() {
        let mut state = CharacterState::default();
        state.level = 3;
        let offered = state.offered_perks();
        assert_eq!(offered.len(), Perk::COUNT);

        let find = |perk| offered.iter().find(|o| o.perk == perk).copied();
        assert_eq!(find(Perk::Awareness).map(|o| o.requirements_met), Some(true));
        assert_eq!(find(Perk::Comprehension).map(|o| o.requirements_met), Some(false));
        assert_eq!(find(Perk::Toughness).map(|o| o.ranks_remaining), Some(3));
    }

    #[test]
    fn consistency_flags_broken_choices() {
        let mut state = CharacterState::default();
        assert_eq!(state.check_consistency(), Ok(()));

        state.raised.set(Skill::Doctor, -1);
        assert_eq!(
            state.check_consistency(),
            Err(SnapshotError::NegativeInvestment(Skill::Doctor))
        );

        let mut state = CharacterState::default();
        state.traits.push(Trait::Jinxed);
        state.traits.push(Trait::Jinxed);
        assert_eq!(
            state.check_consistency(),
            Err(SnapshotError::DuplicateTrait(Trait::Jinxed))
        );

        let mut state = CharacterState::default();
        state.level = 0;
        assert_eq!(state.check_consistency(), Err(SnapshotError::LevelBelowCreation));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_rebuilds_caches() {
        let mut state = CharacterState::default();
        state.primary.set(Attribute::Intelligence, 10);
        state.recompute();

        let mut json = serde_json::to_value(&state).unwrap();
        json["derived"]["skill_rate"] = serde_json::json!(999);
        json["base_skills"] = serde_json::Value::Array(vec![serde_json::json!(0); Skill::COUNT]);

        let resumed: CharacterState = serde_json::from_value(json).unwrap();
        assert_eq!(resumed.derived().skill_rate, 25);
        assert_eq!(resumed.base_skills().get(Skill::Science), 40);
        assert_eq!(resumed, state);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_rejects_ledger_mismatch() {
        let mut json = serde_json::to_value(CharacterState::default()).unwrap();
        json["perks"]["acquired"][0]["ranks"] = serde_json::json!(1);
        json["perks"]["acquired"][0]["level_selected"] = serde_json::json!([3]);

        let err = serde_json::from_value::<CharacterState>(json).unwrap_err();
        assert!(err.to_string().contains("action_boy"), "{err}");
    }
}
