use arrayvec::ArrayVec;

use crate::catalog::{Perk, Skill, Trait};
use crate::config::RulesConfig;
use crate::state::{CharacterState, PerkLedger, TaggedSkills};
use crate::stats::{Attribute, EffectDirection, PrimaryStats, SkillValues};

/// Wraps mutable access to [`CharacterState`] with structured sub-reducers.
///
/// Sub-reducers perform the bookkeeping of a change (point debits, refunds,
/// rank moves) without validating it; validation belongs to the intents.
pub struct StateReducer<'a> {
    state: &'a mut CharacterState,
}

impl<'a> StateReducer<'a> {
    pub fn new(state: &'a mut CharacterState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &CharacterState {
        self.state
    }

    pub fn attributes(&mut self) -> AttributesReducer<'_> {
        AttributesReducer {
            primary: &mut self.state.primary,
        }
    }

    pub fn traits(&mut self) -> TraitsReducer<'_> {
        TraitsReducer {
            traits: &mut self.state.traits,
            primary: &mut self.state.primary,
        }
    }

    pub fn skills(&mut self) -> SkillsReducer<'_> {
        SkillsReducer {
            tags: &mut self.state.tags,
            raised: &mut self.state.raised,
            skill_points: &mut self.state.skill_points,
            tag_points: &mut self.state.tag_points,
        }
    }

    pub fn perks(&mut self) -> PerksReducer<'_> {
        PerksReducer {
            ledger: &mut self.state.perks,
            perk_points: &mut self.state.perk_points,
        }
    }

    pub fn progress(&mut self) -> ProgressReducer<'_> {
        let rates = self.state.derived();
        let (skill_rate, perk_rate) = (rates.skill_rate, rates.perk_rate);
        ProgressReducer {
            level: &mut self.state.level,
            skill_points: &mut self.state.skill_points,
            perk_points: &mut self.state.perk_points,
            tag_points: &mut self.state.tag_points,
            skill_rate,
            perk_rate,
        }
    }

    /// Refreshes the derived caches mid-transition.
    pub fn recompute(&mut self) {
        self.state.recompute();
    }
}

pub struct AttributesReducer<'a> {
    primary: &'a mut PrimaryStats,
}

impl<'a> AttributesReducer<'a> {
    pub fn increase(&mut self, attribute: Attribute) {
        self.primary.shift(attribute, 1);
        self.primary.unspent_points = self.primary.unspent_points.saturating_sub(1);
    }

    pub fn decrease(&mut self, attribute: Attribute) {
        self.primary.shift(attribute, -1);
        self.primary.unspent_points += 1;
    }

    /// Gain perks shift their attribute by one; other perks are a no-op.
    pub fn apply_perk_effect(&mut self, perk: Perk, direction: EffectDirection) {
        if let Some(attribute) = perk.gained_attribute() {
            self.primary.shift(attribute, direction.sign());
        }
    }
}

pub struct TraitsReducer<'a> {
    traits: &'a mut ArrayVec<Trait, { RulesConfig::MAX_TRAITS }>,
    primary: &'a mut PrimaryStats,
}

impl<'a> TraitsReducer<'a> {
    /// Returns `false` when both slots are taken.
    pub fn insert(&mut self, trait_: Trait) -> bool {
        self.traits.try_push(trait_).is_ok()
    }

    /// Returns `false` when the trait was not selected.
    pub fn remove(&mut self, trait_: Trait) -> bool {
        match self.traits.iter().position(|t| *t == trait_) {
            Some(index) => {
                self.traits.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn apply_effect(&mut self, trait_: Trait, direction: EffectDirection) {
        self.primary.apply_trait_effect(trait_, direction);
    }
}

pub struct SkillsReducer<'a> {
    tags: &'a mut TaggedSkills,
    raised: &'a mut SkillValues,
    skill_points: &'a mut u32,
    tag_points: &'a mut u32,
}

impl<'a> SkillsReducer<'a> {
    /// Tags a skill, spending a tag point. Returns `false` when no slot is free.
    pub fn tag(&mut self, skill: Skill, level: u32) -> bool {
        if !self.tags.insert(skill, level) {
            return false;
        }
        *self.tag_points = self.tag_points.saturating_sub(1);
        true
    }

    /// Untags a skill, refunding its tag point. Returns `false` when untagged.
    pub fn untag(&mut self, skill: Skill) -> bool {
        if self.tags.remove(skill).is_none() {
            return false;
        }
        *self.tag_points += 1;
        true
    }

    pub fn raise(&mut self, skill: Skill, step: i32, cost: u32) {
        self.raised.add(skill, step);
        *self.skill_points = self.skill_points.saturating_sub(cost);
    }

    pub fn lower(&mut self, skill: Skill, step: i32, refund: u32) {
        self.raised.add(skill, -step);
        *self.skill_points += refund;
    }
}

pub struct PerksReducer<'a> {
    ledger: &'a mut PerkLedger,
    perk_points: &'a mut u32,
}

impl<'a> PerksReducer<'a> {
    /// Takes one rank for a perk point. Returns `false` when no rank remains.
    pub fn take(&mut self, perk: Perk, level: u32) -> bool {
        if !self.ledger.take_rank(perk, level) {
            return false;
        }
        *self.perk_points = self.perk_points.saturating_sub(1);
        true
    }

    /// Gives back the latest rank and refunds its point.
    pub fn give_back(&mut self, perk: Perk) -> bool {
        if self.ledger.return_rank(perk).is_none() {
            return false;
        }
        *self.perk_points += 1;
        true
    }
}

pub struct ProgressReducer<'a> {
    level: &'a mut u32,
    skill_points: &'a mut u32,
    perk_points: &'a mut u32,
    tag_points: &'a mut u32,
    skill_rate: i32,
    perk_rate: i32,
}

impl<'a> ProgressReducer<'a> {
    /// Advances one level and returns the new level.
    pub fn level_up(&mut self) -> u32 {
        *self.level += 1;
        *self.skill_points += self.skill_rate.max(0) as u32;

        let perk_rate = self.perk_rate.max(1) as u32;
        if *self.level % perk_rate == 0 {
            *self.perk_points += 1;
        }
        *self.level
    }

    pub fn grant_tag_point(&mut self) {
        *self.tag_points += 1;
    }
}
