//! Tagging and skill-point investment.
//!
//! Tagged skills grow by 2 per raise instead of 1. Costs come from the tier
//! table in [`skill_cost`], evaluated on the final value before the change so
//! a raise followed by a lower is always point-neutral, including across tier
//! boundaries.

use crate::catalog::Skill;
use crate::config::RulesConfig;
use crate::engine::StateReducer;
use crate::error::{RejectionKind, RuleError};
use crate::intent::IntentTransition;
use crate::state::CharacterState;
use crate::stats::skill_cost;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("no tag points left")]
    NoTagPoints,

    #[error("all {max} creation tags are taken", max = RulesConfig::CREATION_TAGS)]
    CreationTagsFull,

    #[error("no free tag slot")]
    NoFreeSlot,

    #[error("{0} was tagged at creation and is locked")]
    CreationTagLocked(Skill),

    #[error("{0} has raised points and cannot be untagged")]
    HasRaisedPoints(Skill),
}

impl RuleError for TagError {
    fn kind(&self) -> RejectionKind {
        match self {
            Self::NoTagPoints => RejectionKind::BudgetExhausted,
            Self::CreationTagsFull | Self::NoFreeSlot | Self::HasRaisedPoints(_) => {
                RejectionKind::BoundViolation
            }
            Self::CreationTagLocked(_) => RejectionKind::PrerequisiteNotMet,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    #[error("raising {skill} costs {cost} skill points, {available} available")]
    InsufficientPoints {
        skill: Skill,
        cost: u32,
        available: u32,
    },

    #[error("{0} has no raised points to remove")]
    NothingToLower(Skill),
}

impl RuleError for SkillError {
    fn kind(&self) -> RejectionKind {
        match self {
            Self::InsufficientPoints { .. } => RejectionKind::BudgetExhausted,
            Self::NothingToLower(_) => RejectionKind::BoundViolation,
        }
    }
}

/// Raise step for a skill: 2 when tagged, 1 otherwise.
pub fn raise_step(state: &CharacterState, skill: Skill) -> i32 {
    if state.is_tagged(skill) { 2 } else { 1 }
}

/// Tags a skill, or untags it if already tagged.
///
/// At the creation level up to three skills may be tagged and any of them
/// untagged again. Afterwards the creation tags are locked and only a tag
/// point granted by Tag! can be spent, into the fourth slot; that tag may be
/// taken back while it carries no raised points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagSkill(pub Skill);

impl IntentTransition for TagSkill {
    type Error = TagError;

    fn pre_validate(&self, state: &CharacterState) -> Result<(), Self::Error> {
        if let Some(entry) = state.tags().entry(self.0) {
            if entry.is_creation_tag() && !state.in_creation() {
                return Err(TagError::CreationTagLocked(self.0));
            }
            if !entry.is_creation_tag() && state.raised_skills().get(self.0) > 0 {
                return Err(TagError::HasRaisedPoints(self.0));
            }
            return Ok(());
        }

        if state.tag_points() == 0 {
            return Err(TagError::NoTagPoints);
        }
        if state.in_creation() {
            if state.tags().len() >= RulesConfig::CREATION_TAGS {
                return Err(TagError::CreationTagsFull);
            }
        } else if state.tags().is_full() {
            return Err(TagError::NoFreeSlot);
        }
        Ok(())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>) -> Result<(), Self::Error> {
        let level = reducer.state().level();
        let mut skills = reducer.skills();
        if skills.untag(self.0) {
            return Ok(());
        }
        if skills.tag(self.0, level) {
            Ok(())
        } else {
            Err(TagError::NoFreeSlot)
        }
    }
}

/// Buys one raise step with skill points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaiseSkill(pub Skill);

impl RaiseSkill {
    fn cost(&self, state: &CharacterState) -> u32 {
        skill_cost(state.final_skill(self.0))
    }
}

impl IntentTransition for RaiseSkill {
    type Error = SkillError;

    fn pre_validate(&self, state: &CharacterState) -> Result<(), Self::Error> {
        let cost = self.cost(state);
        if state.skill_points() < cost {
            return Err(SkillError::InsufficientPoints {
                skill: self.0,
                cost,
                available: state.skill_points(),
            });
        }
        Ok(())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>) -> Result<(), Self::Error> {
        let cost = self.cost(reducer.state());
        let step = raise_step(reducer.state(), self.0);
        reducer.skills().raise(self.0, step, cost);
        Ok(())
    }
}

/// Sells back one raise step.
///
/// The refund is priced at the value the skill will have after the step is
/// removed, which is the value the matching raise was priced at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LowerSkill(pub Skill);

impl IntentTransition for LowerSkill {
    type Error = SkillError;

    fn pre_validate(&self, state: &CharacterState) -> Result<(), Self::Error> {
        let raised = state.raised_skills().get(self.0);
        if raised < raise_step(state, self.0) {
            return Err(SkillError::NothingToLower(self.0));
        }
        Ok(())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>) -> Result<(), Self::Error> {
        let step = raise_step(reducer.state(), self.0);
        let refund = skill_cost(reducer.state().final_skill(self.0) - step);
        reducer.skills().lower(self.0, step, refund);
        Ok(())
    }
}
