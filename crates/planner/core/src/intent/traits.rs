use crate::catalog::{Perk, Trait};
use crate::config::RulesConfig;
use crate::engine::StateReducer;
use crate::error::{RejectionKind, RuleError};
use crate::intent::IntentTransition;
use crate::state::CharacterState;
use crate::stats::{Attribute, EffectDirection};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TraitError {
    #[error(
        "traits are locked after level {level} without Mutate!",
        level = RulesConfig::CREATION_LEVEL
    )]
    Locked,

    #[error("at most {max} traits may be selected", max = RulesConfig::MAX_TRAITS)]
    SlotsFull,

    #[error("{attribute} fell to {value} after toggling {trait_}")]
    AttributeUnderflow {
        trait_: Trait,
        attribute: Attribute,
        value: i32,
    },
}

impl RuleError for TraitError {
    fn kind(&self) -> RejectionKind {
        match self {
            Self::Locked => RejectionKind::PrerequisiteNotMet,
            Self::SlotsFull => RejectionKind::BoundViolation,
            Self::AttributeUnderflow { .. } => RejectionKind::Internal,
        }
    }
}

/// Selects a trait, or deselects it if already selected.
///
/// The attribute effect of Bruiser, Gifted and Small frame is applied in the
/// same transition as the set change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToggleTrait(pub Trait);

impl IntentTransition for ToggleTrait {
    type Error = TraitError;

    fn pre_validate(&self, state: &CharacterState) -> Result<(), Self::Error> {
        if !state.in_creation() && state.perk_ranks(Perk::Mutate) == 0 {
            return Err(TraitError::Locked);
        }
        if !state.has_trait(self.0) && state.traits().len() >= RulesConfig::MAX_TRAITS {
            return Err(TraitError::SlotsFull);
        }
        Ok(())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>) -> Result<(), Self::Error> {
        let mut traits = reducer.traits();
        if traits.remove(self.0) {
            traits.apply_effect(self.0, EffectDirection::Remove);
        } else if traits.insert(self.0) {
            traits.apply_effect(self.0, EffectDirection::Add);
        } else {
            return Err(TraitError::SlotsFull);
        }
        Ok(())
    }

    fn post_validate(&self, state: &CharacterState) -> Result<(), Self::Error> {
        match state
            .primary()
            .iter()
            .find(|&(_, value)| value < RulesConfig::ATTRIBUTE_MIN)
        {
            Some((attribute, value)) => Err(TraitError::AttributeUnderflow {
                trait_: self.0,
                attribute,
                value,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{PlannerEngine, TransitionPhase};
    use crate::intent::Intent;

    #[test]
    fn third_trait_is_refused() {
        let mut state = CharacterState::default();
        state.traits.push(Trait::Jinxed);
        state.traits.push(Trait::Finesse);
        assert_eq!(
            ToggleTrait(Trait::Skilled).pre_validate(&state),
            Err(TraitError::SlotsFull)
        );
        assert!(ToggleTrait(Trait::Jinxed).pre_validate(&state).is_ok());
    }

    #[test]
    fn locked_after_creation_unless_mutated() {
        let mut state = CharacterState::default();
        state.level = 2;
        let err = ToggleTrait(Trait::Finesse).pre_validate(&state);
        assert_eq!(err, Err(TraitError::Locked));
        assert_eq!(TraitError::Locked.kind(), RejectionKind::PrerequisiteNotMet);

        state.level = 9;
        assert!(state.perks.take_rank(Perk::Mutate, 9));
        assert!(ToggleTrait(Trait::Finesse).pre_validate(&state).is_ok());
    }

    #[test]
    fn underflow_after_toggle_rolls_back() {
        // Gifted recorded without its +1, so removing it drops Luck to zero.
        let mut state = CharacterState::default();
        state.traits.push(Trait::Gifted);
        state.primary.set(Attribute::Luck, 1);
        let before = state.clone();

        let err = PlannerEngine::new(&mut state)
            .execute(&Intent::ToggleTrait(ToggleTrait(Trait::Gifted)))
            .unwrap_err();
        assert_eq!(err.kind(), RejectionKind::Internal);
        assert_eq!(err.phase(), Some(TransitionPhase::PostValidate));
        assert_eq!(state, before);
    }
}
