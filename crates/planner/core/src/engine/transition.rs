//! Intent transition dispatch.

use crate::intent::{Intent, IntentTransition, LevelUp};
use crate::state::CharacterState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
use super::reducer::StateReducer;

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the state through the reducer
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut CharacterState,
) -> Result<(), TransitionPhaseError<T::Error>>
where
    T: IntentTransition,
{
    transition
        .pre_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(&mut StateReducer::new(state))
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))
}

/// Routes an intent to its transition.
pub(super) fn execute_transition(
    intent: &Intent,
    state: &mut CharacterState,
) -> Result<(), ExecuteError> {
    match intent {
        Intent::IncreaseAttribute(t) => {
            drive_transition(t, state).map_err(ExecuteError::Attribute)
        }
        Intent::DecreaseAttribute(t) => {
            drive_transition(t, state).map_err(ExecuteError::Attribute)
        }
        Intent::ToggleTrait(t) => drive_transition(t, state).map_err(ExecuteError::Trait),
        Intent::TagSkill(t) => drive_transition(t, state).map_err(ExecuteError::Tag),
        Intent::RaiseSkill(t) => drive_transition(t, state).map_err(ExecuteError::Skill),
        Intent::LowerSkill(t) => drive_transition(t, state).map_err(ExecuteError::Skill),
        Intent::ChoosePerk(t) => drive_transition(t, state).map_err(ExecuteError::Perk),
        Intent::RemovePerk(t) => drive_transition(t, state).map_err(ExecuteError::Perk),
        Intent::LevelUp => drive_transition(&LevelUp, state).map_err(ExecuteError::LevelUp),
    }
}
