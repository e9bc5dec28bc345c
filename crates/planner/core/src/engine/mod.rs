//! Intent execution pipeline.
//!
//! The [`PlannerEngine`] is the authoritative reducer for [`CharacterState`].
//! It routes each [`Intent`] through its transition phases, recomputes the
//! derived caches, and guarantees that a rejected intent leaves no trace.

mod errors;
mod reducer;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use reducer::{
    AttributesReducer, PerksReducer, ProgressReducer, SkillsReducer, StateReducer, TraitsReducer,
};

use crate::intent::{Intent, IntentRequest};
use crate::state::CharacterState;

/// Outcome of an accepted intent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Levels gained by this intent (1 for a level-up or Here and now).
    pub levels_gained: u32,
}

/// Engine that applies intents to a borrowed character state.
///
/// Every intent runs `pre_validate → apply → post_validate` followed by a
/// full recompute of base skills and derived stats. On any error the state
/// is restored to its value before the intent.
pub struct PlannerEngine<'a> {
    state: &'a mut CharacterState,
}

impl<'a> PlannerEngine<'a> {
    pub fn new(state: &'a mut CharacterState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &CharacterState {
        self.state
    }

    pub fn execute(&mut self, intent: &Intent) -> Result<ExecutionOutcome, ExecuteError> {
        let before = self.state.clone();

        match transition::execute_transition(intent, self.state) {
            Ok(()) => {
                self.state.recompute();
                Ok(ExecutionOutcome {
                    levels_gained: self.state.level() - before.level(),
                })
            }
            Err(error) => {
                *self.state = before;
                Err(error)
            }
        }
    }

    /// Parses an untyped request, then executes it.
    pub fn execute_request(
        &mut self,
        request: &IntentRequest,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let intent = request.parse()?;
        self.execute(&intent)
    }
}
