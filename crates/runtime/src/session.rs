//! Single-owner planning session with bounded undo/redo.

use std::collections::VecDeque;

use tracing::{debug, info};

use planner_core::{
    CharacterState, ExecuteError, ExecutionOutcome, Intent, IntentRequest, PlannerEngine,
    RuleError,
};

use crate::config::SessionConfig;

/// Owns the character state and serializes every mutation through the engine.
#[derive(Clone, Debug)]
pub struct Session {
    state: CharacterState,
    undo: VecDeque<CharacterState>,
    redo: Vec<CharacterState>,
    history_limit: usize,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        info!(
            history_limit = config.history_limit,
            tag_bonus = config.rules.tag_bonus,
            "planning session created"
        );
        Self::with_state(CharacterState::new(config.rules.clone()), config.history_limit)
    }

    /// Resumes from an existing state with empty history.
    ///
    /// The derived caches are rebuilt from the stored choices.
    pub fn with_state(mut state: CharacterState, history_limit: usize) -> Self {
        state.recompute();
        Self {
            state,
            undo: VecDeque::new(),
            redo: Vec::new(),
            history_limit,
        }
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    /// Applies an intent, ignoring rejections. Returns whether it was accepted.
    pub fn dispatch(&mut self, intent: &Intent) -> bool {
        self.try_dispatch(intent).is_ok()
    }

    /// Applies an intent and reports rejections to the caller.
    pub fn try_dispatch(&mut self, intent: &Intent) -> Result<ExecutionOutcome, ExecuteError> {
        let snapshot = self.state.clone();

        match PlannerEngine::new(&mut self.state).execute(intent) {
            Ok(outcome) => {
                self.remember(snapshot);
                self.redo.clear();
                debug!(
                    %intent,
                    level = self.state.level(),
                    skill_points = self.state.skill_points(),
                    perk_points = self.state.perk_points(),
                    "intent applied"
                );
                Ok(outcome)
            }
            Err(error) => {
                debug!(
                    %intent,
                    kind = %error.kind(),
                    code = error.error_code(),
                    %error,
                    "intent rejected"
                );
                Err(error)
            }
        }
    }

    /// Parses and applies an untyped request.
    pub fn dispatch_request(
        &mut self,
        request: &IntentRequest,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let intent = request.parse().map_err(|error| {
            debug!(kind = %request.kind, %error, "request rejected");
            ExecuteError::from(error)
        })?;
        self.try_dispatch(&intent)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Reverts the last accepted intent. Returns `false` with no history.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.state, previous);
        self.redo.push(current);
        debug!(level = self.state.level(), "undo");
        true
    }

    /// Re-applies the last reverted intent. Returns `false` when none is pending.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.state, next);
        self.remember(current);
        debug!(level = self.state.level(), "redo");
        true
    }

    /// Starts a fresh character under the same rules; the old one stays undoable.
    pub fn reset(&mut self) {
        let fresh = CharacterState::new(self.state.rules().clone());
        let previous = std::mem::replace(&mut self.state, fresh);
        self.remember(previous);
        self.redo.clear();
        info!("session reset");
    }

    fn remember(&mut self, snapshot: CharacterState) {
        if self.history_limit == 0 {
            return;
        }
        if self.undo.len() == self.history_limit {
            self.undo.pop_front();
        }
        self.undo.push_back(snapshot);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::{Attribute, IncreaseAttribute, RejectionKind};

    fn increase(attribute: Attribute) -> Intent {
        Intent::IncreaseAttribute(IncreaseAttribute(attribute))
    }

    #[test]
    fn dispatch_is_silent_on_rejection() {
        let mut session = Session::default();
        assert!(!session.dispatch(&Intent::LevelUp));
        assert_eq!(session.state(), &CharacterState::default());
        assert!(!session.can_undo());
    }

    #[test]
    fn undo_and_redo_walk_history() {
        let mut session = Session::default();
        session.dispatch(&increase(Attribute::Strength));
        session.dispatch(&increase(Attribute::Strength));
        assert_eq!(session.state().primary().get(Attribute::Strength), 7);

        assert!(session.undo());
        assert_eq!(session.state().primary().get(Attribute::Strength), 6);
        assert!(session.redo());
        assert_eq!(session.state().primary().get(Attribute::Strength), 7);
        assert!(!session.redo());
    }

    #[test]
    fn new_intent_clears_redo() {
        let mut session = Session::default();
        session.dispatch(&increase(Attribute::Luck));
        session.undo();
        assert!(session.can_redo());
        session.dispatch(&increase(Attribute::Agility));
        assert!(!session.can_redo());
    }

    #[test]
    fn history_is_bounded() {
        let mut session = Session::with_state(CharacterState::default(), 2);
        for _ in 0..4 {
            session.dispatch(&increase(Attribute::Charisma));
        }
        assert!(session.undo());
        assert!(session.undo());
        assert!(!session.undo());
        assert_eq!(session.state().primary().get(Attribute::Charisma), 7);
    }

    #[test]
    fn zero_limit_disables_history() {
        let mut session = Session::with_state(CharacterState::default(), 0);
        session.dispatch(&increase(Attribute::Endurance));
        assert!(!session.undo());
    }

    #[test]
    fn reset_is_undoable() {
        let mut session = Session::default();
        session.dispatch(&increase(Attribute::Perception));
        session.reset();
        assert_eq!(session.state().primary().get(Attribute::Perception), 5);
        assert!(session.undo());
        assert_eq!(session.state().primary().get(Attribute::Perception), 6);
    }

    #[test]
    fn try_dispatch_reports_the_rejection() {
        let mut session = Session::default();
        let err = session.try_dispatch(&Intent::LevelUp).unwrap_err();
        assert_eq!(err.kind(), RejectionKind::PrerequisiteNotMet);

        let err = session
            .dispatch_request(&IntentRequest::new("choosePerk", "Jinxed"))
            .unwrap_err();
        assert_eq!(err.kind(), RejectionKind::UnknownReference);
    }
}
