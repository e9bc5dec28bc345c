//! Session events broadcast to subscribers.

use serde::{Deserialize, Serialize};

use planner_core::{ExecuteError, ExecutionOutcome, Intent, RejectionKind, RuleError};

/// Outcome of a command processed by the session worker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SessionEvent {
    /// An intent was accepted and the state advanced.
    Applied {
        intent: Intent,
        outcome: ExecutionOutcome,
        level: u32,
    },
    /// An intent was rejected; the state is unchanged.
    Rejected {
        intent: Intent,
        kind: RejectionKind,
        code: String,
        message: String,
    },
    /// The last accepted change was reverted.
    Undone,
    /// A reverted change was applied again.
    Redone,
}

impl SessionEvent {
    pub fn applied(intent: Intent, outcome: ExecutionOutcome, level: u32) -> Self {
        Self::Applied {
            intent,
            outcome,
            level,
        }
    }

    pub fn rejected(intent: Intent, error: &ExecuteError) -> Self {
        Self::Rejected {
            intent,
            kind: error.kind(),
            code: error.error_code().to_owned(),
            message: error.to_string(),
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
