//! Unified error types surfaced by the runtime API.
//!
//! Wraps worker coordination failures and rejected intents so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use planner_core::{ExecuteError, RejectionKind, RuleError, SnapshotError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Rejected(#[from] ExecuteError),

    #[error("resumed character is inconsistent")]
    InvalidSnapshot(#[from] SnapshotError),

    #[error("invalid session config: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}

impl RuntimeError {
    /// Rejection category when the error is a rejected intent.
    pub fn rejection_kind(&self) -> Option<RejectionKind> {
        match self {
            Self::Rejected(error) => Some(error.kind()),
            _ => None,
        }
    }
}
