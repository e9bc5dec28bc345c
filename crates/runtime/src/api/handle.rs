use tokio::sync::{broadcast, mpsc, oneshot};

use planner_core::{CharacterState, ExecutionOutcome, Intent, IntentRequest};

use crate::api::{Result, RuntimeError, SessionEvent};
use crate::workers::Command;

/// Client-facing handle to the session worker.
///
/// Calls from concurrent tasks are queued; each mutation completes before
/// the next one is taken.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Applies an intent; rejections surface as [`RuntimeError::Rejected`].
    pub async fn dispatch(&self, intent: Intent) -> Result<ExecutionOutcome> {
        let outcome = self
            .request(|reply| Command::Dispatch { intent, reply })
            .await??;
        Ok(outcome)
    }

    /// Parses an untyped request, then dispatches it.
    pub async fn dispatch_request(&self, request: &IntentRequest) -> Result<ExecutionOutcome> {
        let intent = request
            .parse()
            .map_err(|error| RuntimeError::Rejected(error.into()))?;
        self.dispatch(intent).await
    }

    pub async fn undo(&self) -> Result<bool> {
        self.request(|reply| Command::Undo { reply }).await
    }

    pub async fn redo(&self) -> Result<bool> {
        self.request(|reply| Command::Redo { reply }).await
    }

    pub async fn reset(&self) -> Result<()> {
        self.request(|reply| Command::Reset { reply }).await
    }

    /// Snapshot of the current character.
    pub async fn state(&self) -> Result<CharacterState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    pub async fn export(&self) -> Result<String> {
        self.request(|reply| Command::Export { reply }).await
    }

    /// Subscribe to session events
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }
}
