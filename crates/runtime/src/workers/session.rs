//! Session worker that owns the authoritative [`Session`].
//!
//! Receives commands from [`SessionHandle`](crate::SessionHandle), applies
//! them one at a time, and publishes the outcome on the event channel.

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{info, trace, warn};

use planner_core::{CharacterState, ExecuteError, ExecutionOutcome, Intent};

use crate::api::SessionEvent;
use crate::export::render_export;
use crate::session::Session;

/// Commands that can be sent to the session worker.
pub enum Command {
    /// Apply an intent to the character.
    Dispatch {
        intent: Intent,
        reply: oneshot::Sender<Result<ExecutionOutcome, ExecuteError>>,
    },
    Undo {
        reply: oneshot::Sender<bool>,
    },
    Redo {
        reply: oneshot::Sender<bool>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
    /// Query the current character state (read-only).
    QueryState {
        reply: oneshot::Sender<CharacterState>,
    },
    /// Render the plain-text export of the current character.
    Export {
        reply: oneshot::Sender<String>,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Dispatch { .. } => "Dispatch",
            Command::Undo { .. } => "Undo",
            Command::Redo { .. } => "Redo",
            Command::Reset { .. } => "Reset",
            Command::QueryState { .. } => "QueryState",
            Command::Export { .. } => "Export",
        }
    }
}

/// Background task that processes session commands in arrival order.
pub struct SessionWorker {
    session: Session,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionWorker {
    pub fn new(
        session: Session,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            session,
            command_rx,
            event_tx,
        }
    }

    /// Main worker loop. Exits once every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        info!(level = self.session.state().level(), "session worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        let name = cmd.name();
        let delivered = match cmd {
            Command::Dispatch { intent, reply } => {
                let result = self.session.try_dispatch(&intent);
                let event = match &result {
                    Ok(outcome) => {
                        SessionEvent::applied(intent, *outcome, self.session.state().level())
                    }
                    Err(error) => SessionEvent::rejected(intent, error),
                };
                self.publish(event);
                reply.send(result).is_ok()
            }
            Command::Undo { reply } => {
                let undone = self.session.undo();
                if undone {
                    self.publish(SessionEvent::Undone);
                }
                reply.send(undone).is_ok()
            }
            Command::Redo { reply } => {
                let redone = self.session.redo();
                if redone {
                    self.publish(SessionEvent::Redone);
                }
                reply.send(redone).is_ok()
            }
            Command::Reset { reply } => {
                self.session.reset();
                reply.send(()).is_ok()
            }
            Command::QueryState { reply } => reply.send(self.session.state().clone()).is_ok(),
            Command::Export { reply } => reply.send(render_export(self.session.state())).is_ok(),
        };

        if !delivered {
            warn!(command = name, "reply channel closed (caller dropped)");
        }
    }

    fn publish(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            trace!("no event subscribers");
        }
    }
}
