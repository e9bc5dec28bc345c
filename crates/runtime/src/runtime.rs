//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up the command and event
//! channels, and hands out [`SessionHandle`]s to clients.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use planner_core::CharacterState;

use crate::api::{Result, RuntimeError, SessionEvent, SessionHandle};
use crate::config::SessionConfig;
use crate::session::Session;
use crate::workers::SessionWorker;

/// Main runtime that serializes access to one planning session.
pub struct Runtime {
    handle: SessionHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.handle.subscribe_events()
    }

    /// Waits for the worker after the last handle is dropped.
    ///
    /// Handles cloned out of the runtime keep the worker alive until they
    /// are dropped too.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`].
#[derive(Default)]
pub struct RuntimeBuilder {
    config: SessionConfig,
    state: Option<CharacterState>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Resume from an existing character instead of a fresh one.
    pub fn state(mut self, state: CharacterState) -> Self {
        self.state = Some(state);
        self
    }

    /// Validates the config and spawns the worker on the current tokio runtime.
    pub fn build(self) -> Result<Runtime> {
        self.config.validate()?;

        let session = match self.state {
            Some(state) => {
                state.check_consistency()?;
                Session::with_state(state, self.config.history_limit)
            }
            None => Session::new(&self.config),
        };

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer);
        let (event_tx, _) = broadcast::channel(self.config.event_buffer);

        let worker = SessionWorker::new(session, command_rx, event_tx.clone());
        let worker_handle = tokio::spawn(worker.run());

        Ok(Runtime {
            handle: SessionHandle::new(command_tx, event_tx),
            worker_handle,
        })
    }
}
