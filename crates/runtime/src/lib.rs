//! Session runtime for the character-build planner.
//!
//! This crate owns a single [`planner_core::CharacterState`] behind a
//! [`Session`], serializes mutations through a background worker, and exposes
//! a cloneable [`SessionHandle`] for async callers.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`session`] keeps the state with undo/redo history
//! - [`config`] loads session tunables from the environment or TOML
//! - [`export`] renders the plain-text character sheet
pub mod api;
pub mod config;
pub mod export;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{Result, RuntimeError, SessionEvent, SessionHandle};
pub use config::SessionConfig;
pub use export::{export_file_name, render_export, write_export};
pub use runtime::{Runtime, RuntimeBuilder};
pub use session::Session;
