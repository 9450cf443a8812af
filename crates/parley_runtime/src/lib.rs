//! Sessions, REPL, CLI, and world snapshots for Parley.
//!
//! This crate provides:
//! - [`Session`] - A world plus its commands, running one line at a time
//! - [`Repl`] - The interactive console a local player types into
//! - [`snapshot`] - Saving and loading worlds as `MessagePack`
//! - [`ServerConfig`] - Settings for the `parley` binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod logging;
pub mod repl;
pub mod session;
pub mod snapshot;
pub mod starter;

pub use config::ServerConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::Repl;
pub use session::Session;
pub use starter::{find_or_create_player, starter_world};
