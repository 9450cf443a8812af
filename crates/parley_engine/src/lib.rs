//! Commands, event cascades, and scripted events for Parley.
//!
//! This crate provides:
//! - [`Command`] / [`CommandSet`] - Player commands and their dispatch
//! - [`run_cascade`] - Offering an action to interceptors before it happens
//! - [`Transport`] - Where player-facing messages go
//! - [`scripts`] - The stock event handler library
//! - [`commands`] - The standard world command catalog
//!
//! # Dispatch
//!
//! ```text
//! "take frog" ──► CommandResolver ──► Take + "frog"
//!                                          │
//!                      Grammar::parse ◄────┘
//!                            │
//!                            ▼
//!                 Command::execute(ctx, args)
//!                            │
//!            run_cascade(["get"], [player, frog]) ── veto ──► Cancelled
//!                            │
//!                            ▼
//!                  World::relocate(frog, player)
//! ```
//!
//! Commands run under whatever authority the caller established; the
//! session enters the player's authority before dispatching.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cascade;
pub mod command;
pub mod commands;
pub mod scripts;
pub mod transport;

pub use cascade::{CascadeOutcome, checkpoint, run_cascade};
pub use command::{Command, CommandContext, CommandSet, player_message};
pub use transport::{Outbox, Transport};
