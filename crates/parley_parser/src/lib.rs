//! Command resolution for Parley.
//!
//! This crate turns a line typed by a player into one command and its
//! parsed arguments.
//!
//! # Architecture
//!
//! ```text
//! "pok big frog"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ COMMAND         │  → zero-space names, spaced names, exits
//! │ RESOLVER        │  → candidates: [poke "big frog"]
//! └─────────────────┘
//!          │ (several candidates)
//!          ▼
//! ┌─────────────────┐
//! │ TRIAL PARSE     │  → drop candidates whose grammar cannot fit
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ GRAMMAR         │  → segment: [Object "big frog"]
//! │                 │  → resolve: target = #12
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`] - Whitespace tokens with byte offsets
//! - [`reference`] - Scoped, tiered object reference resolution
//! - [`grammar`] - Argument grammars and two-phase parsing
//! - [`resolver`] - Command registry and line resolution

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod grammar;
pub mod reference;
pub mod resolver;
pub mod tokenizer;

pub use grammar::{Argument, Arguments, Element, Grammar, GrammarError};
pub use reference::{MatchTier, Priority, ReferenceError, ReferenceResolver, Scope};
pub use resolver::{
    Candidate, CommandDescriptor, CommandRegistry, CommandResolver, GrammarFn, Resolution,
};
