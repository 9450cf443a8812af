//! Parley - Multiplayer text-world server core
//!
//! This crate re-exports all layers of the Parley system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: parley_runtime    - Sessions, REPL, CLI, snapshots
//! Layer 4: parley_engine     - Commands, event cascades, stock scripts
//! Layer 3: parley_parser     - Command resolution, grammars, object references
//! Layer 2: parley_storage    - Entities, guarded attributes, equipment
//! Layer 1: parley_lock       - Authority context and lock policies
//! Layer 0: parley_foundation - Core types (Value, EntityId, Error)
//! ```

pub use parley_engine as engine;
pub use parley_foundation as foundation;
pub use parley_lock as lock;
pub use parley_parser as parser;
pub use parley_runtime as runtime;
pub use parley_storage as storage;
