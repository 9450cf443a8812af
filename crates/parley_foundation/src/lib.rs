//! Core identifiers, attribute values, and error types for Parley.
//!
//! This crate provides:
//! - [`EntityId`] - Monotonic, never-reused world object identifiers
//! - [`Value`] - The value type stored in entity attributes
//! - [`Error`] - Rich error types shared by every layer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod value;

pub use entity::EntityId;
pub use error::{Access, Error, ErrorContext, ErrorKind};
pub use value::Value;

/// Result type alias using the Parley error type.
pub type Result<T> = std::result::Result<T, Error>;
