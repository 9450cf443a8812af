//! Acting authority and composable lock policies for Parley.
//!
//! Every permission decision in the world is made by evaluating a
//! [`Policy`] against the *current authority*: the entity on whose behalf
//! the running code acts. Authority is entered with [`with_authority`] and
//! restored when the scope ends, however it ends.
//!
//! ```text
//! with_authority(alice) ─┐
//!                        │  policy.evaluate(None, world)   → checks Alice
//!   with_authority(SYS) ─┤
//!                        │  policy.evaluate(None, world)   → always true
//!                        ┘  (back to Alice)
//! ```
//!
//! # Modules
//!
//! - [`authority`] - The per-thread authority slot and its scoped guard
//! - [`policy`] - The lock variants and their evaluation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod authority;
pub mod policy;

pub use authority::{Authority, AuthorityGuard, current_authority, with_authority, without_authority};
pub use policy::{Locatable, Policy};
