//! Error types for the Parley system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;

/// The main error type for Parley operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a "nothing matched" error.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound {
            what: what.into(),
            hint: None,
        })
    }

    /// Creates a "nothing matched" error with a hint for the player.
    #[must_use]
    pub fn not_found_with_hint(what: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound {
            what: what.into(),
            hint: Some(hint.into()),
        })
    }

    /// Creates an ambiguity error listing the surviving candidates.
    #[must_use]
    pub fn ambiguous(what: impl Into<String>, candidates: Vec<String>) -> Self {
        Self::new(ErrorKind::Ambiguous {
            what: what.into(),
            candidates,
        })
    }

    /// Creates an access denied error.
    #[must_use]
    pub fn access_denied(entity: EntityId, attribute: impl Into<String>, access: Access) -> Self {
        Self::new(ErrorKind::AccessDenied {
            entity,
            attribute: attribute.into(),
            access,
        })
    }

    /// Creates a missing authority error.
    #[must_use]
    pub fn missing_authority() -> Self {
        Self::new(ErrorKind::MissingAuthority)
    }

    /// Creates a cancellation error carrying the player-facing reason.
    #[must_use]
    pub fn cancelled(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cancelled(reason.into()))
    }

    /// Creates a domain refusal carrying the player-facing message.
    #[must_use]
    pub fn refused(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Refused(message.into()))
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates an attribute not found error.
    #[must_use]
    pub fn attribute_not_found(entity: EntityId, attribute: impl Into<String>) -> Self {
        Self::new(ErrorKind::AttributeNotFound {
            entity,
            attribute: attribute.into(),
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true for failures a player can cause and be told about.
    ///
    /// Missing authority, internal, I/O and serialization failures are
    /// programming or host errors.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(
            self.kind,
            ErrorKind::MissingAuthority
                | ErrorKind::Internal(_)
                | ErrorKind::Io(_)
                | ErrorKind::Serialization(_)
        )
    }

    /// Returns true if this error is an event veto.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled(_))
    }

    /// The single line of text shown to the player who caused this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match &self.kind {
            ErrorKind::NotFound { what, hint: None } => {
                format!("I don't know what you mean by \"{what}\".")
            }
            ErrorKind::NotFound {
                what,
                hint: Some(hint),
            } => format!("I don't know what you mean by \"{what}\". ({hint})"),
            ErrorKind::Ambiguous { what, candidates } => {
                if candidates.is_empty() {
                    format!("I don't know which \"{what}\" you mean.")
                } else {
                    format!("Which one do you mean? ({})", candidates.join(", "))
                }
            }
            ErrorKind::AccessDenied {
                entity,
                attribute,
                access,
            } => format!("You don't have permission to {access} {attribute} on {entity}."),
            ErrorKind::Cancelled(message)
            | ErrorKind::Refused(message)
            | ErrorKind::InvalidName(message) => message.clone(),
            ErrorKind::EntityNotFound(id) => format!("There is no object {id}."),
            ErrorKind::AttributeNotFound { entity, attribute } => {
                format!("{entity} doesn't have an attribute '{attribute}'.")
            }
            ErrorKind::MissingAuthority
            | ErrorKind::Io(_)
            | ErrorKind::Serialization(_)
            | ErrorKind::Internal(_) => "Something went wrong.".to_string(),
        }
    }
}

/// Which side of a guarded attribute was attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Reading the value.
    Read,
    /// Replacing or removing the value.
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "set"),
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// No object or command matched a reference.
    #[error("not found: {what}")]
    NotFound {
        /// The fragment that failed to match.
        what: String,
        /// Something the player may have meant instead.
        hint: Option<String>,
    },

    /// Several objects or commands matched a reference.
    #[error("ambiguous: {what} (candidates: {})", .candidates.join(", "))]
    Ambiguous {
        /// The fragment that matched too much.
        what: String,
        /// Display names of the candidates.
        candidates: Vec<String>,
    },

    /// A lock refused the current authority.
    #[error("access denied: {access} {attribute} on {entity}")]
    AccessDenied {
        /// The entity owning the attribute.
        entity: EntityId,
        /// The guarded attribute.
        attribute: String,
        /// The attempted access.
        access: Access,
    },

    /// A lock was evaluated while no authority was in effect.
    #[error("lock evaluated with no authority in effect")]
    MissingAuthority,

    /// An event handler vetoed the action.
    #[error("cancelled: {0}")]
    Cancelled(String),

    /// A command refused to act.
    #[error("refused: {0}")]
    Refused(String),

    /// Entity was not found in the world.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// Attribute is not set on the entity.
    #[error("attribute not found: {attribute} on entity {entity}")]
    AttributeNotFound {
        /// The entity that was queried.
        entity: EntityId,
        /// The attribute name that was not found.
        attribute: String,
    },

    /// A name failed validation.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The command or handler that was running.
    pub source: Option<String>,
    /// Stack of commands and handlers leading here.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
