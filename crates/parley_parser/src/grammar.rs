//! Command argument grammars.
//!
//! A [`Grammar`] is a list of alternatives, each a sequence of
//! [`Element`]s. Parsing happens in two phases: the input is first
//! segmented against an alternative's structure (keywords fixed, object and
//! text slots spanning one or more words, with backtracking so multi-word
//! names can sit next to prepositions), and only then are the object slots
//! resolved against the world. A structural mismatch is a
//! [`GrammarError::Syntax`]; a well-formed line naming something that isn't
//! there is a [`GrammarError::Reference`].

use std::collections::BTreeMap;

use parley_foundation::{EntityId, Error};
use parley_storage::World;

use crate::reference::{Priority, ReferenceError, ReferenceResolver, Scope};
use crate::tokenizer::{InputTokenizer, Token};

/// One position in a grammar alternative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    /// A literal word (or words), matched case-insensitively.
    Keyword(String),
    /// Exactly one object.
    Object {
        /// Argument name.
        slot: String,
        /// Where to look.
        scope: Scope,
        /// Tie-break between held and nearby things.
        priority: Option<Priority>,
    },
    /// Every best-tier match for the reference.
    Objects {
        /// Argument name.
        slot: String,
        /// Where to look.
        scope: Scope,
    },
    /// Raw text, as typed.
    Text {
        /// Argument name.
        slot: String,
    },
}

impl Element {
    /// A literal keyword.
    #[must_use]
    pub fn keyword(word: impl Into<String>) -> Self {
        Self::Keyword(word.into())
    }

    /// A single-object slot.
    #[must_use]
    pub fn object(slot: impl Into<String>, scope: Scope) -> Self {
        Self::Object {
            slot: slot.into(),
            scope,
            priority: None,
        }
    }

    /// A single-object slot that prefers one half of [`Scope::Reachable`].
    #[must_use]
    pub fn object_preferring(slot: impl Into<String>, scope: Scope, priority: Priority) -> Self {
        Self::Object {
            slot: slot.into(),
            scope,
            priority: Some(priority),
        }
    }

    /// A single-object slot searching [`Scope::Reachable`] by name, where
    /// `#<n>` may name any object in the world.
    #[must_use]
    pub fn object_or_id(slot: impl Into<String>) -> Self {
        Self::object(slot, Scope::ReachableOrIdentifier)
    }

    /// A multi-object slot.
    #[must_use]
    pub fn objects(slot: impl Into<String>, scope: Scope) -> Self {
        Self::Objects {
            slot: slot.into(),
            scope,
        }
    }

    /// A free-text slot.
    #[must_use]
    pub fn text(slot: impl Into<String>) -> Self {
        Self::Text { slot: slot.into() }
    }
}

/// The argument shapes a command accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grammar {
    alternatives: Vec<Vec<Element>>,
}

impl Grammar {
    /// A grammar that accepts nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A grammar that accepts only an empty argument string.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            alternatives: vec![Vec::new()],
        }
    }

    /// Adds an alternative. Alternatives are tried in order.
    #[must_use]
    pub fn or(mut self, sequence: impl IntoIterator<Item = Element>) -> Self {
        self.alternatives.push(sequence.into_iter().collect());
        self
    }

    /// The alternatives, in order.
    #[must_use]
    pub fn alternatives(&self) -> &[Vec<Element>] {
        &self.alternatives
    }

    /// Parses an argument string for `viewpoint`.
    ///
    /// The first alternative that both fits and resolves wins. Otherwise
    /// the first reference failure is reported, or a syntax error if no
    /// alternative fit at all.
    ///
    /// # Errors
    ///
    /// See [`GrammarError`].
    pub fn parse(
        &self,
        world: &World,
        viewpoint: EntityId,
        input: &str,
    ) -> Result<Arguments, GrammarError> {
        let tokens = InputTokenizer::tokenize(input);
        let mut first_failure = None;

        for alternative in &self.alternatives {
            let mut segmentations = Vec::new();
            segment(alternative, &tokens, input, &mut Vec::new(), &mut segmentations);
            for segments in segmentations {
                match resolve(world, viewpoint, &segments) {
                    Ok(arguments) => return Ok(arguments),
                    Err(e) => {
                        first_failure.get_or_insert(e);
                    }
                }
            }
        }

        Err(first_failure.map_or(GrammarError::Syntax, GrammarError::Reference))
    }
}

type Segment<'e, 'a> = (&'e Element, &'a str);

fn segment<'e, 'a>(
    elements: &'e [Element],
    tokens: &[Token<'a>],
    input: &'a str,
    prefix: &mut Vec<Segment<'e, 'a>>,
    out: &mut Vec<Vec<Segment<'e, 'a>>>,
) {
    let Some((element, rest)) = elements.split_first() else {
        if tokens.is_empty() {
            out.push(prefix.clone());
        }
        return;
    };

    if let Element::Keyword(word) = element {
        let words: Vec<&str> = word.split_whitespace().collect();
        let fits = tokens.len() >= words.len()
            && words
                .iter()
                .zip(tokens)
                .all(|(w, t)| t.text.eq_ignore_ascii_case(w));
        if fits && !words.is_empty() {
            let text = span(input, &tokens[..words.len()]);
            prefix.push((element, text));
            segment(rest, &tokens[words.len()..], input, prefix, out);
            prefix.pop();
        }
        return;
    }

    for n in 1..=tokens.len() {
        prefix.push((element, span(input, &tokens[..n])));
        segment(rest, &tokens[n..], input, prefix, out);
        prefix.pop();
    }
}

fn span<'a>(input: &'a str, tokens: &[Token<'a>]) -> &'a str {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => &input[first.start..last.end],
        _ => "",
    }
}

fn resolve(
    world: &World,
    viewpoint: EntityId,
    segments: &[Segment<'_, '_>],
) -> Result<Arguments, ReferenceError> {
    let mut arguments = Arguments::default();
    for &(element, text) in segments {
        match element {
            Element::Keyword(_) => {}
            Element::Object {
                slot,
                scope,
                priority,
            } => {
                let id = ReferenceResolver::resolve_one(world, text, viewpoint, *scope, *priority)?;
                arguments.slots.insert(slot.clone(), Argument::Object(id));
            }
            Element::Objects { slot, scope } => {
                let ids = ReferenceResolver::candidates(world, text, viewpoint, *scope, None)?;
                arguments.slots.insert(slot.clone(), Argument::Objects(ids));
            }
            Element::Text { slot } => {
                arguments
                    .slots
                    .insert(slot.clone(), Argument::Text(text.to_string()));
            }
        }
    }
    Ok(arguments)
}

/// A parsed argument value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Argument {
    /// One object.
    Object(EntityId),
    /// Several objects.
    Objects(Vec<EntityId>),
    /// Raw text.
    Text(String),
}

/// Parsed arguments, keyed by slot name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Arguments {
    slots: BTreeMap<String, Argument>,
}

impl Arguments {
    /// The object bound to a single-object slot.
    #[must_use]
    pub fn object(&self, slot: &str) -> Option<EntityId> {
        match self.slots.get(slot)? {
            Argument::Object(id) => Some(*id),
            _ => None,
        }
    }

    /// The objects bound to a multi-object slot.
    #[must_use]
    pub fn objects(&self, slot: &str) -> &[EntityId] {
        match self.slots.get(slot) {
            Some(Argument::Objects(ids)) => ids,
            Some(Argument::Object(id)) => std::slice::from_ref(id),
            _ => &[],
        }
    }

    /// The text bound to a free-text slot.
    #[must_use]
    pub fn text(&self, slot: &str) -> Option<&str> {
        match self.slots.get(slot)? {
            Argument::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns true if nothing was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Why an argument string was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// No alternative fits the shape of the input.
    #[error("input does not fit any form of the command")]
    Syntax,
    /// The input fits, but an object reference failed.
    #[error(transparent)]
    Reference(#[from] ReferenceError),
}

impl GrammarError {
    /// Returns true for structural mismatches.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax)
    }

    /// Converts to the shared error type. `usage` is shown for syntax
    /// errors.
    #[must_use]
    pub fn into_error(self, world: &World, usage: &str) -> Error {
        match self {
            Self::Syntax => Error::refused(usage),
            Self::Reference(e) => e.into_error(world),
        }
    }
}
