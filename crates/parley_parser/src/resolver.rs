//! Command resolution.
//!
//! Maps a free-text line to exactly one registered command and the
//! argument string it should parse. Resolution runs in three passes:
//!
//! 1. **Zero-space names** such as `'` or `:` that are glued to their
//!    argument. Two different commands matching here is reported as
//!    ambiguous straight away.
//! 2. **Spaced names** matched against the first word. Exact names beat
//!    prefixes, and commands that must be typed in full never match by
//!    prefix.
//! 3. **Exits** in the viewpoint's location, which resolve to the exit
//!    command when no command name matched.
//!
//! When several candidates survive, each is trial-parsed against its own
//! argument string. A candidate whose grammar cannot fit the input is
//! dropped; one that fits but names a missing object is kept, so the
//! player hears about the object rather than about the command.

use parley_foundation::{EntityId, Error, Result};
use parley_storage::World;
use tracing::debug;

use crate::grammar::{Grammar, GrammarError};
use crate::reference::ReferenceResolver;
use crate::tokenizer::InputTokenizer;

/// Builds a command's grammar for a viewpoint.
pub type GrammarFn = fn(&World, EntityId) -> Grammar;

/// Static description of a command, used to find it from typed input.
#[derive(Clone, Debug)]
pub struct CommandDescriptor {
    /// Unique key.
    pub key: String,
    /// Names matched against the first word. The first is the canonical
    /// name.
    pub names: Vec<String>,
    /// Names matched at the very start of the line, without a space.
    pub nospace_names: Vec<String>,
    /// Whether prefixes of the names are refused.
    pub require_full_name: bool,
    /// Grammar of the command's arguments.
    pub grammar: GrammarFn,
}

impl CommandDescriptor {
    /// A descriptor named after its key.
    #[must_use]
    pub fn new(key: impl Into<String>, grammar: GrammarFn) -> Self {
        let key = key.into();
        Self {
            names: vec![key.clone()],
            key,
            nospace_names: Vec::new(),
            require_full_name: false,
            grammar,
        }
    }

    /// Adds alternative names.
    #[must_use]
    pub fn aliases<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds zero-space names.
    #[must_use]
    pub fn nospace<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nospace_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Refuses abbreviations of this command.
    #[must_use]
    pub fn require_full_name(mut self) -> Self {
        self.require_full_name = true;
        self
    }

    /// The canonical name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.names.first().map_or(self.key.as_str(), String::as_str)
    }

    fn exact(&self, word: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(word))
            .map(String::as_str)
    }

    fn prefix(&self, word: &str) -> Option<&str> {
        let word = word.to_lowercase();
        self.names
            .iter()
            .find(|n| n.to_lowercase().starts_with(&word))
            .map(String::as_str)
    }

    fn nospace_match(&self, line: &str) -> Option<&str> {
        self.nospace_names
            .iter()
            .filter(|n| !n.is_empty() && line.starts_with(n.as_str()))
            .max_by_key(|n| n.len())
            .map(String::as_str)
    }
}

/// Every command the resolver can choose from.
#[derive(Clone, Debug, Default)]
pub struct CommandRegistry {
    descriptors: Vec<CommandDescriptor>,
    exit_command: Option<String>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the key is already registered.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<()> {
        if self.get(&descriptor.key).is_some() {
            return Err(Error::internal(format!(
                "command '{}' registered twice",
                descriptor.key
            )));
        }
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Chooses the command that typed exit names resolve to.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the command is not registered.
    pub fn set_exit_command(&mut self, key: &str) -> Result<()> {
        if self.get(key).is_none() {
            return Err(Error::internal(format!("unknown exit command '{key}'")));
        }
        self.exit_command = Some(key.to_string());
        Ok(())
    }

    /// Looks up a command by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CommandDescriptor> {
        self.descriptors.iter().find(|d| d.key == key)
    }

    /// All commands, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.descriptors.iter()
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// One way of reading a line: a command and its argument string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Key of the command.
    pub command: String,
    /// The name the line matched.
    pub name: String,
    /// Argument string to hand to the command's grammar.
    pub arguments: String,
}

/// Outcome of resolving a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one command.
    Resolved(Candidate),
    /// No command matched.
    NotFound {
        /// The unmatched word.
        input: String,
        /// Full-name-only commands the word abbreviates.
        hints: Vec<String>,
    },
    /// Several commands remain.
    Ambiguous {
        /// The line as typed.
        input: String,
        /// The remaining readings.
        candidates: Vec<Candidate>,
    },
}

impl Resolution {
    /// The resolved candidate, or the error to show the player.
    ///
    /// # Errors
    ///
    /// `NotFound` and `Ambiguous` resolutions become the matching errors. A
    /// not-found word that abbreviates a full-name-only command carries a
    /// hint naming that command.
    pub fn into_result(self) -> Result<Candidate> {
        match self {
            Self::Resolved(candidate) => Ok(candidate),
            Self::NotFound { input, hints } if hints.is_empty() => Err(Error::not_found(input)),
            Self::NotFound { input, hints } => Err(Error::not_found_with_hint(
                input,
                format!("{} must be typed in full.", hints.join(", ")),
            )),
            Self::Ambiguous { input, candidates } => Err(Error::ambiguous(
                input,
                candidates.into_iter().map(|c| c.name).collect(),
            )),
        }
    }
}

/// Resolves lines against a registry.
pub struct CommandResolver<'r> {
    registry: &'r CommandRegistry,
}

impl<'r> CommandResolver<'r> {
    /// Creates a resolver over `registry`.
    #[must_use]
    pub const fn new(registry: &'r CommandRegistry) -> Self {
        Self { registry }
    }

    /// Resolves `line` as typed by `viewpoint`.
    #[must_use]
    pub fn resolve_line(&self, world: &World, line: &str, viewpoint: EntityId) -> Resolution {
        let line = line.trim();
        let resolution = self.resolve_trimmed(world, line, viewpoint);
        debug!(line, ?resolution, "resolved command line");
        resolution
    }

    fn resolve_trimmed(&self, world: &World, line: &str, viewpoint: EntityId) -> Resolution {
        let zero_space: Vec<Candidate> = self
            .registry
            .iter()
            .filter_map(|d| {
                d.nospace_match(line).map(|name| Candidate {
                    command: d.key.clone(),
                    name: name.to_string(),
                    arguments: line[name.len()..].trim().to_string(),
                })
            })
            .collect();
        if zero_space.len() > 1 {
            return Resolution::Ambiguous {
                input: line.to_string(),
                candidates: zero_space,
            };
        }

        let (verb, rest) = InputTokenizer::split_verb(line);
        if verb.is_empty() {
            return Resolution::NotFound {
                input: String::new(),
                hints: Vec::new(),
            };
        }

        let spaced = self.spaced_matches(verb, rest);
        let candidates: Vec<Candidate> = if spaced.is_empty() {
            let exits = self.exit_matches(world, verb, viewpoint);
            match exits.len() {
                0 if zero_space.is_empty() => {
                    return Resolution::NotFound {
                        input: verb.to_string(),
                        hints: self.hints(verb),
                    };
                }
                0 | 1 => exits.into_iter().chain(zero_space).collect(),
                _ => {
                    return Resolution::Ambiguous {
                        input: line.to_string(),
                        candidates: exits,
                    };
                }
            }
        } else {
            let collisions: Vec<Candidate> = zero_space
                .into_iter()
                .filter(|z| spaced.iter().all(|c| c.command != z.command))
                .collect();
            spaced.into_iter().chain(collisions).collect()
        };

        if let [only] = candidates.as_slice() {
            return Resolution::Resolved(only.clone());
        }
        self.trial_parse(world, line, viewpoint, candidates)
    }

    fn spaced_matches(&self, verb: &str, rest: &str) -> Vec<Candidate> {
        let candidate = |d: &CommandDescriptor, name: &str| Candidate {
            command: d.key.clone(),
            name: name.to_string(),
            arguments: rest.to_string(),
        };

        let exact: Vec<Candidate> = self
            .registry
            .iter()
            .filter_map(|d| d.exact(verb).map(|name| candidate(d, name)))
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        self.registry
            .iter()
            .filter(|d| !d.require_full_name)
            .filter_map(|d| d.prefix(verb).map(|name| candidate(d, name)))
            .collect()
    }

    fn exit_matches(&self, world: &World, verb: &str, viewpoint: EntityId) -> Vec<Candidate> {
        let (Some(command), Some(location)) =
            (&self.registry.exit_command, world.location(viewpoint))
        else {
            return Vec::new();
        };
        let exits = world.exits_at(location);
        ReferenceResolver::best_matches(world, verb, &exits)
            .into_iter()
            .map(|exit| Candidate {
                command: command.clone(),
                name: world.name(exit).to_string(),
                arguments: world.name(exit).to_string(),
            })
            .collect()
    }

    fn hints(&self, verb: &str) -> Vec<String> {
        self.registry
            .iter()
            .filter(|d| d.require_full_name)
            .filter_map(|d| d.prefix(verb))
            .map(str::to_string)
            .collect()
    }

    fn trial_parse(
        &self,
        world: &World,
        line: &str,
        viewpoint: EntityId,
        candidates: Vec<Candidate>,
    ) -> Resolution {
        let mut survivors: Vec<Candidate> = candidates
            .iter()
            .filter(|c| {
                let Some(descriptor) = self.registry.get(&c.command) else {
                    return false;
                };
                let grammar = (descriptor.grammar)(world, viewpoint);
                match grammar.parse(world, viewpoint, &c.arguments) {
                    Err(GrammarError::Syntax) => {
                        debug!(command = %c.command, arguments = %c.arguments, "trial parse eliminated candidate");
                        false
                    }
                    Ok(_) | Err(GrammarError::Reference(_)) => true,
                }
            })
            .cloned()
            .collect();

        match survivors.len() {
            1 => Resolution::Resolved(survivors.remove(0)),
            0 => Resolution::Ambiguous {
                input: line.to_string(),
                candidates,
            },
            _ => Resolution::Ambiguous {
                input: line.to_string(),
                candidates: survivors,
            },
        }
    }
}
