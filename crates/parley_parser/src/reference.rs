//! Object reference resolution.
//!
//! Turns a fragment of player input such as `"frog"`, `"big f"` or `"#12"`
//! into world objects, searching a [`Scope`] around a viewpoint.
//!
//! Matching is case-insensitive and tiered: an exact name beats a prefix of
//! the full name, which beats a prefix of any single word of the name. Only
//! the best tier that matched anything is returned.

use parley_foundation::{EntityId, Error};
use parley_storage::World;

/// Where to look for objects, relative to a viewpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Things the viewpoint is carrying.
    Held,
    /// Things in the same location as the viewpoint, plus `me` and `here`.
    Nearby,
    /// Held and nearby things together.
    Reachable,
    /// Names as [`Scope::Reachable`]; `#<n>` may name any object.
    ReachableOrIdentifier,
    /// Only `#<n>` identifiers, naming any object.
    Identifier,
}

impl Scope {
    /// Returns true if `#<n>` may name objects outside the scope.
    #[must_use]
    pub const fn accepts_any_identifier(self) -> bool {
        matches!(self, Self::ReachableOrIdentifier | Self::Identifier)
    }
}

/// Which half of [`Scope::Reachable`] wins when both match equally well.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Priority {
    /// Prefer things in the room.
    Room,
    /// Prefer things being carried.
    Inventory,
}

/// How well a name matched a fragment. Later variants are better.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Some word of the name starts with the fragment.
    WordPrefix,
    /// The full name starts with the fragment.
    Prefix,
    /// The name is the fragment.
    Exact,
}

impl MatchTier {
    /// How well `name` matches `fragment`, ignoring case.
    ///
    /// ```
    /// use parley_parser::reference::MatchTier;
    ///
    /// assert_eq!(MatchTier::of("Big Frog", "big frog"), Some(MatchTier::Exact));
    /// assert_eq!(MatchTier::of("Big Frog", "big f"), Some(MatchTier::Prefix));
    /// assert_eq!(MatchTier::of("Big Frog", "fr"), Some(MatchTier::WordPrefix));
    /// assert_eq!(MatchTier::of("Big Frog", "toad"), None);
    /// ```
    #[must_use]
    pub fn of(name: &str, fragment: &str) -> Option<Self> {
        let name = name.to_lowercase();
        let fragment = fragment.trim().to_lowercase();
        if fragment.is_empty() {
            None
        } else if name == fragment {
            Some(Self::Exact)
        } else if name.starts_with(&fragment) {
            Some(Self::Prefix)
        } else if name.split_whitespace().any(|w| w.starts_with(&fragment)) {
            Some(Self::WordPrefix)
        } else {
            None
        }
    }
}

/// Why a reference could not be turned into objects.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    /// Nothing in scope matched.
    #[error("nothing matches \"{fragment}\"")]
    NotFound {
        /// The fragment as typed.
        fragment: String,
    },
    /// More than one object matched equally well.
    #[error("\"{fragment}\" matches {} objects", .candidates.len())]
    Ambiguous {
        /// The fragment as typed.
        fragment: String,
        /// The tied objects.
        candidates: Vec<EntityId>,
    },
    /// A `#<n>` reference that is malformed or names no object.
    #[error("\"{fragment}\" is not a valid object identifier")]
    InvalidIdentifier {
        /// The fragment as typed.
        fragment: String,
    },
}

impl ReferenceError {
    /// Converts to the shared error type, naming tied candidates.
    #[must_use]
    pub fn into_error(self, world: &World) -> Error {
        match self {
            Self::NotFound { fragment } => Error::not_found(fragment),
            Self::Ambiguous {
                fragment,
                candidates,
            } => Error::ambiguous(
                fragment,
                candidates
                    .iter()
                    .map(|&id| world.name(id).to_string())
                    .collect(),
            ),
            Self::InvalidIdentifier { fragment } => {
                Error::refused(format!("There is no object {fragment}."))
            }
        }
    }
}

/// Resolves object references against the world.
pub struct ReferenceResolver;

impl ReferenceResolver {
    /// All best-tier matches for `fragment` in `scope` around `viewpoint`.
    ///
    /// `#<n>` names an object directly. It must still lie within `scope`
    /// unless the scope [accepts any identifier](Scope::accepts_any_identifier).
    /// `priority` only matters for the reachable scopes.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::InvalidIdentifier`] for a bad `#<n>` (or
    /// any non-identifier in [`Scope::Identifier`]) and
    /// [`ReferenceError::NotFound`] when nothing matches, including an
    /// identifier outside the scope.
    pub fn candidates(
        world: &World,
        fragment: &str,
        viewpoint: EntityId,
        scope: Scope,
        priority: Option<Priority>,
    ) -> Result<Vec<EntityId>, ReferenceError> {
        let fragment = fragment.trim();
        let not_found = || ReferenceError::NotFound {
            fragment: fragment.to_string(),
        };

        if fragment.starts_with('#') || scope == Scope::Identifier {
            let id = Self::identifier(world, fragment)?;
            return if scope.accepts_any_identifier() || Self::in_scope(world, id, viewpoint, scope)
            {
                Ok(vec![id])
            } else {
                Err(not_found())
            };
        }
        if fragment.is_empty() {
            return Err(not_found());
        }

        if scope != Scope::Held {
            if fragment.eq_ignore_ascii_case("me") {
                return Ok(vec![viewpoint]);
            }
            if fragment.eq_ignore_ascii_case("here") {
                return world.location(viewpoint).map(|l| vec![l]).ok_or_else(not_found);
            }
        }

        let held = || world.contents(viewpoint);
        let nearby = || {
            world
                .location(viewpoint)
                .map(|room| {
                    let mut things = world.contents(room);
                    things.retain(|&id| id != viewpoint);
                    things
                })
                .unwrap_or_default()
        };

        let found = match scope {
            Scope::Held => Self::best_matches(world, fragment, &held()),
            Scope::Nearby => Self::best_matches(world, fragment, &nearby()),
            Scope::Reachable | Scope::ReachableOrIdentifier => {
                let (held, nearby) = (held(), nearby());
                Self::reachable(world, fragment, &held, &nearby, priority)
            }
            Scope::Identifier => Vec::new(),
        };

        if found.is_empty() {
            Err(not_found())
        } else {
            Ok(found)
        }
    }

    /// Exactly one match, or an error.
    ///
    /// # Errors
    ///
    /// As [`ReferenceResolver::candidates`], plus
    /// [`ReferenceError::Ambiguous`] when several objects tie.
    pub fn resolve_one(
        world: &World,
        fragment: &str,
        viewpoint: EntityId,
        scope: Scope,
        priority: Option<Priority>,
    ) -> Result<EntityId, ReferenceError> {
        let mut found = Self::candidates(world, fragment, viewpoint, scope, priority)?;
        if found.len() == 1 {
            Ok(found.remove(0))
        } else {
            Err(ReferenceError::Ambiguous {
                fragment: fragment.trim().to_string(),
                candidates: found,
            })
        }
    }

    /// The members of `pool` whose names match `fragment` at the best tier
    /// present.
    #[must_use]
    pub fn best_matches(world: &World, fragment: &str, pool: &[EntityId]) -> Vec<EntityId> {
        Self::ranked(world, fragment, pool).map_or_else(Vec::new, |(_, ids)| ids)
    }

    fn ranked(
        world: &World,
        fragment: &str,
        pool: &[EntityId],
    ) -> Option<(MatchTier, Vec<EntityId>)> {
        let tiered: Vec<(MatchTier, EntityId)> = pool
            .iter()
            .filter_map(|&id| MatchTier::of(world.name(id), fragment).map(|tier| (tier, id)))
            .collect();
        let best = tiered.iter().map(|(tier, _)| *tier).max()?;
        let ids = tiered
            .into_iter()
            .filter(|(tier, _)| *tier == best)
            .map(|(_, id)| id)
            .collect();
        Some((best, ids))
    }

    fn reachable(
        world: &World,
        fragment: &str,
        held: &[EntityId],
        nearby: &[EntityId],
        priority: Option<Priority>,
    ) -> Vec<EntityId> {
        match (
            Self::ranked(world, fragment, held),
            Self::ranked(world, fragment, nearby),
        ) {
            (None, None) => Vec::new(),
            (Some((_, ids)), None) | (None, Some((_, ids))) => ids,
            (Some((held_tier, held_ids)), Some((near_tier, near_ids))) => {
                match held_tier.cmp(&near_tier) {
                    std::cmp::Ordering::Greater => held_ids,
                    std::cmp::Ordering::Less => near_ids,
                    std::cmp::Ordering::Equal => match priority {
                        Some(Priority::Inventory) => held_ids,
                        Some(Priority::Room) => near_ids,
                        None => held_ids.into_iter().chain(near_ids).collect(),
                    },
                }
            }
        }
    }

    /// Whether `id` could have been found by name (or as `me`/`here`) in
    /// `scope`.
    fn in_scope(world: &World, id: EntityId, viewpoint: EntityId, scope: Scope) -> bool {
        let here = world.location(viewpoint);
        let held = world.location(id) == Some(viewpoint);
        let nearby = id == viewpoint
            || here == Some(id)
            || (here.is_some() && world.location(id) == here);
        match scope {
            Scope::Held => held,
            Scope::Nearby => nearby,
            Scope::Reachable => held || nearby,
            Scope::ReachableOrIdentifier | Scope::Identifier => true,
        }
    }

    fn identifier(world: &World, fragment: &str) -> Result<EntityId, ReferenceError> {
        fragment
            .parse::<EntityId>()
            .ok()
            .filter(|&id| world.contains(id) && fragment.starts_with('#'))
            .ok_or_else(|| ReferenceError::InvalidIdentifier {
                fragment: fragment.to_string(),
            })
    }
}
