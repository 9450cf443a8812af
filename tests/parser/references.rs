//! Integration tests for object references

use parley_parser::{Priority, ReferenceError, ReferenceResolver, Scope};

use crate::parlor;

#[test]
fn scopes_separate_the_cats() {
    let p = parlor();
    let held = ReferenceResolver::resolve_one(&p.world, "cat", p.player, Scope::Held, None);
    assert_eq!(held, Ok(p.held_cat));
    let nearby = ReferenceResolver::resolve_one(&p.world, "cat", p.player, Scope::Nearby, None);
    assert_eq!(nearby, Ok(p.room_cat));
}

#[test]
fn reachable_cats_tie_without_priority() {
    let p = parlor();
    let err = ReferenceResolver::resolve_one(&p.world, "cat", p.player, Scope::Reachable, None)
        .unwrap_err();
    let ReferenceError::Ambiguous { candidates, .. } = err else {
        panic!("expected ambiguity, got {err:?}");
    };
    assert_eq!(candidates.len(), 2);
}

#[test]
fn priority_breaks_ties() {
    let p = parlor();
    let room = ReferenceResolver::resolve_one(
        &p.world,
        "cat",
        p.player,
        Scope::Reachable,
        Some(Priority::Room),
    );
    assert_eq!(room, Ok(p.room_cat));
    let held = ReferenceResolver::resolve_one(
        &p.world,
        "cat",
        p.player,
        Scope::Reachable,
        Some(Priority::Inventory),
    );
    assert_eq!(held, Ok(p.held_cat));
}

#[test]
fn word_prefixes_find_multiword_names() {
    let p = parlor();
    for fragment in ["brass lamp", "BRASS", "bra", "lam"] {
        let found = ReferenceResolver::resolve_one(&p.world, fragment, p.player, Scope::Nearby, None);
        assert_eq!(found, Ok(p.lamp), "{fragment}");
    }
}

#[test]
fn me_and_here() {
    let p = parlor();
    let me = ReferenceResolver::resolve_one(&p.world, "me", p.player, Scope::Nearby, None);
    assert_eq!(me, Ok(p.player));
    let here = ReferenceResolver::resolve_one(&p.world, "here", p.player, Scope::Reachable, None);
    assert_eq!(here, Ok(p.parlor));
    let held = ReferenceResolver::candidates(&p.world, "me", p.player, Scope::Held, None);
    assert!(matches!(held, Err(ReferenceError::NotFound { .. })));
}

#[test]
fn identifiers_respect_the_scope() {
    let p = parlor();
    let west = format!("{}", p.west);
    let held = ReferenceResolver::candidates(&p.world, &west, p.player, Scope::Held, None);
    assert!(matches!(held, Err(ReferenceError::NotFound { .. })));
    let nearby = ReferenceResolver::resolve_one(&p.world, &west, p.player, Scope::Nearby, None);
    assert_eq!(nearby, Ok(p.west));

    let cat = format!("{}", p.held_cat);
    let found = ReferenceResolver::resolve_one(&p.world, &cat, p.player, Scope::Held, None);
    assert_eq!(found, Ok(p.held_cat));
    let nearby = ReferenceResolver::candidates(&p.world, &cat, p.player, Scope::Nearby, None);
    assert!(matches!(nearby, Err(ReferenceError::NotFound { .. })));

    let study = p.world.get(p.west).unwrap().destination().unwrap();
    let fragment = format!("{study}");
    let reachable =
        ReferenceResolver::candidates(&p.world, &fragment, p.player, Scope::Reachable, None);
    assert!(matches!(reachable, Err(ReferenceError::NotFound { .. })));
    let anywhere = ReferenceResolver::resolve_one(
        &p.world,
        &fragment,
        p.player,
        Scope::ReachableOrIdentifier,
        None,
    );
    assert_eq!(anywhere, Ok(study));

    let missing = ReferenceResolver::candidates(&p.world, "#999", p.player, Scope::Reachable, None);
    assert!(matches!(missing, Err(ReferenceError::InvalidIdentifier { .. })));
    let bare = ReferenceResolver::candidates(&p.world, "lamp", p.player, Scope::Identifier, None);
    assert!(matches!(bare, Err(ReferenceError::InvalidIdentifier { .. })));
}

#[test]
fn errors_become_player_messages() {
    let p = parlor();
    let err = ReferenceResolver::resolve_one(&p.world, "cat", p.player, Scope::Reachable, None)
        .unwrap_err()
        .into_error(&p.world);
    assert_eq!(err.user_message(), "Which one do you mean? (cat, cat)");

    let err = ReferenceResolver::resolve_one(&p.world, "dog", p.player, Scope::Reachable, None)
        .unwrap_err()
        .into_error(&p.world);
    assert_eq!(err.user_message(), "I don't know what you mean by \"dog\".");
}
