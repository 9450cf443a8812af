//! Integration tests for command resolution

use parley_foundation::{EntityId, ErrorKind};
use parley_parser::{
    CommandDescriptor, CommandRegistry, CommandResolver, Element, Grammar, Resolution, Scope,
};
use parley_storage::World;

use crate::parlor;

fn nothing(_: &World, _: EntityId) -> Grammar {
    Grammar::empty()
}

fn held_thing(_: &World, _: EntityId) -> Grammar {
    Grammar::new().or([Element::object("thing", Scope::Held)])
}

fn guitar(_: &World, _: EntityId) -> Grammar {
    Grammar::new().or([Element::keyword("guitar")])
}

fn exit(_: &World, _: EntityId) -> Grammar {
    Grammar::new().or([Element::object("exit", Scope::Reachable)])
}

fn message(_: &World, _: EntityId) -> Grammar {
    Grammar::new().or([Element::text("message")])
}

fn registry(descriptors: impl IntoIterator<Item = CommandDescriptor>) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for descriptor in descriptors {
        registry.register(descriptor).unwrap();
    }
    registry
}

fn resolved_command(resolution: &Resolution) -> Option<&str> {
    match resolution {
        Resolution::Resolved(candidate) => Some(&candidate.command),
        _ => None,
    }
}

// =============================================================================
// Name Matching
// =============================================================================

#[test]
fn shared_prefixes_are_ambiguous_until_unique() {
    let p = parlor();
    let registry = registry([
        CommandDescriptor::new("poke", nothing),
        CommandDescriptor::new("point", nothing),
    ]);
    let resolver = CommandResolver::new(&registry);

    let Resolution::Ambiguous { candidates, .. } = resolver.resolve_line(&p.world, "po", p.player)
    else {
        panic!("\"po\" should be ambiguous");
    };
    let mut names: Vec<_> = candidates.iter().map(|c| c.command.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, ["point", "poke"]);

    let resolution = resolver.resolve_line(&p.world, "poi", p.player);
    assert_eq!(resolved_command(&resolution), Some("point"));
}

#[test]
fn exact_names_beat_prefixes() {
    let p = parlor();
    let registry = registry([
        CommandDescriptor::new("look", nothing).aliases(["l"]),
        CommandDescriptor::new("lock", nothing),
    ]);
    let resolver = CommandResolver::new(&registry);
    let resolution = resolver.resolve_line(&p.world, "l", p.player);
    assert_eq!(resolved_command(&resolution), Some("look"));
}

#[test]
fn full_name_commands_refuse_prefixes_with_a_hint() {
    let p = parlor();
    let registry = registry([CommandDescriptor::new("sudo", message).require_full_name()]);
    let resolver = CommandResolver::new(&registry);

    let resolution = resolver.resolve_line(&p.world, "sud look", p.player);
    assert!(matches!(resolution, Resolution::NotFound { .. }));
    let err = resolution.into_result().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotFound { .. }));
    assert_eq!(
        err.user_message(),
        "I don't know what you mean by \"sud\". (sudo must be typed in full.)"
    );

    let resolution = resolver.resolve_line(&p.world, "SUDO look", p.player);
    let Resolution::Resolved(candidate) = resolution else {
        panic!("sudo should resolve when typed in full");
    };
    assert_eq!(candidate.arguments, "look");
}

#[test]
fn unknown_words_are_not_found() {
    let p = parlor();
    let registry = registry([CommandDescriptor::new("look", nothing)]);
    let err = CommandResolver::new(&registry)
        .resolve_line(&p.world, "dance wildly", p.player)
        .into_result()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotFound { .. }));
}

// =============================================================================
// Zero-Space Names
// =============================================================================

#[test]
fn zero_space_names_need_no_separator() {
    let p = parlor();
    let registry = registry([
        CommandDescriptor::new("say", message).nospace(["'", "\""]),
        CommandDescriptor::new("emote", message).nospace([":"]),
    ]);
    let resolver = CommandResolver::new(&registry);

    let Resolution::Resolved(said) = resolver.resolve_line(&p.world, "'hello", p.player) else {
        panic!("' should resolve to say");
    };
    assert_eq!((said.command.as_str(), said.arguments.as_str()), ("say", "hello"));

    let Resolution::Resolved(posed) = resolver.resolve_line(&p.world, ":waves.", p.player) else {
        panic!(": should resolve to emote");
    };
    assert_eq!((posed.command.as_str(), posed.arguments.as_str()), ("emote", "waves."));
}

#[test]
fn clashing_zero_space_names_are_ambiguous() {
    let p = parlor();
    let registry = registry([
        CommandDescriptor::new("emote", message).nospace([":"]),
        CommandDescriptor::new("think", message).nospace([":"]),
    ]);
    let resolution = CommandResolver::new(&registry).resolve_line(&p.world, ":ponders", p.player);
    assert!(matches!(resolution, Resolution::Ambiguous { .. }));
}

// =============================================================================
// Exits
// =============================================================================

#[test]
fn exit_names_resolve_to_the_exit_command() {
    let p = parlor();
    let mut registry = registry([CommandDescriptor::new("go", exit)]);
    registry.set_exit_command("go").unwrap();
    let resolver = CommandResolver::new(&registry);

    for typed in ["west", "WE"] {
        let Resolution::Resolved(candidate) = resolver.resolve_line(&p.world, typed, p.player)
        else {
            panic!("{typed} should resolve");
        };
        assert_eq!(candidate.command, "go");
        assert_eq!(candidate.arguments, p.world.name(p.west));
    }
}

#[test]
fn command_names_shadow_exits() {
    let p = parlor();
    let mut registry = registry([
        CommandDescriptor::new("go", exit),
        CommandDescriptor::new("wear", held_thing),
    ]);
    registry.set_exit_command("go").unwrap();
    let resolution = CommandResolver::new(&registry).resolve_line(&p.world, "we", p.player);
    assert_eq!(resolved_command(&resolution), Some("wear"));
}

// =============================================================================
// Trial Parsing
// =============================================================================

#[test]
fn trial_parse_drops_candidates_that_cannot_fit() {
    let p = parlor();
    let registry = registry([
        CommandDescriptor::new("stroke", held_thing),
        CommandDescriptor::new("strum", guitar),
    ]);
    let resolver = CommandResolver::new(&registry);

    let resolution = resolver.resolve_line(&p.world, "str cat", p.player);
    assert_eq!(resolved_command(&resolution), Some("stroke"));
}

#[test]
fn trial_parse_keeps_candidates_with_missing_objects() {
    let p = parlor();
    let registry = registry([
        CommandDescriptor::new("stroke", held_thing),
        CommandDescriptor::new("strum", guitar),
    ]);
    let resolution = CommandResolver::new(&registry).resolve_line(&p.world, "str dog", p.player);
    assert_eq!(resolved_command(&resolution), Some("stroke"));
}
