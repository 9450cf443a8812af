//! Integration tests for scripted event handlers firing through commands

use parley_engine::scripts;
use parley_foundation::ErrorKind;
use parley_lock::{Authority, with_authority};
use parley_storage::{Effect, EntityKind, EventHandler};

use crate::Town;

// =============================================================================
// Vetoes
// =============================================================================

#[test]
fn cursed_destination_blocks_movement() {
    let mut town = Town::new();
    town.script(town.market, "go", scripts::disrupt());

    let err = town.run("east").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Cancelled(_)));
    assert_eq!(err.user_message(), "You can't go through the Market!");
    assert_eq!(town.world.location(town.ada), Some(town.square));
    assert_eq!(town.heard_by(town.ada), ["The Market is cursed!"]);
    assert!(town.heard_by(town.bob).is_empty());
}

#[test]
fn a_cursed_player_cannot_take_anything() {
    let mut town = Town::new();
    town.script(town.ada, "get", scripts::disrupt());
    let err = town.run("take apple").unwrap_err();
    assert_eq!(err.user_message(), "You can't take anything.");
    assert_eq!(town.world.location(town.apple), Some(town.square));
}

#[test]
fn the_player_is_asked_before_the_object() {
    let mut town = Town::new();
    town.script(town.ada, "get", EventHandler::notice().sending("You reach out.").disruptive());
    town.script(town.apple, "get", scripts::explode());

    town.run("take apple").unwrap_err();
    assert!(town.world.contains(town.apple));
    assert_eq!(town.heard_by(town.ada), ["You reach out."]);
}

#[test]
fn exempt_players_are_not_stopped() {
    let mut town = Town::new();
    town.script(town.apple, "get", scripts::disrupt().exempting(town.ada));

    town.run("take apple").unwrap();
    assert_eq!(town.world.location(town.apple), Some(town.ada));

    town.run("drop apple").unwrap();
    let err = town.run_as(town.bob, "take apple").unwrap_err();
    assert_eq!(err.user_message(), "You can't take the apple!");
}

// =============================================================================
// Effects
// =============================================================================

#[test]
fn absorbed_objects_vanish_with_notices() {
    let mut town = Town::new();
    town.script(town.apple, "get", scripts::absorb());

    let err = town.run("take apple").unwrap_err();
    assert_eq!(err.user_message(), "You can't take the apple!");
    assert!(!town.world.contains(town.apple));
    assert_eq!(
        town.heard_by(town.ada),
        ["The apple glows bright, and absorbs into you!"]
    );
    assert_eq!(
        town.heard_by(town.bob),
        ["The apple glows briefly, and absorbs into Ada."]
    );
}

#[test]
fn public_notices_reach_the_player_too() {
    let mut town = Town::new();
    town.script(town.apple, "get", scripts::disintegrate());
    town.run("take apple").unwrap_err();
    assert_eq!(town.heard_by(town.ada), ["The apple disintegrates!"]);
    assert_eq!(town.heard_by(town.bob), ["The apple disintegrates!"]);
}

#[test]
fn trapped_exits_send_players_home() {
    let mut town = Town::new();
    town.run("east").unwrap();
    let west = town.world.exits_at(town.market)[0];
    town.script(west, "go", scripts::teleport_to_start());
    let home = with_authority(Authority::System, || {
        let home = town.world.spawn(EntityKind::Room, "Home", None)?;
        town.world.set_start(home)?;
        Ok::<_, parley_foundation::Error>(home)
    })
    .unwrap();
    town.outbox.clear();

    let err = town.run("west").unwrap_err();
    assert_eq!(err.user_message(), "You can't go through the west!");
    assert_eq!(town.world.location(town.ada), Some(home));
    assert!(town.heard_by(town.ada)[0].starts_with("A searing white flash"));
}

#[test]
fn rattling_machines_make_samophlanges() {
    let mut town = Town::new();
    town.script(town.apple, "look", scripts::create_samophlange());

    town.run("look apple").unwrap();
    let made = town.world.find_all(|e| e.name() == "samophlange");
    assert_eq!(made.len(), 1);
    assert_eq!(town.world.location(made[0]), Some(town.square));
    assert_eq!(town.world.get(made[0]).unwrap().owner, Some(town.ada));
    assert_eq!(
        town.heard_by(town.bob),
        ["The apple rattles, and a samophlange falls out!"]
    );
    assert!(town.heard_by(town.ada).contains(&"apple"));
}

#[test]
fn attribute_effects_run_as_the_server() {
    let mut town = Town::new();
    town.script(
        town.apple,
        "get",
        EventHandler::new(Effect::SetAttribute {
            name: "bruised".into(),
            value: true.into(),
        }),
    );
    town.run("take apple").unwrap();
    let entity = town.world.get(town.apple).unwrap();
    assert!(entity.has_attribute("bruised"));
    assert_eq!(entity.guard("bruised").unwrap().owner, None);
}
