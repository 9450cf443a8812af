//! Integration tests for the standard commands

use parley_engine::player_message;
use parley_foundation::ErrorKind;

use crate::Town;

// =============================================================================
// Items
// =============================================================================

#[test]
fn take_give_and_drop() {
    let mut town = Town::new();

    town.run("get apple").unwrap();
    assert_eq!(town.world.location(town.apple), Some(town.ada));
    assert_eq!(town.heard_by(town.bob), ["Ada takes apple."]);

    town.run("give apple to bob").unwrap();
    assert_eq!(town.world.location(town.apple), Some(town.bob));
    assert_eq!(town.heard_by(town.bob).last(), Some(&"Ada gives you apple."));

    town.run_as(town.bob, "drop apple").unwrap();
    assert_eq!(town.world.location(town.apple), Some(town.square));
    assert_eq!(town.outbox.last_for(town.ada), Some("Bob drops apple."));
}

#[test]
fn identifiers_cannot_reach_into_other_inventories() {
    let mut town = Town::new();
    town.run_as(town.bob, "take apple").unwrap();
    town.outbox.clear();

    let apple = town.apple;
    let err = town.run(&format!("take {apple}")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotFound { .. }));
    assert_eq!(town.world.location(apple), Some(town.bob));
    assert!(town.heard_by(town.bob).is_empty());
}

#[test]
fn identifiers_cannot_reach_into_other_rooms() {
    let mut town = Town::new();
    town.run_as(town.bob, "east").unwrap();
    let pear = parley_lock::with_authority(parley_lock::Authority::System, || {
        town.world
            .spawn(parley_storage::EntityKind::Thing, "pear", Some(town.market))
            .unwrap()
    });

    for line in [format!("take {pear}"), format!("drop {pear}"), format!("give {pear} to bob")] {
        let err = town.run(&line).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NotFound { .. }), "{line}");
    }
    assert_eq!(town.world.location(pear), Some(town.market));

    town.run(&format!("look {pear}")).unwrap();
    assert_eq!(town.outbox.last_for(town.ada), Some("pear"));
}

#[test]
fn rooms_and_players_cannot_be_taken() {
    let mut town = Town::new();
    let err = town.run("take bob").unwrap_err();
    assert_eq!(err.user_message(), "You can't take Bob.");
    let err = town.run("take east").unwrap_err();
    assert_eq!(err.user_message(), "You can't take east.");
}

#[test]
fn equipment_round_trip() {
    let mut town = Town::new();
    town.run("create scarf").unwrap();
    let scarf = town.world.find_all(|e| e.name() == "scarf")[0];
    parley_lock::with_authority(town.ada, || town.world.make_equipment(scarf)).unwrap();

    town.run("wear scarf").unwrap();
    assert_eq!(town.world.wearer(scarf), Some(town.ada));
    town.run("equip").unwrap();
    assert_eq!(town.outbox.last_for(town.ada), Some("Equipped: scarf."));

    town.run("drop scarf").unwrap();
    assert_eq!(town.outbox.last_for(town.ada), Some("You unequip and drop scarf."));
    assert!(!town.world.is_equipped(scarf));

    let err = town.run("take scarf").and_then(|()| town.run("remove scarf")).unwrap_err();
    assert_eq!(err.user_message(), "That isn't equipped!");
}

// =============================================================================
// Movement and Perception
// =============================================================================

#[test]
fn walking_between_rooms() {
    let mut town = Town::new();
    town.run("go east").unwrap();
    assert_eq!(town.world.location(town.ada), Some(town.market));
    assert_eq!(town.heard_by(town.bob), ["Ada leaves through east."]);
    assert_eq!(town.heard_by(town.ada)[0], "Market");

    town.outbox.clear();
    town.run("west").unwrap();
    assert_eq!(town.world.location(town.ada), Some(town.square));
    assert_eq!(town.heard_by(town.bob), ["Ada arrives."]);
}

#[test]
fn looking_around() {
    let mut town = Town::new();
    town.run("look").unwrap();
    assert_eq!(
        town.heard_by(town.ada),
        ["Square", "Players here: Bob.", "Contents: apple.", "Exits: east."]
    );

    town.outbox.clear();
    assert_eq!(town.world.exits_at(town.square), [town.east]);
    town.run("l east").unwrap();
    assert_eq!(town.heard_by(town.ada), ["east", "Destination: Market"]);
}

#[test]
fn inventory_lists_what_is_carried() {
    let mut town = Town::new();
    town.run("i").unwrap();
    assert_eq!(town.outbox.last_for(town.ada), Some("You are not carrying anything."));
    town.run("take apple").unwrap();
    town.run("inventory").unwrap();
    assert_eq!(town.outbox.last_for(town.ada), Some("You are carrying: apple."));
}

// =============================================================================
// Talking
// =============================================================================

#[test]
fn speech_and_poses() {
    let mut town = Town::new();
    town.run("'nice day").unwrap();
    assert_eq!(town.outbox.last_for(town.ada), Some("You say, \"nice day\""));
    assert_eq!(town.outbox.last_for(town.bob), Some("Ada says, \"nice day\""));

    town.run(":waves.").unwrap();
    assert_eq!(town.outbox.last_for(town.ada), Some("Ada waves."));
    assert_eq!(town.outbox.last_for(town.bob), Some("Ada waves."));

    town.run(";'s hat flaps.").unwrap();
    assert_eq!(town.outbox.last_for(town.bob), Some("Ada's hat flaps."));
}

// =============================================================================
// Building
// =============================================================================

#[test]
fn builders_own_what_they_make() {
    let mut town = Town::new();
    town.run("create lantern").unwrap();
    let lantern = town.world.find_all(|e| e.name() == "lantern")[0];
    assert_eq!(town.world.location(lantern), Some(town.ada));

    town.run("set lantern.lit=1").unwrap();
    let err = town.run_as(town.bob, &format!("set {lantern}.lit=0")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AccessDenied { .. }));
    assert_eq!(
        player_message(&town.world, &err),
        "You don't have permission to set lit on lantern."
    );

    let err = town.run_as(town.bob, &format!("destroy {lantern}")).unwrap_err();
    assert_eq!(err.user_message(), "You cannot destroy lantern.");
    assert!(town.world.contains(lantern));
    town.run("destroy lantern").unwrap();
    assert!(!town.world.contains(lantern));
}

#[test]
fn sudo_overrides_ownership() {
    let mut town = Town::new();
    let err = town.run("set here.name='Plaza'").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AccessDenied { .. }));

    town.run("sudo set here.name='Plaza'").unwrap();
    assert_eq!(town.world.name(town.square), "Plaza");
    assert_eq!(town.outbox.last_for(town.ada), Some("Set Plaza's name attribute to Plaza"));
}
