//! Whole-session scenarios

use parley_foundation::{EntityId, Value};
use parley_lock::with_authority;
use parley_runtime::{ServerConfig, Session, find_or_create_player, starter_world};

fn session() -> (Session, EntityId) {
    let (world, player) = starter_world(&ServerConfig::default()).unwrap();
    (Session::new(world).unwrap(), player)
}

fn last(session: &Session, player: EntityId) -> String {
    session
        .outbox()
        .last_for(player)
        .unwrap_or_default()
        .to_string()
}

#[test]
fn sudo_scenario() {
    let (mut session, player) = session();
    let neighbor = find_or_create_player(session.world_mut(), "Neighbor").unwrap();

    session.handle_line(neighbor, "create x").unwrap();
    session.handle_line(neighbor, "drop x").unwrap();
    session.handle_line(neighbor, "set x.sudotest=5").unwrap();

    session.handle_line(player, "set x.sudotest=6").unwrap();
    assert_eq!(
        last(&session, player),
        "You don't have permission to set sudotest on x."
    );

    session.handle_line(player, "sudo set x.sudotest=6").unwrap();
    assert_eq!(last(&session, player), "Set x's sudotest attribute to 6");

    let x = session.world().find_all(|e| e.name() == "x")[0];
    let value = with_authority(player, || session.world().read_attribute(x, "sudotest"));
    assert_eq!(value.unwrap(), Value::Int(6));
}

#[test]
fn players_see_each_other_arrive() {
    let (mut session, player) = session();
    let neighbor = find_or_create_player(session.world_mut(), "Neighbor").unwrap();
    session.drain();

    session.handle_line(player, "north").unwrap();
    assert_eq!(last(&session, neighbor), "Player leaves through north.");
    session.handle_line(neighbor, "n").unwrap();
    assert_eq!(last(&session, player), "Neighbor arrives.");
}

#[test]
fn a_garden_tour() {
    let (mut session, player) = session();
    session.handle_line(player, "north").unwrap();
    session.drain();

    session.handle_line(player, "look rattling").unwrap();
    let heard: Vec<String> = session.drain().into_iter().map(|(_, text)| text).collect();
    assert_eq!(heard[0], "The rattling machine rattles, and a samophlange falls out!");
    assert_eq!(heard[1], "rattling machine");

    session.handle_line(player, "take samophlange").unwrap();
    session.handle_line(player, "take crystal").unwrap();
    assert_eq!(last(&session, player), "You can't take the crystal!");
    session.handle_line(player, "take statue").unwrap();
    assert_eq!(last(&session, player), "You can't take the statue!");

    session.handle_line(player, "inventory").unwrap();
    assert_eq!(last(&session, player), "You are carrying: hat, samophlange.");
}

#[test]
fn failed_commands_leave_the_world_alone() {
    let (mut session, player) = session();
    let before = session.world().clone();
    for line in ["take moon", "give frog to me", "go up", "destroy frog", "set frog.name='toad'"] {
        session.handle_line(player, line).unwrap();
    }
    assert_eq!(session.world().len(), before.len());
    let frog = session.world().find_all(|e| e.name() == "frog")[0];
    assert_eq!(session.world().location(frog), before.location(frog));
}

#[test]
fn equipment_follows_its_holder() {
    let (mut session, player) = session();
    let hat = session.world().find_all(|e| e.name() == "hat")[0];
    session.handle_line(player, "wear hat").unwrap();
    session.handle_line(player, "north").unwrap();
    assert_eq!(session.world().location(hat), Some(player));
    assert!(session.world().is_equipped(hat));

    let neighbor = find_or_create_player(session.world_mut(), "Neighbor").unwrap();
    session.handle_line(player, "south").unwrap();
    session.handle_line(player, "give hat to neighbor").unwrap();
    assert_eq!(session.world().location(hat), Some(neighbor));
    assert!(!session.world().is_equipped(hat));
    session.handle_line(neighbor, "wear hat").unwrap();
    assert_eq!(session.world().wearer(hat), Some(neighbor));
}
