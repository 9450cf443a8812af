//! Integration tests for wearable equipment

use parley_foundation::{EntityId, ErrorKind};
use parley_lock::{Authority, with_authority};
use parley_storage::{EntityKind, World};

struct Fixture {
    world: World,
    room: EntityId,
    alice: EntityId,
    bob: EntityId,
    hat: EntityId,
}

/// Alice holds a hat she made.
fn fixture() -> Fixture {
    let mut world = World::new();
    let (room, alice, bob) = with_authority(Authority::System, || {
        let room = world.spawn(EntityKind::Room, "Closet", None).unwrap();
        let alice = world.spawn(EntityKind::Player, "Alice", Some(room)).unwrap();
        let bob = world.spawn(EntityKind::Player, "Bob", Some(room)).unwrap();
        (room, alice, bob)
    });
    let hat = with_authority(alice, || {
        let hat = world.spawn(EntityKind::Thing, "hat", Some(alice))?;
        world.make_equipment(hat)?;
        Ok::<_, parley_foundation::Error>(hat)
    })
    .unwrap();
    Fixture {
        world,
        room,
        alice,
        bob,
        hat,
    }
}

#[test]
fn holder_equips_and_is_recorded_as_wearer() {
    let mut f = fixture();
    with_authority(f.alice, || f.world.equip(f.hat)).unwrap();
    assert!(f.world.is_equipped(f.hat));
    assert_eq!(f.world.wearer(f.hat), Some(f.alice));

    with_authority(f.alice, || f.world.unequip(f.hat)).unwrap();
    assert!(!f.world.is_equipped(f.hat));
    assert_eq!(f.world.wearer(f.hat), None);
}

#[test]
fn only_the_holder_can_equip() {
    let mut f = fixture();
    let err = with_authority(f.bob, || f.world.equip(f.hat)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AccessDenied { .. }));
    assert!(!f.world.is_equipped(f.hat));
}

#[test]
fn equip_then_relocate_clears_the_flag() {
    let mut f = fixture();
    with_authority(f.alice, || f.world.equip(f.hat)).unwrap();

    with_authority(f.alice, || f.world.relocate(f.hat, Some(f.bob))).unwrap();
    assert!(!f.world.is_equipped(f.hat));
    assert_eq!(f.world.wearer(f.hat), None);

    with_authority(f.bob, || f.world.equip(f.hat)).unwrap();
    assert_eq!(f.world.wearer(f.hat), Some(f.bob));
}

#[test]
fn dropped_equipment_is_not_worn_by_the_room() {
    let mut f = fixture();
    with_authority(f.alice, || f.world.equip(f.hat)).unwrap();
    with_authority(f.alice, || f.world.relocate(f.hat, Some(f.room))).unwrap();
    assert_eq!(f.world.location(f.hat), Some(f.room));
    assert!(!f.world.is_equipped(f.hat));
}

#[test]
fn refusals_for_the_wrong_state() {
    let mut f = fixture();
    let rock = with_authority(f.alice, || f.world.spawn(EntityKind::Thing, "rock", Some(f.alice)))
        .unwrap();

    let err = with_authority(f.alice, || f.world.equip(rock)).unwrap_err();
    assert_eq!(err.user_message(), "That is not equipment!");
    let err = with_authority(f.alice, || f.world.unequip(f.hat)).unwrap_err();
    assert_eq!(err.user_message(), "That isn't equipped!");

    with_authority(f.alice, || f.world.equip(f.hat)).unwrap();
    let err = with_authority(f.alice, || f.world.equip(f.hat)).unwrap_err();
    assert_eq!(err.user_message(), "That is already equipped!");
}

#[test]
fn only_owners_make_equipment() {
    let mut f = fixture();
    let rock = with_authority(f.alice, || f.world.spawn(EntityKind::Thing, "rock", Some(f.bob)))
        .unwrap();
    let err = with_authority(f.bob, || f.world.make_equipment(rock)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AccessDenied { .. }));
    assert!(!f.world.is_equipment(rock));
}
