//! The world a fresh server starts with.

use parley_engine::scripts;
use parley_foundation::{EntityId, Result};
use parley_lock::{Authority, with_authority};
use parley_storage::{DESCRIPTION, EntityKind, World};
use tracing::info;

/// Builds a small world around the configured starting room and puts the
/// local player in it.
///
/// The player starts with a hat they own. The rest is server-owned, and a
/// few objects carry stock scripts to show off the event system.
///
/// # Errors
///
/// Fails only on unusable configured names.
pub fn starter_world(config: &crate::ServerConfig) -> Result<(World, EntityId)> {
    let mut world = World::new();

    let player = with_authority(Authority::System, || -> Result<EntityId> {
        let lobby = world.spawn(EntityKind::Room, &config.start_room, None)?;
        world.write_attribute(
            lobby,
            DESCRIPTION,
            "A quiet room with a worn rug. A garden lies to the north.",
        )?;
        world.set_start(lobby)?;

        let garden = world.spawn(EntityKind::Room, "Garden", None)?;
        world.write_attribute(garden, DESCRIPTION, "Overgrown beds surround a dry fountain.")?;
        world.spawn(EntityKind::Exit { destination: garden }, "north", Some(lobby))?;
        world.spawn(EntityKind::Exit { destination: lobby }, "south", Some(garden))?;

        world.spawn(EntityKind::Thing, "frog", Some(lobby))?;
        let crystal = world.spawn(EntityKind::Thing, "crystal", Some(garden))?;
        world.set_handler(crystal, "get", scripts::absorb())?;
        let statue = world.spawn(EntityKind::Thing, "statue", Some(garden))?;
        world.set_handler(statue, "get", scripts::disrupt())?;
        let machine = world.spawn(EntityKind::Thing, "rattling machine", Some(garden))?;
        world.set_handler(machine, "look", scripts::create_samophlange())?;

        world.spawn(EntityKind::Player, &config.player_name, Some(lobby))
    })?;

    with_authority(player, || -> Result<()> {
        let hat = world.spawn(EntityKind::Thing, "hat", Some(player))?;
        world.make_equipment(hat)
    })?;

    info!(entities = world.len(), "built starter world");
    Ok((world, player))
}

/// Finds the player called `name`, or creates one in the starting room.
///
/// # Errors
///
/// Returns a refusal if the player must be created but the world has no
/// starting room.
pub fn find_or_create_player(world: &mut World, name: &str) -> Result<EntityId> {
    if let Some(&player) = world
        .find_all(|e| e.is_player() && e.name().eq_ignore_ascii_case(name))
        .first()
    {
        return Ok(player);
    }
    let start = world
        .start()
        .ok_or_else(|| parley_foundation::Error::refused("This world has no starting room."))?;
    with_authority(Authority::System, || {
        world.spawn(EntityKind::Player, name, Some(start))
    })
}
