//! Looking around.

use parley_foundation::{EntityId, ErrorKind, Result};
use parley_parser::{Arguments, CommandDescriptor, Element, Grammar};
use parley_storage::{DESCRIPTION, World};

use super::{list, no_arguments};
use crate::cascade::checkpoint;
use crate::command::{Command, CommandContext};

/// `look [object]`: describe an object, or the room.
pub struct Look;

fn look_grammar(_: &World, _: EntityId) -> Grammar {
    Grammar::empty().or([Element::object_or_id("obj")])
}

impl Command for Look {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("look", look_grammar).aliases(["l"])
    }

    fn usage(&self) -> &'static str {
        "look [object]"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let target = match args.object("obj") {
            Some(obj) => {
                checkpoint(ctx, "look at", &["look"], &[obj])?;
                obj
            }
            None => ctx.location()?,
        };
        describe(ctx, target)
    }
}

/// Sends the acting player everything they can see of `target`.
///
/// The name and description come first, followed by whichever of the
/// players, contents, worn equipment and exits are non-empty.
///
/// # Errors
///
/// Fails only if `target` does not exist or a read hits a missing
/// authority.
pub fn describe(ctx: &mut CommandContext<'_>, target: EntityId) -> Result<()> {
    let entity = ctx.world.get(target)?;
    let name = entity.name().to_string();
    let destination = entity.destination();
    ctx.send(name);

    match ctx.world.read_attribute(target, DESCRIPTION) {
        Ok(description) => ctx.send(description.to_string()),
        Err(e)
            if matches!(
                e.kind,
                ErrorKind::AccessDenied { .. } | ErrorKind::AttributeNotFound { .. }
            ) => {}
        Err(e) => return Err(e),
    }

    let viewer = ctx.player;
    let world: &World = ctx.world;
    let contents = world.contents(target);
    let mut players = Vec::new();
    let mut things = Vec::new();
    let mut worn = Vec::new();
    for id in contents {
        let Ok(entity) = world.get(id) else { continue };
        if entity.is_exit() {
            continue;
        } else if entity.is_player() {
            if id != viewer {
                players.push(id);
            }
        } else if world.is_equipped(id) {
            worn.push(id);
        } else {
            things.push(id);
        }
    }
    let exits = world.exits_at(target);

    let mut lines = Vec::new();
    if !players.is_empty() {
        lines.push(format!("Players here: {}.", list(world, &players)));
    }
    if !things.is_empty() {
        lines.push(format!("Contents: {}.", list(world, &things)));
    }
    if !worn.is_empty() {
        lines.push(format!("Equipped: {}.", list(world, &worn)));
    }
    if !exits.is_empty() {
        lines.push(format!("Exits: {}.", list(world, &exits)));
    }
    if let Some(destination) = destination {
        lines.push(format!("Destination: {}", world.name(destination)));
    }

    for line in lines {
        ctx.send(line);
    }
    Ok(())
}

/// `inventory`: list what you are carrying.
pub struct Inventory;

impl Command for Inventory {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("inventory", no_arguments).aliases(["i"])
    }

    fn usage(&self) -> &'static str {
        "inventory"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _: &Arguments) -> Result<()> {
        let held = ctx.world.contents(ctx.player);
        let text = if held.is_empty() {
            "You are not carrying anything.".to_string()
        } else {
            format!("You are carrying: {}.", list(ctx.world, &held))
        };
        ctx.send(text);
        Ok(())
    }
}
