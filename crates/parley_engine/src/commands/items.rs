//! Picking things up, putting them down, and wearing them.

use parley_foundation::{EntityId, Error, Result};
use parley_parser::{Arguments, CommandDescriptor, Element, Grammar, Priority, Scope};
use parley_storage::{EntityKind, World};

use super::{list, object};
use crate::cascade::checkpoint;
use crate::command::{Command, CommandContext};

/// `take <item>`: pick up something lying where you stand.
pub struct Take;

fn take_grammar(_: &World, _: EntityId) -> Grammar {
    Grammar::new().or([Element::object_preferring(
        "item",
        Scope::Reachable,
        Priority::Room,
    )])
}

impl Command for Take {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("take", take_grammar).aliases(["get"])
    }

    fn usage(&self) -> &'static str {
        "take <item>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let item = object(args, "item")?;
        let player = ctx.player;
        let name = ctx.name(item);

        if ctx.world.location(item) == Some(player) {
            return Err(Error::refused(format!("You already have {name}.")));
        }
        if !matches!(ctx.world.get(item)?.kind, EntityKind::Thing) {
            return Err(Error::refused(format!("You can't take {name}.")));
        }
        if ctx.world.is_equipped(item) {
            return Err(Error::refused("You can't, it's equipped."));
        }

        checkpoint(ctx, "take", &["get"], &[player, item])?;
        ctx.world.relocate(item, Some(player))?;

        let player_name = ctx.name(player);
        ctx.send(format!("You take {name}."));
        ctx.emit(format!("{player_name} takes {name}."), &[player]);
        Ok(())
    }
}

/// `drop <item>`: put something you carry down where you stand.
pub struct Drop;

fn drop_grammar(_: &World, _: EntityId) -> Grammar {
    Grammar::new().or([Element::objects("items", Scope::Held)])
}

impl Drop {
    /// Among equally good matches, something not being worn is the one
    /// meant.
    fn choose(world: &World, items: &[EntityId]) -> Result<EntityId> {
        let (equipped, unequipped): (Vec<EntityId>, Vec<EntityId>) =
            items.iter().partition(|&&id| world.is_equipped(id));
        match (unequipped.as_slice(), equipped.as_slice()) {
            ([item], _) | ([], [item]) => Ok(*item),
            ([], ids) | (ids, _) => Err(Error::ambiguous(
                "",
                ids.iter().map(|&id| world.name(id).to_string()).collect(),
            )),
        }
    }
}

impl Command for Drop {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("drop", drop_grammar)
    }

    fn usage(&self) -> &'static str {
        "drop <item>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let item = Self::choose(ctx.world, args.objects("items"))?;
        let player = ctx.player;
        let room = ctx.location()?;
        let name = ctx.name(item);
        let was_equipped = ctx.world.is_equipped(item);

        checkpoint(ctx, "drop", &["drop"], &[player, item, room])?;
        ctx.world.relocate(item, Some(room))?;

        let player_name = ctx.name(player);
        if was_equipped {
            ctx.send(format!("You unequip and drop {name}."));
            ctx.emit(format!("{player_name} unequips and drops {name}."), &[player]);
        } else {
            ctx.send(format!("You drop {name}."));
            ctx.emit(format!("{player_name} drops {name}."), &[player]);
        }
        Ok(())
    }
}

/// `give <item> to <someone>`, `give <someone> <item>`, or
/// `put <item> in <container>`.
pub struct Give;

fn give_grammar(_: &World, _: EntityId) -> Grammar {
    let item = || Element::object("item", Scope::Held);
    let destination = || Element::object("destination", Scope::Nearby);
    Grammar::new()
        .or([item(), Element::keyword("to"), destination()])
        .or([destination(), item()])
        .or([item(), Element::keyword("in"), destination()])
}

impl Command for Give {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("give", give_grammar).aliases(["put"])
    }

    fn usage(&self) -> &'static str {
        "give <item> to <player>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let item = object(args, "item")?;
        let destination = object(args, "destination")?;
        let player = ctx.player;
        let name = ctx.name(item);

        if destination == player {
            return Err(Error::refused(format!("You already have {name}.")));
        }

        checkpoint(ctx, "give", &["give"], &[player, item, destination])?;
        ctx.world.relocate(item, Some(destination))?;

        let player_name = ctx.name(player);
        let destination_name = ctx.name(destination);
        if ctx.world.get(destination)?.is_player() {
            ctx.send(format!("You give {name} to {destination_name}."));
            ctx.send_to(destination, format!("{player_name} gives you {name}."));
            ctx.emit(
                format!("{player_name} gives {name} to {destination_name}."),
                &[player, destination],
            );
        } else {
            ctx.send(format!("You put {name} in {destination_name}."));
            ctx.emit(
                format!("{player_name} puts {name} in {destination_name}."),
                &[player],
            );
        }
        Ok(())
    }
}

/// `equip <item>`, or plain `equip` to see what you are wearing.
pub struct Equip;

fn equip_grammar(_: &World, _: EntityId) -> Grammar {
    Grammar::empty().or([Element::object("item", Scope::Held)])
}

impl Command for Equip {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("equip", equip_grammar).aliases(["wear", "don"])
    }

    fn usage(&self) -> &'static str {
        "equip <item>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let player = ctx.player;
        let Some(item) = args.object("item") else {
            let worn: Vec<EntityId> = ctx
                .world
                .contents(player)
                .into_iter()
                .filter(|&id| ctx.world.is_equipped(id))
                .collect();
            let text = if worn.is_empty() {
                "You have nothing equipped.".to_string()
            } else {
                format!("Equipped: {}.", list(ctx.world, &worn))
            };
            ctx.send(text);
            return Ok(());
        };

        if !ctx.world.is_equipment(item) {
            return Err(Error::refused("That is not equipment!"));
        }
        if ctx.world.is_equipped(item) {
            return Err(Error::refused("That is already equipped!"));
        }

        checkpoint(ctx, "equip", &["equip"], &[player, item])?;
        ctx.world.equip(item)?;

        let name = ctx.name(item);
        let player_name = ctx.name(player);
        ctx.send(format!("You equip {name}."));
        ctx.emit(format!("{player_name} equips {name}."), &[player]);
        Ok(())
    }
}

/// `unequip <item>`: take off something you are wearing.
pub struct Unequip;

fn unequip_grammar(_: &World, _: EntityId) -> Grammar {
    Grammar::new().or([Element::object("item", Scope::Held)])
}

impl Command for Unequip {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("unequip", unequip_grammar).aliases(["remove", "doff"])
    }

    fn usage(&self) -> &'static str {
        "unequip <item>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let item = object(args, "item")?;
        let player = ctx.player;

        if !ctx.world.is_equipment(item) {
            return Err(Error::refused("That is not equipment!"));
        }
        if !ctx.world.is_equipped(item) {
            return Err(Error::refused("That isn't equipped!"));
        }

        checkpoint(ctx, "unequip", &["unequip"], &[player, item])?;
        ctx.world.unequip(item)?;

        let name = ctx.name(item);
        let player_name = ctx.name(player);
        ctx.send(format!("You unequip {name}."));
        ctx.emit(format!("{player_name} unequips {name}."), &[player]);
        Ok(())
    }
}
