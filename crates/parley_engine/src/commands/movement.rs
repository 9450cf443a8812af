//! Travel.

use parley_foundation::{EntityId, Error, Result};
use parley_parser::{Arguments, CommandDescriptor, Element, Grammar};
use parley_storage::World;
use tracing::debug;

use super::object;
use super::perception::describe;
use crate::cascade::checkpoint;
use crate::command::{Command, CommandContext};

/// `go <exit>`. Typing an exit's name on its own also lands here.
pub struct Go;

fn go_grammar(_: &World, _: EntityId) -> Grammar {
    Grammar::new().or([Element::object_or_id("exit")])
}

impl Command for Go {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("go", go_grammar)
    }

    fn usage(&self) -> &'static str {
        "go <exit>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let exit = object(args, "exit")?;
        let player = ctx.player;
        let exit_name = ctx.name(exit);
        let Some(destination) = ctx.world.get(exit)?.destination() else {
            return Err(Error::refused(format!("You can't go through {exit_name}.")));
        };
        let origin = ctx.location()?;

        checkpoint(ctx, "go through", &["go"], &[player, exit, destination])?;

        let player_name = ctx.name(player);
        ctx.world.relocate(player, Some(destination))?;
        debug!(%player, from = %origin, to = %destination, "player moved");
        ctx.emit_in(
            origin,
            format!("{player_name} leaves through {exit_name}."),
            &[player],
        );
        ctx.emit_in(destination, format!("{player_name} arrives."), &[player]);
        describe(ctx, destination)
    }
}
