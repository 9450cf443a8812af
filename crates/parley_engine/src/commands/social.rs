//! Talking and posing.

use parley_foundation::{EntityId, Result};
use parley_parser::{Arguments, CommandDescriptor, Element, Grammar};
use parley_storage::World;

use super::text;
use crate::command::{Command, CommandContext};

fn message(_: &World, _: EntityId) -> Grammar {
    Grammar::new().or([Element::text("message")])
}

/// `say <message>`, or `'message` / `"message`.
pub struct Say;

impl Command for Say {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("say", message).nospace(["'", "\""])
    }

    fn usage(&self) -> &'static str {
        "say <message>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let said = text(args, "message")?;
        let player = ctx.player;
        let name = ctx.name(player);
        ctx.send(format!("You say, \"{said}\""));
        ctx.emit(format!("{name} says, \"{said}\""), &[player]);
        Ok(())
    }
}

/// `emote <action>` or `:action`, shown as "Name action".
pub struct Emote;

impl Command for Emote {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("emote", message)
            .aliases(["pose"])
            .nospace([":"])
    }

    fn usage(&self) -> &'static str {
        "emote <action>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let action = text(args, "message")?;
        let name = ctx.name(ctx.player);
        ctx.emit(format!("{name} {action}"), &[]);
        Ok(())
    }
}

/// `;action`, shown as "Nameaction" for possessives and the like.
pub struct Semipose;

impl Command for Semipose {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("semipose", message).nospace([";"])
    }

    fn usage(&self) -> &'static str {
        ";<action>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let action = text(args, "message")?;
        let name = ctx.name(ctx.player);
        ctx.emit(format!("{name}{action}"), &[]);
        Ok(())
    }
}
