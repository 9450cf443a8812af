//! Building and administration.

use parley_foundation::{EntityId, Error, ErrorKind, Result, Value};
use parley_lock::{Authority, with_authority};
use parley_parser::{Arguments, CommandDescriptor, Element, Grammar, ReferenceResolver, Scope};
use parley_storage::{EntityKind, World};
use tracing::info;

use super::{object, text};
use crate::command::{Command, CommandContext};

fn line(_: &World, _: EntityId) -> Grammar {
    Grammar::new().or([Element::text("line")])
}

/// `sudo <command>`: runs another command under the system authority.
///
/// Must be typed in full. Any player may use it for now; there is no
/// administrator role to restrict it to.
pub struct Sudo;

impl Command for Sudo {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("sudo", line).require_full_name()
    }

    fn usage(&self) -> &'static str {
        "sudo <command>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let inner = text(args, "line")?;
        let player = ctx.player;
        let commands = ctx.commands;
        let world = &mut *ctx.world;
        let transport = &mut *ctx.transport;
        info!(%player, line = inner, "running command as system");
        with_authority(Authority::System, || {
            commands.dispatch(world, transport, player, inner)
        })
    }
}

/// `create <name>`: makes a new thing in your inventory.
pub struct Create;

impl Command for Create {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("create", line)
    }

    fn usage(&self) -> &'static str {
        "create <name>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let name = text(args, "line")?;
        let id = ctx
            .world
            .spawn(EntityKind::Thing, name, Some(ctx.player))?;
        ctx.send(format!("Created item {id}, {name}."));
        Ok(())
    }
}

/// `<object>.<attribute>`, split and checked.
fn attribute_target(target: &str) -> Result<(&str, &str)> {
    let usage = || Error::refused("Usage: <object>.<attribute>");
    let (object, attribute) = target.trim().rsplit_once('.').ok_or_else(usage)?;
    let (object, attribute) = (object.trim(), attribute.trim());
    if object.is_empty() {
        return Err(usage());
    }
    let mut chars = attribute.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(Error::refused(format!(
            "'{attribute}' is not a valid attribute name."
        )));
    }
    Ok((object, attribute))
}

/// The object a builder command names, by name or `#<n>`.
fn target(ctx: &CommandContext<'_>, fragment: &str) -> Result<EntityId> {
    ReferenceResolver::resolve_one(
        ctx.world,
        fragment,
        ctx.player,
        Scope::ReachableOrIdentifier,
        None,
    )
    .map_err(|e| e.into_error(ctx.world))
}

/// `set <object>.<attribute>=<value>`.
///
/// A value is an integer, `True`, `False`, `None`, a `#<n>` reference to
/// an existing object, or a quoted string. Strings may use single, double,
/// or tripled quotes, and a backslash escapes the next character.
pub struct Set;

impl Set {
    fn split(assignment: &str) -> Result<(&str, &str, &str)> {
        let (target, value) = assignment
            .split_once('=')
            .ok_or_else(|| Error::refused(format!("Usage: {}", Self.usage())))?;
        let (object, attribute) = attribute_target(target)?;
        Ok((object, attribute, value.trim()))
    }

    fn value(world: &World, text: &str) -> Result<Value> {
        let invalid = || Error::refused(format!("'{text}' is not a valid attribute value."));
        match text {
            "True" => return Ok(Value::Bool(true)),
            "False" => return Ok(Value::Bool(false)),
            "None" => return Ok(Value::Nil),
            _ => {}
        }
        if let Some(digits) = text.strip_prefix('#') {
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            let id: EntityId = text.parse().map_err(|_| invalid())?;
            if !world.contains(id) {
                return Err(Error::entity_not_found(id));
            }
            return Ok(Value::EntityRef(id));
        }
        let signed = text.strip_prefix('-').unwrap_or(text);
        if !signed.is_empty() && signed.chars().all(|c| c.is_ascii_digit()) {
            return text.parse::<i64>().map(Value::Int).map_err(|_| invalid());
        }
        Self::string(text).map(Value::from).ok_or_else(invalid)
    }

    fn string(text: &str) -> Option<String> {
        for quote in ["\"\"\"", "'''", "\"", "'"] {
            let Some(inner) = text
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
            else {
                continue;
            };
            return Self::unescape(inner, quote);
        }
        None
    }

    fn unescape(inner: &str, quote: &str) -> Option<String> {
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    escaped => out.push(escaped),
                },
                c if quote.len() == 1 && quote.starts_with(c) => return None,
                c => out.push(c),
            }
        }
        Some(out)
    }
}

impl Command for Set {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("set", line)
    }

    fn usage(&self) -> &'static str {
        "set <object>.<attribute>=<value>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let (fragment, attribute, raw) = Self::split(text(args, "line")?)?;
        let target = target(ctx, fragment)?;
        let value = Self::value(ctx.world, raw)?;

        ctx.world.write_attribute(target, attribute, value.clone())?;
        let name = ctx.name(target);
        ctx.send(format!("Set {name}'s {attribute} attribute to {value}"));
        Ok(())
    }
}

/// `unset <object>.<attribute>`: removes an attribute.
pub struct Unset;

impl Command for Unset {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("unset", line)
    }

    fn usage(&self) -> &'static str {
        "unset <object>.<attribute>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let (fragment, attribute) = attribute_target(text(args, "line")?)?;
        let target = target(ctx, fragment)?;
        let name = ctx.name(target);

        match ctx.world.remove_attribute(target, attribute) {
            Ok(_) => {
                ctx.send(format!("Unset {attribute} attribute on {name}."));
                Ok(())
            }
            Err(e) if matches!(e.kind, ErrorKind::AccessDenied { .. }) => Err(Error::refused(
                format!("You don't have permission to unset {attribute} on {name}."),
            )),
            Err(e) => Err(e),
        }
    }
}

/// `open <exit> to <room>`: makes an exit from here.
pub struct Open;

fn open_grammar(_: &World, _: EntityId) -> Grammar {
    Grammar::new().or([
        Element::text("name"),
        Element::keyword("to"),
        Element::object_or_id("destination"),
    ])
}

impl Command for Open {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("open", open_grammar)
    }

    fn usage(&self) -> &'static str {
        "open <exit> to <room>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let name = text(args, "name")?;
        let destination = object(args, "destination")?;
        let destination_name = ctx.name(destination);
        if !matches!(ctx.world.get(destination)?.kind, EntityKind::Room) {
            return Err(Error::refused(format!(
                "You can't open an exit to {destination_name}."
            )));
        }
        let here = ctx.location()?;

        ctx.world
            .spawn(EntityKind::Exit { destination }, name, Some(here))?;
        ctx.send(format!("Opened {name} to {destination_name}."));
        Ok(())
    }
}

/// `destroy <object>`: removes something you own from the world.
pub struct Destroy;

fn destroy_grammar(_: &World, _: EntityId) -> Grammar {
    Grammar::new().or([Element::object_or_id("obj")])
}

impl Command for Destroy {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("destroy", destroy_grammar)
    }

    fn usage(&self) -> &'static str {
        "destroy <object>"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &Arguments) -> Result<()> {
        let target = object(args, "obj")?;
        let name = ctx.name(target);
        let cannot = || Error::refused(format!("You cannot destroy {name}."));
        if ctx.world.get(target)?.is_player() {
            return Err(cannot());
        }
        match ctx.world.destroy(target) {
            Err(e) if matches!(e.kind, ErrorKind::AccessDenied { .. }) => return Err(cannot()),
            result => result?,
        }

        let player = ctx.player;
        let player_name = ctx.name(player);
        ctx.send(format!("You destroy {target} ({name})."));
        ctx.emit(format!("{player_name} destroys {name}."), &[player]);
        Ok(())
    }
}
