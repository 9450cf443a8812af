//! The event cascade.
//!
//! Before a command changes the world it offers the action to a chain of
//! interceptors, typically the acting player, the target object and the
//! destination. Each interceptor may have a scripted [`EventHandler`] for
//! the action; handlers run their effects under the system authority, and a
//! disruptive handler stops the cascade and vetoes the action.

use parley_foundation::{EntityId, Error, ErrorKind, Result};
use parley_lock::{Authority, with_authority};
use parley_storage::{Effect, EntityKind, EventHandler};
use tracing::{debug, info};

use crate::command::CommandContext;

/// How a cascade ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CascadeOutcome {
    /// No handler objected; the action may proceed.
    Completed,
    /// A disruptive handler fired.
    Cancelled {
        /// The interceptor whose handler fired.
        by: EntityId,
        /// The action it vetoed.
        reason: String,
    },
}

impl CascadeOutcome {
    /// Returns true if the action was vetoed.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Offers `actions` to each interceptor in `chain`, in order.
///
/// For each interceptor every action name is checked in turn. The first
/// disruptive handler ends the cascade; interceptors after it never see
/// the action. Handlers never fire for their exempt entity.
///
/// # Errors
///
/// Returns any failure raised while applying a handler's effect.
pub fn run_cascade(
    ctx: &mut CommandContext<'_>,
    actions: &[&str],
    chain: &[EntityId],
) -> Result<CascadeOutcome> {
    for &interceptor in chain {
        for &action in actions {
            let Some(handler) = ctx
                .world
                .get(interceptor)
                .ok()
                .and_then(|e| e.handler(action))
                .cloned()
            else {
                continue;
            };
            if !handler.applies_to(ctx.player) {
                continue;
            }

            debug!(%interceptor, action, "event handler fired");
            fire(ctx, interceptor, &handler)?;

            if handler.is_disruptive() {
                info!(%interceptor, action, player = %ctx.player, "action cancelled by event");
                return Ok(CascadeOutcome::Cancelled {
                    by: interceptor,
                    reason: action.to_string(),
                });
            }
        }
    }
    Ok(CascadeOutcome::Completed)
}

/// Runs a cascade and turns a veto into a player-facing refusal.
///
/// A veto by the acting player reads "You can't {verb} anything."; a veto
/// by anything else reads "You can't {verb} the {name}!".
///
/// # Errors
///
/// Returns a `Cancelled` error on veto, or any failure from the handlers.
pub fn checkpoint(
    ctx: &mut CommandContext<'_>,
    verb: &str,
    actions: &[&str],
    chain: &[EntityId],
) -> Result<()> {
    let names: Vec<String> = chain.iter().map(|&id| ctx.name(id)).collect();
    match run_cascade(ctx, actions, chain)? {
        CascadeOutcome::Completed => Ok(()),
        CascadeOutcome::Cancelled { by, .. } if by == ctx.player => {
            Err(Error::cancelled(format!("You can't {verb} anything.")))
        }
        CascadeOutcome::Cancelled { by, .. } => {
            let name = chain
                .iter()
                .position(|&id| id == by)
                .map_or_else(|| ctx.name(by), |i| names[i].clone());
            Err(Error::cancelled(format!("You can't {verb} the {name}!")))
        }
    }
}

fn fire(ctx: &mut CommandContext<'_>, source: EntityId, handler: &EventHandler) -> Result<()> {
    let player = ctx.player;
    let obj = ctx.name(source);
    let player_name = ctx.name(player);
    let room = ctx.world.room_of(source);

    let created = with_authority(Authority::System, || apply(ctx, source, &handler.effect))?;

    let render = |text: &str| {
        text.replace("{obj}", &obj)
            .replace("{player}", &player_name)
            .replace("{created_obj}", created.as_deref().unwrap_or("something"))
    };

    // With a private message, the room notice skips the player; without
    // one, the player sees the room notice too.
    let only_player = [player];
    let except: &[EntityId] = match &handler.send {
        Some(text) => {
            let text = render(text);
            ctx.send(text);
            &only_player
        }
        None => &[],
    };
    if let (Some(text), Some(room)) = (&handler.emit, room) {
        let text = render(text);
        ctx.emit_in(room, text, except);
    }
    Ok(())
}

fn apply(ctx: &mut CommandContext<'_>, source: EntityId, effect: &Effect) -> Result<Option<String>> {
    match effect {
        Effect::None => {}
        Effect::SelfDestruct => ctx.world.destroy(source)?,
        Effect::CreateObject { name } => {
            let location = ctx.world.location(ctx.player);
            let player = ctx.player;
            with_authority(player, || ctx.world.spawn(EntityKind::Thing, name, location))?;
            return Ok(Some(name.clone()));
        }
        Effect::Relocate { destination } => {
            let target = (*destination)
                .or_else(|| ctx.world.start())
                .ok_or_else(|| Error::refused("There is nowhere to send you."))?;
            ctx.world.relocate(ctx.player, Some(target))?;
        }
        Effect::SetAttribute { name, value } => {
            ctx.world.write_attribute(source, name, value.clone())?;
        }
        Effect::RemoveAttribute { name } => match ctx.world.remove_attribute(source, name) {
            Err(e) if matches!(e.kind, ErrorKind::AttributeNotFound { .. }) => {}
            other => {
                other?;
            }
        },
    }
    Ok(None)
}
