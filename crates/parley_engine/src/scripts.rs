//! The stock script library.
//!
//! Ready-made handlers builders can attach to objects. `{obj}` is the
//! object carrying the handler and `{player}` the one who set it off.

use parley_storage::{Effect, EventHandler};

/// Destroys the object.
#[must_use]
pub fn disintegrate() -> EventHandler {
    EventHandler::new(Effect::SelfDestruct).emitting("The {obj} disintegrates!")
}

/// Destroys the object, loudly.
#[must_use]
pub fn explode() -> EventHandler {
    EventHandler::new(Effect::SelfDestruct).emitting("The {obj} explodes violently!")
}

/// Destroys the object with a private message for the player.
#[must_use]
pub fn absorb() -> EventHandler {
    EventHandler::new(Effect::SelfDestruct)
        .emitting("The {obj} glows briefly, and absorbs into {player}.")
        .sending("The {obj} glows bright, and absorbs into you!")
}

/// Refuses the action.
#[must_use]
pub fn disrupt() -> EventHandler {
    EventHandler::notice()
        .sending("The {obj} is cursed!")
        .disruptive()
}

/// Sends the player back to the starting room instead.
#[must_use]
pub fn teleport_to_start() -> EventHandler {
    EventHandler::new(Effect::Relocate { destination: None })
        .sending(
            "A searing white flash and a thunderclap surround you, momentarily dazzling your \
             senses. When you recover, you are somewhere else!",
        )
        .emitting("With a blinding flash and a clap of thunder, {player} vanishes!")
        .disruptive()
}

/// Drops a fresh samophlange at the player's feet.
#[must_use]
pub fn create_samophlange() -> EventHandler {
    EventHandler::new(Effect::CreateObject {
        name: "samophlange".into(),
    })
    .emitting("The {obj} rattles, and a {created_obj} falls out!")
}

/// Every stock script, by name.
#[must_use]
pub fn library() -> Vec<(&'static str, EventHandler)> {
    vec![
        ("disintegrate", disintegrate()),
        ("explode", explode()),
        ("absorb", absorb()),
        ("disrupt", disrupt()),
        ("teleport_to_start", teleport_to_start()),
        ("create_samophlange", create_samophlange()),
    ]
}

/// Looks up a stock script by name.
#[must_use]
pub fn stock(name: &str) -> Option<EventHandler> {
    library()
        .into_iter()
        .find_map(|(n, handler)| (n == name).then_some(handler))
}
