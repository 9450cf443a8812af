//! Delivery of text to players.

use parley_foundation::EntityId;
use parley_storage::World;

/// Where player-facing text goes.
///
/// Network sessions live outside the engine; they implement this trait.
pub trait Transport {
    /// Delivers one line to one player.
    fn send(&mut self, to: EntityId, text: &str);

    /// Delivers one line to every player in `location` except `except`.
    fn broadcast(&mut self, world: &World, location: EntityId, text: &str, except: &[EntityId]) {
        for player in world.players_at(location) {
            if !except.contains(&player) {
                self.send(player, text);
            }
        }
    }
}

/// A transport that keeps everything it is given, in order.
#[derive(Clone, Debug, Default)]
pub struct Outbox {
    messages: Vec<(EntityId, String)>,
}

impl Outbox {
    /// Creates an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message so far, in delivery order.
    #[must_use]
    pub fn messages(&self) -> &[(EntityId, String)] {
        &self.messages
    }

    /// Messages delivered to one player, in order.
    #[must_use]
    pub fn messages_for(&self, player: EntityId) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(to, _)| *to == player)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    /// The most recent message delivered to a player.
    #[must_use]
    pub fn last_for(&self, player: EntityId) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|(to, _)| *to == player)
            .map(|(_, text)| text.as_str())
    }

    /// Removes and returns everything delivered so far.
    pub fn take(&mut self) -> Vec<(EntityId, String)> {
        std::mem::take(&mut self.messages)
    }

    /// Forgets everything delivered so far.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Transport for Outbox {
    fn send(&mut self, to: EntityId, text: &str) {
        self.messages.push((to, text.to_string()));
    }
}
