//! Server configuration.

use std::path::PathBuf;

/// Configuration for a local Parley server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Name of the local player.
    pub player_name: String,

    /// Name of the starting room in a fresh world.
    pub start_room: String,

    /// Where the world is loaded from and saved to, if anywhere.
    pub snapshot_path: Option<PathBuf>,

    /// Save the world to `snapshot_path` on exit.
    pub autosave: bool,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Show the welcome banner.
    pub show_banner: bool,

    /// Input prompt.
    pub prompt: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            start_room: "Lobby".to_string(),
            snapshot_path: None,
            autosave: false,
            log_filter: "warn".to_string(),
            show_banner: true,
            prompt: "> ".to_string(),
        }
    }
}

impl ServerConfig {
    /// Creates a configuration for development: verbose logging from the
    /// parley crates and a snapshot saved next to the working directory.
    #[must_use]
    pub fn development() -> Self {
        Self {
            snapshot_path: Some(PathBuf::from("parley-dev.msgpack")),
            autosave: true,
            log_filter: "info,parley_engine=debug,parley_parser=debug,parley_storage=debug"
                .to_string(),
            ..Self::default()
        }
    }

    /// Builder method to set the player name.
    #[must_use]
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    /// Builder method to set the starting room name.
    #[must_use]
    pub fn with_start_room(mut self, name: impl Into<String>) -> Self {
        self.start_room = name.into();
        self
    }

    /// Builder method to set the snapshot path.
    #[must_use]
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Builder method to enable/disable saving on exit.
    #[must_use]
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Builder method to set the log filter directive.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Builder method to show/hide the banner.
    #[must_use]
    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Builder method to set the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}
