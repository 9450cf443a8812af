//! The interactive console a local player plays through.

use std::io::{self, Write};

use parley_foundation::{EntityId, Error, Result};
use tracing::warn;

use crate::ServerConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;
use crate::snapshot;

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The world being played.
    session: Session,

    /// Who is typing.
    player: EntityId,

    /// Banner, prompt and snapshot settings.
    config: ServerConfig,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session, player: EntityId, config: ServerConfig) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session, player, config))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(
        mut editor: E,
        session: Session,
        player: EntityId,
        config: ServerConfig,
    ) -> Self {
        let words = session
            .commands()
            .registry()
            .iter()
            .flat_map(|d| d.names.iter().cloned())
            .chain(["@save".to_string(), "@quit".to_string()])
            .collect();
        editor.set_completions(words);
        Self {
            editor,
            session,
            player,
            config,
        }
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The player this console types for.
    #[must_use]
    pub const fn player(&self) -> EntityId {
        self.player
    }

    /// Runs the REPL loop until the player quits.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails, or if saving on exit fails.
    pub fn run(&mut self) -> Result<()> {
        if self.config.show_banner {
            self.print_banner();
        }
        match self.eval("look") {
            Ok(lines) => Self::print_lines(&lines),
            Err(e) => Self::print_error(&e),
        }

        while self.read_eval_print()? {}

        if self.config.autosave {
            self.save()?;
        }
        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let input = match self.editor.read_line(&self.config.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }
        self.editor.add_history(trimmed);
        if is_quit(trimmed) {
            return Ok(false);
        }

        match self.eval(trimmed) {
            Ok(lines) => Self::print_lines(&lines),
            Err(e) => Self::print_error(&e),
        }
        Ok(true)
    }

    /// Runs one line and returns what the player was told.
    ///
    /// `@save` writes the snapshot; anything else is a world command.
    ///
    /// # Errors
    ///
    /// Returns the errors [`Session::handle_line`] and saving return.
    pub fn eval(&mut self, line: &str) -> Result<Vec<String>> {
        if line.trim() == "@save" {
            return Ok(vec![self.save()?]);
        }
        let result = self.session.handle_line(self.player, line);
        let lines = self
            .session
            .drain()
            .into_iter()
            .filter(|(to, _)| *to == self.player)
            .map(|(_, text)| text)
            .collect();
        result.map(|()| lines)
    }

    fn save(&self) -> Result<String> {
        let Some(path) = &self.config.snapshot_path else {
            warn!("no snapshot path configured; world not saved");
            return Ok("There is nowhere to save the world.".to_string());
        };
        snapshot::save_to_file(self.session.world(), path)?;
        Ok(format!("Saved the world to {}.", path.display()))
    }

    fn print_lines(lines: &[String]) {
        for line in lines {
            println!("{line}");
        }
    }

    fn print_error(error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    fn print_banner(&self) {
        println!("\x1b[1;36m");
        println!("  ___          _           ");
        println!(" | _ \\__ _ _ _| |___ _  _  ");
        println!(" |  _/ _` | '_| / -_) || | ");
        println!(" |_| \\__,_|_| |_\\___|\\_, | ");
        println!("                     |__/  ");
        println!("\x1b[0m");
        println!("Welcome to Parley v{}", env!("CARGO_PKG_VERSION"));
        println!(
            "You are {}. Type commands to play, @save to save, quit to leave.\n",
            self.session.world().name(self.player)
        );

        let _ = io::stdout().flush();
    }
}

fn is_quit(line: &str) -> bool {
    line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("@quit")
}
