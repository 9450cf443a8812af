//! Parley CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use parley_runtime::{Repl, ServerConfig, Session, find_or_create_player, logging, snapshot};
use tracing::info;

/// CLI options parsed from arguments.
#[derive(Default)]
struct CliOptions {
    show_help: bool,
    show_version: bool,
    config: ServerConfig,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_args(args: &[String]) -> Result<CliOptions, Box<dyn std::error::Error>> {
    let mut options = CliOptions::default();
    if args.iter().any(|a| a == "--dev") {
        options.config = ServerConfig::development();
    }

    let mut i = 1;
    while i < args.len() {
        let config = std::mem::take(&mut options.config);
        options.config = match args[i].as_str() {
            "-h" | "--help" => {
                options.show_help = true;
                config
            }
            "-V" | "--version" => {
                options.show_version = true;
                config
            }
            "--dev" => config,
            "--autosave" => config.with_autosave(true),
            "--no-banner" => config.with_banner(false),
            "-p" | "--player" => config.with_player_name(value(args, &mut i, "--player")?),
            "--start-room" => config.with_start_room(value(args, &mut i, "--start-room")?),
            "-s" | "--snapshot" => {
                config.with_snapshot_path(PathBuf::from(value(args, &mut i, "--snapshot")?))
            }
            "--log" => config.with_log_filter(value(args, &mut i, "--log")?),
            "--prompt" => config.with_prompt(value(args, &mut i, "--prompt")?),
            arg => return Err(format!("unknown option: {arg}").into()),
        };
        i += 1;
    }

    Ok(options)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let CliOptions {
        show_help,
        show_version,
        config,
    } = parse_args(&args)?;

    if show_help {
        print_help();
        return Ok(());
    }

    if show_version {
        println!("parley {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init(&config.log_filter)?;

    let (world, player) = match &config.snapshot_path {
        Some(path) if path.exists() => {
            let mut world = snapshot::load_from_file(path)?;
            let player = find_or_create_player(&mut world, &config.player_name)?;
            (world, player)
        }
        _ => parley_runtime::starter_world(&config)?,
    };
    info!(%player, "starting session");

    let session = Session::new(world)?;
    let mut repl = Repl::new(session, player, config)?;
    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mParley\x1b[0m - A tiny text world with permissioned objects

\x1b[1mUSAGE:\x1b[0m
    parley [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help              Print help information
    -V, --version           Print version information
    -p, --player NAME       Play as NAME (default: Player)
    -s, --snapshot PATH     Load the world from PATH if it exists; @save writes it
        --autosave          Save the world to the snapshot path on exit
        --start-room NAME   Name of the starting room in a fresh world
        --log FILTER        Log filter used when RUST_LOG is unset (default: warn)
        --prompt TEXT       Input prompt
        --no-banner         Skip the welcome banner
        --dev               Verbose logging and autosave to parley-dev.msgpack

\x1b[1mEXAMPLES:\x1b[0m
    parley                              Play in a fresh world
    parley -s world.msgpack --autosave  Keep the world between runs
    parley --log debug                  Watch commands and events resolve

\x1b[1mCOMMANDS:\x1b[0m
    look, take, drop, give, equip, unequip, go, say, emote, inventory
    create, set, unset, open, destroy, sudo
    @save                Save the world to the snapshot path
    quit, Ctrl+D         Leave"
    );
}
