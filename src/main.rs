//! Mancala-Rust: a sowing-game engine.
//!
//! ## Usage
//!
//! - `mancala-rust` - Play a random game and print the result
//! - `mancala-rust protocol` - Start the text protocol on stdin/stdout
//! - `mancala-rust play` - Play side 0 against a random opponent
//! - `mancala-rust demo` - Same as no subcommand
//! - `mancala-rust rules` - Print how to play the selected variant

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use mancala_rust::board::Side;
use mancala_rust::config::{GameConfig, Variant};
use mancala_rust::constants::MAX_PLAYOUT_TURNS;
use mancala_rust::game::{Game, Outcome};
use mancala_rust::playout::{RandomPolicy, random_playout};
use mancala_rust::protocol::{ProtocolEngine, format_moves};
use mancala_rust::sowing::MoveInstruction;

/// Mancala-Rust: classic, congklak and bao sowing games
#[derive(Parser)]
#[command(name = "mancala-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Rule variant (overrides the config file)
    #[arg(long, global = true, value_enum)]
    variant: Option<Variant>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the random opponent
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Report every turn on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the line-based text protocol for use by other programs
    Protocol,
    /// Play side 0 against a random opponent in the terminal
    Play {
        /// Pause between stone relocations when replaying a turn
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
    },
    /// Play one random game and print the result
    Demo,
    /// Print how to play the selected variant
    Rules,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let policy = match cli.seed {
        Some(seed) => RandomPolicy::with_seed(seed),
        None => RandomPolicy::new(),
    };
    if cli.verbose {
        eprintln!(
            "{}: {} pits per side, {} stones per pit, sweep on finish: {}",
            config.variant, config.pits_per_side, config.stones_per_pit, config.sweep_on_finish
        );
    }

    match cli.command {
        Some(Commands::Protocol) => {
            let mut engine = ProtocolEngine::with_config(config, policy)
                .context("invalid configuration")?
                .verbose(cli.verbose);
            engine.run().context("protocol I/O failed")?;
        }
        Some(Commands::Play { delay_ms }) => {
            run_play(config, policy, Duration::from_millis(delay_ms), cli.verbose)?;
        }
        Some(Commands::Rules) => {
            println!("{}\n\n{}", config.variant, config.variant.rules());
        }
        Some(Commands::Demo) | None => {
            run_demo(config, policy)?;
        }
    }
    Ok(())
}

/// Config file first, then command-line overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<GameConfig> {
    let base = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let config = match cli.variant {
        Some(variant) if variant != base.variant => GameConfig {
            sweep_on_finish: base.sweep_on_finish,
            relay_limit: base.relay_limit,
            ..GameConfig::for_variant(variant)
        },
        _ => base,
    };
    config.validate()?;
    Ok(config)
}

fn run_demo(config: GameConfig, mut policy: RandomPolicy) -> anyhow::Result<()> {
    let mut game = Game::new(config)?;
    println!("Mancala-Rust: {} demo\n", game.variant());

    println!("{}", game.board());

    let result = random_playout(&mut game, &mut policy, MAX_PLAYOUT_TURNS);
    println!("{}", game.board());
    println!(
        "{} turns, {} stone relocations",
        result.turns, result.stones_moved
    );
    match result.outcome {
        Some(outcome) => println!("{}", describe(outcome)),
        None => println!("abandoned after {} turns", result.turns),
    }
    Ok(())
}

fn run_play(
    config: GameConfig,
    mut policy: RandomPolicy,
    delay: Duration,
    verbose: bool,
) -> anyhow::Result<()> {
    let mut game = Game::new(config)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let pits = game.board().pits_per_side();

    while !game.is_complete() {
        println!("{}", game.board());

        let side = game.turn();
        let pit = match side {
            Side::Player => {
                print!("your pit (0-{})> ", pits - 1);
                io::stdout().flush()?;
                let Some(line) = lines.next() else {
                    return Ok(());
                };
                let line = line.context("failed to read from stdin")?;
                let line = line.trim();
                if line == "q" || line == "quit" {
                    return Ok(());
                }
                match line.parse::<usize>() {
                    Ok(pit) => pit,
                    Err(_) => {
                        println!("enter a pit number or q");
                        continue;
                    }
                }
            }
            Side::Opponent => match policy.choose(&game) {
                Some(pit) => {
                    println!("computer plays pit {pit}");
                    pit
                }
                None => bail!("no legal pit for the computer"),
            },
        };

        match game.play_pit(side, pit) {
            Ok(summary) => {
                replay(&summary.moves, delay);
                if verbose {
                    eprintln!(
                        "{} sows, {} captured, extra turn: {}",
                        summary.sows, summary.captured, summary.extra_turn
                    );
                }
            }
            Err(e) => println!("{e}"),
        }
    }

    println!("{}", game.board());
    println!("{}", describe(game.winner()?));
    Ok(())
}

/// Show a turn's relocations, pausing between them.
fn replay(moves: &[MoveInstruction], delay: Duration) {
    if delay.is_zero() {
        println!("{}", format_moves(moves));
        return;
    }
    for m in moves {
        println!("{m}");
        thread::sleep(delay);
    }
}

fn describe(outcome: Outcome) -> String {
    match outcome {
        Outcome::Winner(side) => format!("side {side} ({}) wins", side.name()),
        Outcome::Tie => "tie".to_string(),
    }
}
