//! Line-based text protocol for driving a game from another program.
//!
//! The framing follows the Go Text Protocol: every command line may start
//! with a numeric id, and every response is `=[id] text` on success or
//! `?[id] message` on failure, followed by an empty line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `variant <classic|congklak|bao>` - Switch rules and start a new game
//! - `boardsize <pits> [stones]` - Resize the board and start a new game
//! - `clear_board` - Start a new game with the current settings
//! - `sweep <on|off>` - Bank leftover row stones when the game ends
//! - `play <side> <pit>` - Play a pit; answers with the stone relocations
//! - `genmove` - Let the random policy play for the side to move; answers
//!   with the chosen pit followed by the relocations
//! - `turn`, `status`, `winner`, `showboard`
//! - `rules [variant]` - How to play the current (or named) variant
//!
//! Relocations are written `stone:from>to`, with pits as `side.index`.
//!
//! ## Example
//!
//! ```ignore
//! use mancala_rust::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use crate::board::Side;
use crate::config::{GameConfig, Variant};
use crate::game::{Game, Outcome, Phase};
use crate::playout::RandomPolicy;
use crate::sowing::MoveInstruction;

const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "rules",
    "showboard",
    "status",
    "sweep",
    "turn",
    "variant",
    "version",
    "winner",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    config: GameConfig,
    game: Game,
    policy: RandomPolicy,
    /// Report every turn on stderr.
    verbose: bool,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    pub fn new() -> Self {
        let config = GameConfig::default();
        let game = Game::with_variant(config.variant);
        Self {
            config,
            game,
            policy: RandomPolicy::new(),
            verbose: false,
        }
    }

    /// Start from a validated configuration.
    pub fn with_config(
        config: GameConfig,
        policy: RandomPolicy,
    ) -> Result<Self, crate::error::ConfigError> {
        let game = Game::new(config.clone())?;
        Ok(Self {
            config,
            game,
            policy,
            verbose: false,
        })
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop on stdin and stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional numeric command id off the front of a line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute one command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "variant" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match name.parse::<Variant>() {
                    Ok(variant) => {
                        let config = GameConfig {
                            sweep_on_finish: self.config.sweep_on_finish,
                            relay_limit: self.config.relay_limit,
                            ..GameConfig::for_variant(variant)
                        };
                        self.reconfigure(config)
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "boardsize" => {
                let Some(pits) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(pits) = pits.parse::<usize>() else {
                    return (false, "invalid pit count".to_string());
                };
                let stones = match args.get(1) {
                    Some(s) => match s.parse::<usize>() {
                        Ok(stones) => stones,
                        Err(_) => return (false, "invalid stone count".to_string()),
                    },
                    None => self.config.stones_per_pit,
                };
                let config = self.config.clone().with_board(pits, stones);
                self.reconfigure(config)
            }

            "rules" => match args.first() {
                Some(name) => match name.parse::<Variant>() {
                    Ok(variant) => (true, variant.rules().to_string()),
                    Err(e) => (false, e.to_string()),
                },
                None => (true, self.config.variant.rules().to_string()),
            },

            "clear_board" => {
                self.game.reset();
                (true, String::new())
            }

            "sweep" => match args.first().map(|a| a.to_lowercase()).as_deref() {
                Some("on") => {
                    let config = self.config.clone().with_sweep_on_finish(true);
                    self.reconfigure(config)
                }
                Some("off") => {
                    let config = self.config.clone().with_sweep_on_finish(false);
                    self.reconfigure(config)
                }
                Some(_) => (false, "expected on or off".to_string()),
                None => (false, "missing argument".to_string()),
            },

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let side = match args[0].parse::<usize>().map(Side::try_from) {
                    Ok(Ok(side)) => side,
                    Ok(Err(e)) => return (false, e.to_string()),
                    Err(_) => return (false, "invalid side".to_string()),
                };
                let Ok(pit) = args[1].parse::<usize>() else {
                    return (false, "invalid pit".to_string());
                };
                self.play(side, pit)
            }

            "genmove" => {
                let side = self.game.turn();
                let Some(pit) = self.policy.choose(&self.game) else {
                    return (false, "game is already complete".to_string());
                };
                let (ok, moves) = self.play(side, pit);
                if !ok {
                    return (false, moves);
                }
                (true, format!("{pit} {moves}"))
            }

            "turn" => (true, self.game.turn().to_string()),

            "status" => match self.game.phase() {
                Phase::AwaitingSelection(side) => (true, format!("playing {side}")),
                Phase::Complete(_) => (true, "complete".to_string()),
            },

            "winner" => match self.game.winner() {
                Ok(Outcome::Winner(side)) => (true, side.to_string()),
                Ok(Outcome::Tie) => (true, "tie".to_string()),
                Err(e) => (false, e.to_string()),
            },

            "showboard" => (true, format!("\n{}", self.game.board().to_string().trim_end())),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn play(&mut self, side: Side, pit: usize) -> (bool, String) {
        match self.game.play_pit(side, pit) {
            Ok(summary) => {
                if self.verbose {
                    eprintln!(
                        "side {} played pit {}: {} sows, {} captured, {} relocations",
                        side,
                        pit,
                        summary.sows,
                        summary.captured,
                        summary.moves.len()
                    );
                    if summary.relay_limit_hit {
                        eprintln!("relay limit of {} sows reached", self.config.relay_limit);
                    }
                }
                (true, format_moves(&summary.moves))
            }
            Err(e) => (false, e.to_string()),
        }
    }

    /// Adopt a new configuration and start a fresh game, or reject it.
    fn reconfigure(&mut self, config: GameConfig) -> (bool, String) {
        match Game::new(config.clone()) {
            Ok(game) => {
                self.config = config;
                self.game = game;
                (true, String::new())
            }
            Err(e) => (false, e.to_string()),
        }
    }
}

/// Space-separated `stone:from>to` items.
pub fn format_moves(moves: &[MoveInstruction]) -> String {
    moves
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> ProtocolEngine {
        ProtocolEngine::with_config(GameConfig::default(), RandomPolicy::with_seed(9)).unwrap()
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = ProtocolEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = ProtocolEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = ProtocolEngine::new();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "mancala-rust");
    }

    #[test]
    fn test_known_command() {
        let mut engine = ProtocolEngine::new();

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["komi"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_play_reports_relocations() {
        let mut engine = ProtocolEngine::new();

        let (success, response) = engine.execute("play", &["0", "2"]);
        assert!(success);
        assert_eq!(response, "11:0.2>0.3 10:0.2>0.4 9:0.2>0.5 8:0.2>0.6");

        let (_, turn) = engine.execute("turn", &[]);
        assert_eq!(turn, "0");
    }

    #[test]
    fn test_play_rejects_bad_input() {
        let mut engine = ProtocolEngine::new();

        let (success, response) = engine.execute("play", &["1", "0"]);
        assert!(!success);
        assert_eq!(response, "it is side 0's turn, not side 1's");

        assert!(!engine.execute("play", &["2", "0"]).0);
        assert!(!engine.execute("play", &["0", "x"]).0);
        assert!(!engine.execute("play", &["0", "6"]).0);
        assert!(!engine.execute("play", &["0"]).0);
        assert_eq!(engine.game().turns_played(), 0);
    }

    #[test]
    fn test_genmove_plays_for_side_to_move() {
        let mut engine = seeded();
        let (success, response) = engine.execute("genmove", &[]);
        assert!(success);
        let pit: usize = response.split(' ').next().unwrap().parse().unwrap();
        assert!(pit < 6);
        assert_eq!(engine.game().turns_played(), 1);
    }

    #[test]
    fn test_winner_before_end_is_an_error() {
        let mut engine = ProtocolEngine::new();
        let (success, _) = engine.execute("winner", &[]);
        assert!(!success);
        let (_, status) = engine.execute("status", &[]);
        assert_eq!(status, "playing 0");
    }

    #[test]
    fn test_genmove_until_complete() {
        let mut engine = seeded();
        engine.execute("variant", &["congklak"]);
        engine.execute("boardsize", &["3", "2"]);
        for _ in 0..10_000 {
            if engine.game().is_complete() {
                break;
            }
            assert!(engine.execute("genmove", &[]).0);
        }
        assert_eq!(engine.execute("status", &[]).1, "complete");
        assert!(engine.execute("winner", &[]).0);
        assert!(!engine.execute("genmove", &[]).0);
    }

    #[test]
    fn test_reconfiguration() {
        let mut engine = ProtocolEngine::new();

        assert!(engine.execute("variant", &["bao"]).0);
        assert_eq!(engine.game().board().pits_per_side(), 16);
        assert!(!engine.execute("boardsize", &["7"]).0);
        assert_eq!(engine.game().board().pits_per_side(), 16);

        assert!(engine.execute("boardsize", &["4", "3"]).0);
        assert_eq!(engine.game().board().total_stones(), 24);

        assert!(!engine.execute("variant", &["oware"]).0);
        assert!(engine.execute("sweep", &["on"]).0);
        assert!(engine.game().config().sweep_on_finish);
        assert!(!engine.execute("sweep", &["maybe"]).0);
    }

    #[test]
    fn test_boardsize_rejects_oversized_boards() {
        let mut engine = ProtocolEngine::new();

        let (success, _) = engine.execute("boardsize", &["4611686018427387904", "4"]);
        assert!(!success);
        let (success, _) = engine.execute("boardsize", &["1000000000", "1"]);
        assert!(!success);
        assert_eq!(engine.game().board().pits_per_side(), 6);
        assert!(engine.execute("play", &["0", "2"]).0);
    }

    #[test]
    fn test_rules() {
        let mut engine = ProtocolEngine::new();

        let (success, response) = engine.execute("rules", &[]);
        assert!(success);
        assert_eq!(response, Variant::Classic.rules());

        for variant in Variant::ALL {
            let (success, response) = engine.execute("rules", &[variant.name()]);
            assert!(success);
            assert_eq!(response, variant.rules());
            assert!(!response.contains("\n\n"));
        }

        engine.execute("variant", &["bao"]);
        assert_eq!(engine.execute("rules", &[]).1, Variant::Bao.rules());
        assert!(!engine.execute("rules", &["oware"]).0);
        assert_eq!(engine.execute("known_command", &["rules"]).1, "true");
    }

    #[test]
    fn test_serve_framing() {
        let mut engine = ProtocolEngine::new();
        let input = b"1 name\nbogus\n# comment\n2 turn\nquit\nname\n";
        let mut output = Vec::new();
        engine.serve(&input[..], &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "=1 mancala-rust\n\n? unknown command: bogus\n\n=2 0\n\n= \n\n"
        );
    }
}
