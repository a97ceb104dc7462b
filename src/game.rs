//! The game state machine: whose turn it is, which selections are legal, and
//! when the game is over.
//!
//! A [`Game`] is either awaiting a selection from the side to move or
//! complete. [`Game::select_pit`] runs a whole turn (every sow, relay and
//! capture) before returning, and hands back the stone relocations it
//! performed so a presentation layer can replay them at its own pace.

use crate::board::{Board, PitId, Side};
use crate::capture::{self, CaptureRule};
use crate::classic;
use crate::config::{GameConfig, Variant};
use crate::error::{ConfigError, MoveError, PreconditionError};
use crate::sowing::{MoveInstruction, MoveKind, transfer};

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Side),
    Tie,
}

/// Stable states between selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingSelection(Side),
    Complete(Outcome),
}

/// Everything that happened during one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSummary {
    pub mover: Side,
    pub selected: PitId,
    /// Stone relocations in the order they happened.
    pub moves: Vec<MoveInstruction>,
    /// Pit that received the final sown stone.
    pub last: PitId,
    pub sows: usize,
    pub captured: usize,
    /// The mover plays again.
    pub extra_turn: bool,
    pub relay_limit_hit: bool,
    /// Set when this turn ended the game.
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    config: GameConfig,
    board: Board,
    turn: Side,
    outcome: Option<Outcome>,
    turns_played: usize,
}

impl Game {
    /// Start a new game. Side 0 moves first.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(
            config.variant.layout(),
            config.pits_per_side,
            config.stones_per_pit,
        );
        Ok(Game {
            config,
            board,
            turn: Side::Player,
            outcome: None,
            turns_played: 0,
        })
    }

    /// Start a game with a variant's default board.
    pub fn with_variant(variant: Variant) -> Self {
        let config = GameConfig::for_variant(variant);
        let board = Board::new(variant.layout(), config.pits_per_side, config.stones_per_pit);
        Game {
            config,
            board,
            turn: Side::Player,
            outcome: None,
            turns_played: 0,
        }
    }

    /// Resume from an arbitrary position.
    ///
    /// The board must match the configured layout and pit count. A position
    /// with an empty row is complete immediately.
    pub fn with_position(config: GameConfig, board: Board, turn: Side) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.layout() != config.variant.layout() {
            return Err(ConfigError::Validation(format!(
                "{} needs a {:?} board",
                config.variant,
                config.variant.layout()
            )));
        }
        if board.pits_per_side() != config.pits_per_side {
            return Err(ConfigError::Validation(format!(
                "board has {} pits per side, config expects {}",
                board.pits_per_side(),
                config.pits_per_side
            )));
        }
        let mut game = Game {
            config,
            board,
            turn,
            outcome: None,
            turns_played: 0,
        };
        if game.row_exhausted() {
            game.outcome = Some(game.score());
        }
        Ok(game)
    }

    /// Discard the board and start over with the same configuration.
    pub fn reset(&mut self) {
        self.board = Board::new(
            self.config.variant.layout(),
            self.config.pits_per_side,
            self.config.stones_per_pit,
        );
        self.turn = Side::Player;
        self.outcome = None;
        self.turns_played = 0;
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    /// Result of the game, if it is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Result of the game. Asking before the game is over is a caller bug.
    pub fn winner(&self) -> Result<Outcome, PreconditionError> {
        self.outcome.ok_or(PreconditionError)
    }

    pub fn phase(&self) -> Phase {
        match self.outcome {
            Some(outcome) => Phase::Complete(outcome),
            None => Phase::AwaitingSelection(self.turn),
        }
    }

    pub fn turns_played(&self) -> usize {
        self.turns_played
    }

    /// Non-empty pits of the side to move; empty once the game is over.
    pub fn legal_pits(&self) -> Vec<usize> {
        if self.is_complete() {
            return Vec::new();
        }
        self.board.non_empty_pits(self.turn).collect()
    }

    /// Select a pit and play the turn, returning the stone relocations.
    pub fn select_pit(&mut self, side: Side, pit: usize) -> Result<Vec<MoveInstruction>, MoveError> {
        self.play_pit(side, pit).map(|summary| summary.moves)
    }

    /// Select a pit and play the turn, returning a full summary.
    ///
    /// On error nothing changes.
    pub fn play_pit(&mut self, side: Side, pit: usize) -> Result<TurnSummary, MoveError> {
        let selected = self.check_selection(side, pit)?;
        let mut moves = Vec::new();

        let report = match self.config.variant {
            Variant::Classic => classic::play_turn(&mut self.board, side, selected, &mut moves),
            Variant::Congklak => capture::play_turn(
                &mut self.board,
                CaptureRule::Opposite,
                side,
                selected,
                self.config.relay_limit,
                &mut moves,
            ),
            Variant::Bao => capture::play_turn(
                &mut self.board,
                CaptureRule::Neighbours,
                side,
                selected,
                self.config.relay_limit,
                &mut moves,
            ),
        };

        let extra_turn = report.last == self.board.store(side);
        if !extra_turn {
            self.turn = side.other();
        }
        self.turns_played += 1;

        if self.row_exhausted() {
            if self.config.sweep_on_finish {
                self.sweep(&mut moves);
            }
            self.outcome = Some(self.score());
        }

        Ok(TurnSummary {
            mover: side,
            selected,
            moves,
            last: report.last,
            sows: report.sows,
            captured: report.captured,
            extra_turn,
            relay_limit_hit: report.relay_limit_hit,
            outcome: self.outcome,
        })
    }

    fn check_selection(&self, side: Side, pit: usize) -> Result<PitId, MoveError> {
        if self.is_complete() {
            return Err(MoveError::GameOver);
        }
        if side != self.turn {
            return Err(MoveError::WrongTurn {
                expected: self.turn,
                got: side,
            });
        }
        let pits = self.board.pits_per_side();
        if pit >= pits {
            return Err(MoveError::OutOfRange { pit, pits });
        }
        let selected = PitId::new(side, pit);
        if self.board.stone_count(selected) == 0 {
            return Err(MoveError::EmptyPit(selected));
        }
        Ok(selected)
    }

    fn row_exhausted(&self) -> bool {
        Side::ALL.iter().any(|&side| self.board.row_sum(side) == 0)
    }

    /// Bank every side's remaining row stones in its own store.
    fn sweep(&mut self, moves: &mut Vec<MoveInstruction>) {
        for side in Side::ALL {
            let store = self.board.store(side);
            for n in 0..self.board.pits_per_side() {
                transfer(
                    &mut self.board,
                    PitId::new(side, n),
                    store,
                    MoveKind::Sweep,
                    moves,
                );
            }
        }
    }

    fn score(&self) -> Outcome {
        let mine = self.board.store_count(Side::Player);
        let theirs = self.board.store_count(Side::Opponent);
        match mine.cmp(&theirs) {
            std::cmp::Ordering::Greater => Outcome::Winner(Side::Player),
            std::cmp::Ordering::Less => Outcome::Winner(Side::Opponent),
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }
}
