//! Random playouts.
//!
//! The computer opponent is a policy layered on top of the engine: it looks
//! at the legal pits and picks one. A playout keeps asking the policy until
//! the game is over.

use crate::game::{Game, Outcome};

/// Picks a uniformly random legal pit for the side to move.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        RandomPolicy {
            rng: fastrand::Rng::new(),
        }
    }

    /// A reproducible policy.
    pub fn with_seed(seed: u64) -> Self {
        RandomPolicy {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Choose a pit for the side to move, or `None` if the game is over.
    pub fn choose(&mut self, game: &Game) -> Option<usize> {
        let legal = game.legal_pits();
        if legal.is_empty() {
            return None;
        }
        Some(legal[self.rng.usize(..legal.len())])
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of a finished (or abandoned) playout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutResult {
    pub turns: usize,
    /// `None` when the turn cap was reached first.
    pub outcome: Option<Outcome>,
    /// Total stone relocations across all turns.
    pub stones_moved: usize,
}

/// Play random pits until the game ends or `max_turns` turns have passed.
pub fn random_playout(game: &mut Game, policy: &mut RandomPolicy, max_turns: usize) -> PlayoutResult {
    let mut turns = 0;
    let mut stones_moved = 0;

    while turns < max_turns {
        let Some(pit) = policy.choose(game) else {
            break;
        };
        match game.play_pit(game.turn(), pit) {
            Ok(summary) => stones_moved += summary.moves.len(),
            Err(e) => {
                eprintln!("playout stopped after {turns} turns: pit {pit} rejected: {e}");
                break;
            }
        }
        turns += 1;
    }

    PlayoutResult {
        turns,
        outcome: game.outcome(),
        stones_moved,
    }
}
