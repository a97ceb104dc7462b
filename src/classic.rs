//! Classic rules: one sow per turn, no captures.
//!
//! The turn continues with the same player when the last stone lands in the
//! mover's own store; that decision is shared with the capture engine and
//! lives in [`Game`](crate::game::Game).

use crate::board::{Board, PitId, Side};
use crate::sowing::{MoveInstruction, SowReport, sow};

/// Play one classic turn from `selected`.
pub fn play_turn(
    board: &mut Board,
    mover: Side,
    selected: PitId,
    moves: &mut Vec<MoveInstruction>,
) -> SowReport {
    let last = sow(board, selected, mover, moves);
    SowReport {
        last,
        sows: 1,
        captured: 0,
        relay_limit_hit: false,
    }
}
