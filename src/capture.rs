//! Capture rules shared by congklak and bao: relay sowing plus a capture
//! check on the last stone of every sow.
//!
//! A turn is a loop over sows. After each sow the landing pit is judged:
//!
//! - it triggers a capture, which ends the turn;
//! - it now holds more than one stone, so the mover picks it up and sows
//!   again from there (a relay);
//! - otherwise the turn ends.
//!
//! Relays are bounded by a per-turn limit so that no board can keep a turn
//! going forever.

use crate::board::{Board, PitId, Side};
use crate::sowing::{MoveInstruction, MoveKind, SowReport, sow, transfer};

/// Which pits a landing can capture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CaptureRule {
    /// Congklak: a last stone in an empty own pit takes the pit across.
    Opposite,
    /// Bao: an inner-row landing takes both facing pits when neither is empty.
    Neighbours,
}

/// Verdict on the pit that received the last stone of a sow.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Landing {
    Capture(Vec<PitId>),
    Relay,
    Stop,
}

fn judge(board: &Board, rule: CaptureRule, mover: Side, last: PitId) -> Landing {
    if board.is_store(last) {
        return Landing::Stop;
    }
    let count = board.stone_count(last);
    match rule {
        CaptureRule::Opposite => {
            if last.side == mover && count == 1 {
                return Landing::Capture(vec![last, board.opposite(last)]);
            }
        }
        CaptureRule::Neighbours => {
            if last.side == mover {
                if let Some([a, b]) = board.bao_neighbours(last) {
                    if board.stone_count(a) > 0 && board.stone_count(b) > 0 {
                        return Landing::Capture(vec![last, a, b]);
                    }
                }
            }
        }
    }
    if count > 1 {
        Landing::Relay
    } else {
        Landing::Stop
    }
}

/// Play one turn from `selected`, relaying until a capture, a stop, or
/// `relay_limit` sows.
pub fn play_turn(
    board: &mut Board,
    rule: CaptureRule,
    mover: Side,
    selected: PitId,
    relay_limit: usize,
    moves: &mut Vec<MoveInstruction>,
) -> SowReport {
    let store = board.store(mover);
    let mut origin = selected;
    let mut sows = 0;

    loop {
        let last = sow(board, origin, mover, moves);
        sows += 1;

        match judge(board, rule, mover, last) {
            Landing::Capture(pits) => {
                let captured = pits
                    .into_iter()
                    .map(|pit| transfer(board, pit, store, MoveKind::Capture, moves))
                    .sum();
                return SowReport {
                    last,
                    sows,
                    captured,
                    relay_limit_hit: false,
                };
            }
            Landing::Relay if sows < relay_limit => origin = last,
            verdict => {
                return SowReport {
                    last,
                    sows,
                    captured: 0,
                    relay_limit_hit: verdict == Landing::Relay,
                };
            }
        }
    }
}
