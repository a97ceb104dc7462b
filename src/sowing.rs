//! The sowing primitive shared by every rule engine, and the move
//! instructions it emits for the presentation layer.

use std::fmt;

use crate::board::{Board, PitId, Side, StoneId};

/// Why a stone moved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Dropped into a pit while sowing.
    Sow,
    /// Taken by a capture.
    Capture,
    /// Swept from a row into its owner's store at the end of the game.
    Sweep,
}

/// One stone relocation, in the order the engine performed it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoveInstruction {
    pub stone: StoneId,
    pub from: PitId,
    pub to: PitId,
    pub kind: MoveKind,
}

impl fmt::Display for MoveInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}>{}", self.stone, self.from, self.to)
    }
}

/// What a rule engine did with one selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SowReport {
    /// Pit that received the last sown stone.
    pub last: PitId,
    /// Number of sows performed, relays included.
    pub sows: usize,
    /// Stones moved into the mover's store by captures.
    pub captured: usize,
    /// Relay sowing was cut off by the configured limit.
    pub relay_limit_hit: bool,
}

/// Lift every stone out of `origin` and drop them one per pit along the
/// sowing path, skipping the store that does not belong to `mover`.
///
/// Stones leave the origin most recent first. Returns the pit that received
/// the last stone, or `origin` if it was empty.
pub fn sow(
    board: &mut Board,
    origin: PitId,
    mover: Side,
    moves: &mut Vec<MoveInstruction>,
) -> PitId {
    let hand = board.take_all(origin);

    let mut pit = origin;
    for stone in hand.into_iter().rev() {
        pit = board.next_pit(pit);
        if board.is_store(pit) && pit.side != mover {
            pit = board.next_pit(pit);
        }
        board.add_stone(pit, stone);
        moves.push(MoveInstruction {
            stone,
            from: origin,
            to: pit,
            kind: MoveKind::Sow,
        });
    }
    pit
}

/// Move every stone in `from` into `to`. Returns the number of stones moved.
pub fn transfer(
    board: &mut Board,
    from: PitId,
    to: PitId,
    kind: MoveKind,
    moves: &mut Vec<MoveInstruction>,
) -> usize {
    let stones = board.take_all(from);
    let count = stones.len();
    for stone in stones {
        board.add_stone(to, stone);
        moves.push(MoveInstruction {
            stone,
            from,
            to,
            kind,
        });
    }
    count
}
