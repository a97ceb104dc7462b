//! Board representation: two sides of pits, each followed by a store.
//!
//! Pits hold individual stone tokens rather than bare counts so that a
//! presentation layer can follow every stone as it travels. The last token in
//! a pit is the next one to leave it.

use std::fmt;

use crate::error::{BoardError, MoveError};

/// One of the two players, and the row of pits they own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Player, Side::Opponent];

    /// Numeric index used on the wire (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Get side name for display
    pub fn name(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

impl TryFrom<usize> for Side {
    type Error = MoveError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Side::Player),
            1 => Ok(Side::Opponent),
            other => Err(MoveError::InvalidSide(other)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// A pit on the board. Index `pits_per_side` is the side's store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PitId {
    pub side: Side,
    pub index: usize,
}

impl PitId {
    pub const fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }
}

impl fmt::Display for PitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.side, self.index)
    }
}

/// Handle of a single stone token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoneId(pub u32);

impl fmt::Display for StoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sowing path through the pits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// One row per side. Sowing runs along the row, into the store, then on
    /// to the other side's first pit.
    Ring,
    /// Two rows per side (outer row `0..R`, inner row `R..2R`). Sowing circles
    /// the side's own pits and never reaches a store.
    TwoRow,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    layout: Layout,
    pits_per_side: usize,
    /// `pits[side][index]`, with the store last.
    pits: [Vec<Vec<StoneId>>; 2],
    /// Current pit of every stone, indexed by `StoneId`.
    locations: Vec<PitId>,
}

impl Board {
    /// Create a board with `stones_per_pit` tokens in every non-store pit.
    ///
    /// Tokens are numbered from 0, side 0 first, pits in ascending order.
    pub fn new(layout: Layout, pits_per_side: usize, stones_per_pit: usize) -> Self {
        let mut locations = Vec::with_capacity(2 * pits_per_side * stones_per_pit);
        let pits = Side::ALL.map(|side| {
            let mut row: Vec<Vec<StoneId>> = Vec::with_capacity(pits_per_side + 1);
            for index in 0..pits_per_side {
                let pit = PitId::new(side, index);
                let stones = (0..stones_per_pit)
                    .map(|_| {
                        let id = StoneId(locations.len() as u32);
                        locations.push(pit);
                        id
                    })
                    .collect();
                row.push(stones);
            }
            row.push(Vec::new());
            row
        });
        Self {
            layout,
            pits_per_side,
            pits,
            locations,
        }
    }

    /// Build a board from explicit stone counts, e.g. to set up a position.
    ///
    /// `rows[side]` holds the counts of that side's sowable pits. Tokens are
    /// numbered in the same order as [`Board::new`], stores last.
    pub fn from_counts(
        layout: Layout,
        rows: [&[usize]; 2],
        stores: [usize; 2],
    ) -> Result<Self, BoardError> {
        if rows[0].len() != rows[1].len() {
            return Err(BoardError::RowLengthMismatch {
                first: rows[0].len(),
                second: rows[1].len(),
            });
        }
        let pits_per_side = rows[0].len();
        let mut board = Board::new(layout, pits_per_side, 0);
        let mut next = 0u32;
        for side in Side::ALL {
            let counts = rows[side.index()].iter().copied().enumerate();
            let store = (pits_per_side, stores[side.index()]);
            for (index, count) in counts.chain(std::iter::once(store)) {
                let pit = PitId::new(side, index);
                for _ in 0..count {
                    board.locations.push(pit);
                    board.pits[side.index()][index].push(StoneId(next));
                    next += 1;
                }
            }
        }
        Ok(board)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of sowable pits per side (the store is not counted).
    pub fn pits_per_side(&self) -> usize {
        self.pits_per_side
    }

    /// Pits in one row: half a side on a two-row board, a whole side otherwise.
    pub fn row_len(&self) -> usize {
        match self.layout {
            Layout::Ring => self.pits_per_side,
            Layout::TwoRow => self.pits_per_side / 2,
        }
    }

    pub fn store(&self, side: Side) -> PitId {
        PitId::new(side, self.pits_per_side)
    }

    pub fn is_store(&self, pit: PitId) -> bool {
        pit.index == self.pits_per_side
    }

    pub fn stone_count(&self, pit: PitId) -> usize {
        self.pits[pit.side.index()][pit.index].len()
    }

    /// Tokens in a pit, oldest first.
    pub fn stones(&self, pit: PitId) -> &[StoneId] {
        &self.pits[pit.side.index()][pit.index]
    }

    /// Pop the most recently added stone from a pit.
    pub fn remove_stone(&mut self, pit: PitId) -> Result<StoneId, BoardError> {
        self.pits[pit.side.index()][pit.index]
            .pop()
            .ok_or(BoardError::EmptyPit(pit))
    }

    /// Drop a stone into a pit and record its new location.
    pub fn add_stone(&mut self, pit: PitId, stone: StoneId) {
        self.pits[pit.side.index()][pit.index].push(stone);
        self.locations[stone.0 as usize] = pit;
    }

    /// Empty a pit, returning its stones oldest first.
    ///
    /// The stones keep their recorded location until they are added elsewhere.
    pub fn take_all(&mut self, pit: PitId) -> Vec<StoneId> {
        std::mem::take(&mut self.pits[pit.side.index()][pit.index])
    }

    /// Total stones in a side's non-store pits.
    pub fn row_sum(&self, side: Side) -> usize {
        self.pits[side.index()][..self.pits_per_side]
            .iter()
            .map(Vec::len)
            .sum()
    }

    pub fn store_count(&self, side: Side) -> usize {
        self.stone_count(self.store(side))
    }

    pub fn total_stones(&self) -> usize {
        self.pits.iter().flatten().map(Vec::len).sum()
    }

    /// Current pit of a stone, or `None` for an unknown token.
    pub fn locate(&self, stone: StoneId) -> Option<PitId> {
        self.locations.get(stone.0 as usize).copied()
    }

    /// Indices of a side's non-empty sowable pits.
    pub fn non_empty_pits(&self, side: Side) -> impl Iterator<Item = usize> + '_ {
        (0..self.pits_per_side).filter(move |&n| !self.pits[side.index()][n].is_empty())
    }

    /// The next pit along the sowing path.
    pub fn next_pit(&self, pit: PitId) -> PitId {
        match self.layout {
            Layout::Ring => {
                if pit.index >= self.pits_per_side {
                    PitId::new(pit.side.other(), 0)
                } else {
                    PitId::new(pit.side, pit.index + 1)
                }
            }
            Layout::TwoRow => PitId::new(pit.side, (pit.index + 1) % self.pits_per_side),
        }
    }

    /// The pit directly across the board on a ring layout.
    pub fn opposite(&self, pit: PitId) -> PitId {
        PitId::new(pit.side.other(), self.pits_per_side - 1 - pit.index)
    }

    /// Whether a pit lies in its side's inner row (two-row layout only).
    pub fn is_inner_row(&self, pit: PitId) -> bool {
        self.layout == Layout::TwoRow
            && !self.is_store(pit)
            && pit.index / self.row_len() == 1
    }

    /// The two opposing pits facing an inner-row pit on a two-row board.
    ///
    /// For row length `R` and inner pit `n` these are `(other, n - R)` and
    /// `(other, 3R - 1 - n)`. Returns `None` for any other pit.
    pub fn bao_neighbours(&self, pit: PitId) -> Option<[PitId; 2]> {
        if !self.is_inner_row(pit) {
            return None;
        }
        let r = self.row_len();
        let other = pit.side.other();
        Some([
            PitId::new(other, pit.index - r),
            PitId::new(other, 3 * r - 1 - pit.index),
        ])
    }

    fn fmt_row<I>(&self, f: &mut fmt::Formatter<'_>, side: Side, indices: I) -> fmt::Result
    where
        I: Iterator<Item = usize>,
    {
        write!(f, "      ")?;
        for n in indices {
            write!(f, "{:>3} ", self.stone_count(PitId::new(side, n)))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let k = self.pits_per_side;
        match self.layout {
            Layout::Ring => {
                // Side 1 is drawn right to left so that sowing runs counter-clockwise.
                self.fmt_row(f, Side::Opponent, (0..k).rev())?;
                writeln!(
                    f,
                    "{:>4}  {}{:>3}",
                    self.store_count(Side::Opponent),
                    " ".repeat(4 * k),
                    self.store_count(Side::Player)
                )?;
                self.fmt_row(f, Side::Player, 0..k)?;
            }
            Layout::TwoRow => {
                let r = self.row_len();
                writeln!(f, "store {}: {}", Side::Opponent, self.store_count(Side::Opponent))?;
                self.fmt_row(f, Side::Opponent, 0..r)?;
                self.fmt_row(f, Side::Opponent, r..k)?;
                self.fmt_row(f, Side::Player, r..k)?;
                self.fmt_row(f, Side::Player, 0..r)?;
                writeln!(f, "store {}: {}", Side::Player, self.store_count(Side::Player))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_counts() {
        let board = Board::new(Layout::Ring, 6, 4);
        for side in Side::ALL {
            for n in 0..6 {
                assert_eq!(board.stone_count(PitId::new(side, n)), 4);
            }
            assert_eq!(board.store_count(side), 0);
            assert_eq!(board.row_sum(side), 24);
        }
        assert_eq!(board.total_stones(), 48);
    }

    #[test]
    fn test_tokens_numbered_in_order() {
        let board = Board::new(Layout::Ring, 2, 2);
        assert_eq!(board.stones(PitId::new(Side::Player, 0)), &[StoneId(0), StoneId(1)]);
        assert_eq!(board.stones(PitId::new(Side::Opponent, 1)), &[StoneId(6), StoneId(7)]);
        assert_eq!(board.locate(StoneId(5)), Some(PitId::new(Side::Opponent, 0)));
        assert_eq!(board.locate(StoneId(8)), None);
    }

    #[test]
    fn test_remove_is_last_in_first_out() {
        let mut board = Board::new(Layout::Ring, 6, 2);
        let from = PitId::new(Side::Player, 0);
        let to = PitId::new(Side::Player, 1);

        let stone = board.remove_stone(from).unwrap();
        assert_eq!(stone, StoneId(1));
        board.add_stone(to, stone);
        assert_eq!(board.locate(stone), Some(to));
        assert_eq!(board.remove_stone(to).unwrap(), stone);

        board.remove_stone(from).unwrap();
        assert_eq!(board.remove_stone(from), Err(BoardError::EmptyPit(from)));
    }

    #[test]
    fn test_ring_next_pit_wraps_through_store() {
        let board = Board::new(Layout::Ring, 6, 4);
        let last = PitId::new(Side::Player, 5);
        assert_eq!(board.next_pit(last), board.store(Side::Player));
        assert_eq!(
            board.next_pit(board.store(Side::Player)),
            PitId::new(Side::Opponent, 0)
        );
        assert_eq!(
            board.next_pit(board.store(Side::Opponent)),
            PitId::new(Side::Player, 0)
        );
    }

    #[test]
    fn test_two_row_next_pit_stays_on_side() {
        let board = Board::new(Layout::TwoRow, 16, 1);
        assert_eq!(
            board.next_pit(PitId::new(Side::Opponent, 15)),
            PitId::new(Side::Opponent, 0)
        );
        assert_eq!(
            board.next_pit(PitId::new(Side::Player, 7)),
            PitId::new(Side::Player, 8)
        );
    }

    #[test]
    fn test_opposite() {
        let board = Board::new(Layout::Ring, 6, 4);
        assert_eq!(
            board.opposite(PitId::new(Side::Player, 0)),
            PitId::new(Side::Opponent, 5)
        );
        assert_eq!(
            board.opposite(PitId::new(Side::Opponent, 2)),
            PitId::new(Side::Player, 3)
        );
    }

    #[test]
    fn test_bao_neighbours() {
        let board = Board::new(Layout::TwoRow, 16, 1);
        assert!(!board.is_inner_row(PitId::new(Side::Player, 7)));
        assert!(board.is_inner_row(PitId::new(Side::Player, 8)));
        assert_eq!(board.bao_neighbours(PitId::new(Side::Player, 3)), None);
        assert_eq!(
            board.bao_neighbours(PitId::new(Side::Player, 8)),
            Some([PitId::new(Side::Opponent, 0), PitId::new(Side::Opponent, 15)])
        );
        assert_eq!(
            board.bao_neighbours(PitId::new(Side::Opponent, 15)),
            Some([PitId::new(Side::Player, 7), PitId::new(Side::Player, 8)])
        );
    }

    #[test]
    fn test_take_all_preserves_order() {
        let mut board = Board::new(Layout::Ring, 3, 3);
        let pit = PitId::new(Side::Player, 1);
        let taken = board.take_all(pit);
        assert_eq!(taken, vec![StoneId(3), StoneId(4), StoneId(5)]);
        assert_eq!(board.stone_count(pit), 0);
        assert_eq!(board.total_stones(), 15);
    }

    #[test]
    fn test_from_counts() {
        let board = Board::from_counts(Layout::Ring, [&[1, 0, 2], &[0, 3, 0]], [4, 0]).unwrap();
        assert_eq!(board.pits_per_side(), 3);
        assert_eq!(board.row_sum(Side::Player), 3);
        assert_eq!(board.row_sum(Side::Opponent), 3);
        assert_eq!(board.store_count(Side::Player), 4);
        assert_eq!(board.total_stones(), 10);
        assert_eq!(board.locate(StoneId(9)), Some(PitId::new(Side::Opponent, 1)));

        let err = Board::from_counts(Layout::Ring, [&[1, 2], &[1]], [0, 0]).unwrap_err();
        assert_eq!(err, BoardError::RowLengthMismatch { first: 2, second: 1 });
    }

    #[test]
    fn test_side_conversion() {
        assert_eq!(Side::try_from(0), Ok(Side::Player));
        assert_eq!(Side::try_from(1), Ok(Side::Opponent));
        assert_eq!(Side::try_from(2), Err(MoveError::InvalidSide(2)));
        assert_eq!(Side::Player.other(), Side::Opponent);
    }

    #[test]
    fn test_display_mentions_every_pit() {
        let board = Board::new(Layout::Ring, 6, 4);
        let text = board.to_string();
        assert_eq!(text.lines().count(), 3);
        assert_eq!(text.matches('4').count(), 12);

        let bao = Board::new(Layout::TwoRow, 16, 1);
        assert_eq!(bao.to_string().lines().count(), 6);
    }
}
