//! Default board shapes and engine limits.
//!
//! Each variant has a default number of pits per side and stones per pit.
//! These are only defaults: a [`GameConfig`](crate::config::GameConfig) may
//! override both, subject to validation.

// =============================================================================
// Classic
// =============================================================================

/// Sowable pits per side on a classic board.
pub const CLASSIC_PITS: usize = 6;

/// Stones placed in every pit at the start of a classic game.
pub const CLASSIC_STONES: usize = 4;

// =============================================================================
// Congklak
// =============================================================================

/// Sowable pits per side on a congklak board.
pub const CONGKLAK_PITS: usize = 6;

/// Stones placed in every pit at the start of a congklak game.
pub const CONGKLAK_STONES: usize = 7;

// =============================================================================
// Bao
// =============================================================================

/// Pits in one row of a bao board. Each side owns an outer and an inner row.
pub const BAO_ROW_LEN: usize = 8;

/// Sowable pits per side on a bao board (outer row followed by inner row).
pub const BAO_PITS: usize = BAO_ROW_LEN * 2;

/// Stones placed in every pit at the start of a bao game.
pub const BAO_STONES: usize = 1;

// =============================================================================
// Engine limits
// =============================================================================

/// Maximum number of sows in a single turn before relay sowing is cut off.
///
/// Relay sowing (pick up the landing pit and keep going) has no natural bound
/// on arbitrary boards.
pub const RELAY_LIMIT: usize = 1024;

/// Largest accepted number of sowable pits per side.
pub const MAX_PITS: usize = 256;

/// Largest accepted number of starting stones per pit.
pub const MAX_STONES: usize = 1024;

/// Turn cap for random playouts.
pub const MAX_PLAYOUT_TURNS: usize = 10_000;
