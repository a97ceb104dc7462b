//! Mancala-Rust: a sowing-game engine for the mancala family.
//!
//! Three rule variants share one board model: classic (single sow, extra turn
//! in the own store), congklak (relay sowing with empty-pit captures) and bao
//! (two rows per side with inner-row captures). The engine runs each turn to
//! completion and reports every stone it moved, so a front end can animate
//! the turn however it likes.
//!
//! ## Modules
//!
//! - [`constants`] - Default board shapes and limits
//! - [`board`] - Pits, stores and stone tokens
//! - [`config`] - Variants and game configuration
//! - [`error`] - Error types
//! - [`sowing`] - The sowing primitive and move instructions
//! - [`classic`] - Classic turn rules
//! - [`capture`] - Relay sowing and captures for congklak and bao
//! - [`game`] - Turn order, completion and scoring
//! - [`playout`] - Random opponent and random playouts
//! - [`protocol`] - Line-based text protocol
//!
//! ## Example
//!
//! ```
//! use mancala_rust::board::Side;
//! use mancala_rust::config::{GameConfig, Variant};
//! use mancala_rust::game::Game;
//!
//! let mut game = Game::new(GameConfig::for_variant(Variant::Classic)).unwrap();
//!
//! // Four stones from pit 2 end in side 0's store: side 0 moves again.
//! let moves = game.select_pit(Side::Player, 2).unwrap();
//! assert_eq!(moves.len(), 4);
//! assert_eq!(game.turn(), Side::Player);
//! ```

pub mod board;
pub mod capture;
pub mod classic;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod playout;
pub mod protocol;
pub mod sowing;
