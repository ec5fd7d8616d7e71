//! # Connect Four minimax engine
//!
//! Board model, four-in-a-row detection, a positional heuristic and a
//! depth-bounded minimax search with alpha-beta pruning that picks the
//! computer's column. Rendering and input handling stay with the caller; the
//! `connect4-cli` binary is a small text driver on top of this crate.
//!
//! ```
//! use connect4_minimax::{choose_move, Gameboard, Player};
//!
//! let mut board = Gameboard::<7, 6>::new();
//! board.insert_player_chip(3, Player::Player1).unwrap();
//!
//! let (column, _score) = choose_move(&board, 5, Player::Player2).unwrap();
//! assert!(board.is_column_playable(column).unwrap());
//! ```

#![deny(missing_debug_implementations)]

pub mod ai_player;
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod minmax;

pub use ai_player::ComputerPlayer;
pub use config::EngineConfig;
pub use error::{ConfigError, GameError, GameboardError, ParseBoardError, SearchError};
pub use eval::{best_scoring_move, score_position};
pub use game::{Game, GameStatus, Gameboard, Player};
pub use minmax::{SearchResult, Searcher, TerminalScores, choose_move};
