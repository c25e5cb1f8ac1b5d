//! Tic-Tac-Toe AI: exact minimax search with alpha-beta pruning.
//!
//! The engine searches the full 3x3 game tree from any legal board and
//! returns a provably optimal move. Boards are immutable values and the
//! player to move is derived from the marks on the board.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, winning lines, and defaults
//! - [`board`] - Board model, move generation, and transitions
//! - [`rules`] - Winner detection, terminal test, and scoring
//! - [`search`] - Alpha-beta search and the exhaustive minimax reference
//! - [`agent`] - Minimax and random move selection
//! - [`playout`] - Complete games between agents
//! - [`protocol`] - GTP-style text protocol
//! - [`error`] - Error type
//!
//! ## Example
//!
//! ```
//! use tictactoe_ai::board::{Board, apply};
//! use tictactoe_ai::search::best_move;
//!
//! let board = Board::new();
//! let action = best_move(&board).expect("empty board has moves");
//! let next = apply(&board, action).unwrap();
//! println!("{next}");
//! ```

pub mod agent;
pub mod board;
pub mod constants;
pub mod error;
pub mod playout;
pub mod protocol;
pub mod rules;
pub mod search;

pub use board::{Action, Board, Player};
pub use error::{Error, Result};
pub use search::{SearchResult, best_move};
