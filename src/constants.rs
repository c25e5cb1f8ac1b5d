//! Constants for board geometry, protocol identity, and CLI defaults.
//!
//! The board is a fixed 3x3 grid stored as a flat row-major array of
//! [`CELLS`] entries; index `row * N + col` addresses cell `(row, col)`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// The 8 lines that win the game, as flat cell indices.
/// Order: rows top to bottom, columns left to right, then both diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

// =============================================================================
// Cell Characters
// =============================================================================

/// Character for a PlayerA (X) mark.
pub const MARK_X: char = 'X';

/// Character for a PlayerB (O) mark.
pub const MARK_O: char = 'O';

/// Character for an empty cell.
pub const EMPTY: char = '.';

// =============================================================================
// Text Protocol
// =============================================================================

/// Engine name reported by the `name` command.
pub const ENGINE_NAME: &str = "tictactoe-ai";

/// Protocol version reported by `protocol_version`.
pub const PROTOCOL_VERSION: &str = "2";

// =============================================================================
// CLI Defaults
// =============================================================================

/// Default number of games for `selfplay`.
pub const SELFPLAY_GAMES: usize = 100;

/// Default seed for the random opponent.
pub const DEFAULT_SEED: u64 = 1;
