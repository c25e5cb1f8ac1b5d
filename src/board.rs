//! Board model, move generation, and the transition function.
//!
//! A [`Board`] is a plain `Copy` value: [`apply`] returns a fresh board and
//! never touches its input. The player to move is never stored; it is derived
//! from the occupancy counts by [`current_player`], so the two cannot drift
//! apart.

use std::fmt;
use std::str::FromStr;

use crate::constants::{CELLS, EMPTY, MARK_O, MARK_X, N};
use crate::error::{Error, Result};
use crate::rules::has_line;

/// One of the two players. `X` always moves first and is the maximizer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// The other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn mark(self) -> char {
        match self {
            Player::X => MARK_X,
            Player::O => MARK_O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark())
    }
}

impl FromStr for Player {
    type Err = Error;

    /// Accepts `x`/`o` as well as the Go-style aliases `b`/`black` and `w`/`white`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x" | "b" | "black" => Ok(Player::X),
            "o" | "w" | "white" => Ok(Player::O),
            _ => Err(Error::InvalidPlayer(s.to_string())),
        }
    }
}

/// Contents of a single cell.
pub type Cell = Option<Player>;

/// A move: the `(row, col)` of an empty cell, row 0 at the top.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    /// Create an action.
    ///
    /// # Panics
    /// If either coordinate is outside the board. Out-of-range coordinates are
    /// a caller bug, not a recoverable condition.
    pub fn new(row: usize, col: usize) -> Self {
        assert!(
            row < N && col < N,
            "action ({row}, {col}) is outside the {N}x{N} board"
        );
        Self { row, col }
    }

    /// Action for a flat row-major cell index.
    pub fn from_index(idx: usize) -> Self {
        Self::new(idx / N, idx % N)
    }

    /// Flat row-major cell index.
    #[inline]
    pub fn index(self) -> usize {
        self.row * N + self.col
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&str_coord(*self))
    }
}

/// A 3x3 board. Every board reachable through the public API could arise from
/// legal alternating play: `count(X) - count(O)` is 0 or 1, at most one
/// player has a line, and nobody moved after the game was won.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// The empty starting board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of cell `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[Action::new(row, col).index()]
    }

    /// Contents of the cell at a flat index.
    #[inline]
    pub fn cell(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Number of marks placed by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&c| c == Some(player)).count()
    }

    /// Number of marks on the board.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Compact row-major form accepted by [`Board::from_str`], e.g. `X.O/.X./..O`.
    pub fn to_compact(&self) -> String {
        let mut s = String::with_capacity(CELLS + N - 1);
        for (i, c) in self.cells.iter().enumerate() {
            if i > 0 && i % N == 0 {
                s.push('/');
            }
            s.push(c.map_or(EMPTY, Player::mark));
        }
        s
    }
}

/// The player whose turn it is: X when both have placed the same number of
/// marks, O otherwise.
pub fn current_player(board: &Board) -> Player {
    if board.count(Player::X) == board.count(Player::O) {
        Player::X
    } else {
        Player::O
    }
}

pub fn is_cell_empty(board: &Board, row: usize, col: usize) -> bool {
    board.get(row, col).is_none()
}

/// Every empty cell, in row-major order. Empty on a full board.
///
/// The order is fixed so that tie-breaking in the search is reproducible.
pub fn legal_actions(board: &Board) -> Vec<Action> {
    (0..CELLS)
        .filter(|&i| board.cells[i].is_none())
        .map(Action::from_index)
        .collect()
}

/// The board after the player to move marks `action`.
///
/// # Errors
/// [`Error::InvalidMove`] if the target cell is occupied. The input board is
/// untouched either way.
pub fn apply(board: &Board, action: Action) -> Result<Board> {
    let idx = action.index();
    if board.cells[idx].is_some() {
        return Err(Error::InvalidMove { action });
    }
    let mut next = *board;
    next.cells[idx] = Some(current_player(board));
    Ok(next)
}

/// Parse a coordinate string such as `"B2"` into an action.
///
/// Columns are letters `A`..`C` from the left, rows are numbers `1`..`3`
/// counted from the bottom, so `A3` is the top-left cell.
pub fn parse_coord(s: &str) -> Result<Action> {
    let bytes = s.trim().as_bytes();
    let invalid = || Error::InvalidCoord(s.to_string());
    if bytes.len() != 2 {
        return Err(invalid());
    }

    let col = bytes[0].to_ascii_uppercase().wrapping_sub(b'A') as usize;
    let rank = bytes[1].wrapping_sub(b'0') as usize;
    if col >= N || rank == 0 || rank > N {
        return Err(invalid());
    }
    Ok(Action::new(N - rank, col))
}

/// Convert an action to its coordinate string, e.g. `(0, 0)` -> `"A3"`.
pub fn str_coord(action: Action) -> String {
    let c = (b'A' + action.col as u8) as char;
    format!("{c}{}", N - action.row)
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidBoard {
            input: s.to_string(),
            reason,
        };

        let mut cells = [None; CELLS];
        let mut n = 0;
        for ch in s.chars().filter(|c| !c.is_whitespace() && *c != '/' && *c != '|') {
            if n == CELLS {
                return Err(invalid(format!("more than {CELLS} cells")));
            }
            cells[n] = match ch {
                'X' | 'x' => Some(Player::X),
                'O' | 'o' => Some(Player::O),
                '.' | '-' | '_' => None,
                other => return Err(invalid(format!("unexpected character '{other}'"))),
            };
            n += 1;
        }
        if n != CELLS {
            return Err(invalid(format!("expected {CELLS} cells, got {n}")));
        }

        let board = Board { cells };
        let x_count = board.count(Player::X);
        let o_count = board.count(Player::O);
        if x_count != o_count && x_count != o_count + 1 {
            return Err(Error::InvalidPieceCounts { x_count, o_count });
        }

        // A winning move ends the game, so the winner made the last mark.
        let x_line = has_line(&board, Player::X);
        let o_line = has_line(&board, Player::O);
        if x_line && o_line {
            return Err(invalid("both players have a complete line".to_string()));
        }
        if x_line && x_count != o_count + 1 {
            return Err(invalid("O moved after X had already won".to_string()));
        }
        if o_line && x_count != o_count {
            return Err(invalid("X moved after O had already won".to_string()));
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            for col in 0..N {
                let ch = self.get(row, col).map_or(EMPTY, Player::mark);
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board() {
        let b = Board::new();
        assert_eq!(b.occupied(), 0);
        assert_eq!(current_player(&b), Player::X);
        assert_eq!(legal_actions(&b).len(), CELLS);
        assert!(is_cell_empty(&b, 1, 1));
    }

    #[test]
    fn test_current_player_alternates() {
        assert_eq!(current_player(&board("X../.../...")), Player::O);
        assert_eq!(current_player(&board("XO./.../...")), Player::X);
    }

    #[test]
    fn test_player_from_str_aliases() {
        for s in ["x", "X", "b", "black", "BLACK"] {
            assert_eq!(s.parse::<Player>().unwrap(), Player::X, "{s}");
        }
        for s in ["o", "O", "w", "white"] {
            assert_eq!(s.parse::<Player>().unwrap(), Player::O, "{s}");
        }
        assert_eq!(
            "red".parse::<Player>().unwrap_err(),
            Error::InvalidPlayer("red".to_string())
        );
    }

    #[test]
    fn test_legal_actions_row_major() {
        let b = board("XO./.X./O..");
        let actions = legal_actions(&b);
        assert_eq!(
            actions,
            vec![
                Action::new(0, 2),
                Action::new(1, 0),
                Action::new(1, 2),
                Action::new(2, 1),
                Action::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_legal_actions_full_board() {
        let b = board("XOX/XOO/OXX");
        assert!(legal_actions(&b).is_empty());
    }

    #[test]
    fn test_apply_places_current_player() {
        let b = Board::new();
        let next = apply(&b, Action::new(1, 1)).unwrap();
        assert_eq!(next.get(1, 1), Some(Player::X));
        assert_eq!(b, Board::new(), "input must not change");

        let next = apply(&next, Action::new(0, 0)).unwrap();
        assert_eq!(next.get(0, 0), Some(Player::O));
    }

    #[test]
    fn test_apply_occupied_fails() {
        let b = board("X../.../...");
        let err = apply(&b, Action::new(0, 0)).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidMove {
                action: Action::new(0, 0)
            }
        );
        assert_eq!(b, board("X../.../..."));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_action_out_of_range_panics() {
        let _ = Action::new(3, 0);
    }

    #[test]
    fn test_parse_str_coord_roundtrip() {
        for idx in 0..CELLS {
            let a = Action::from_index(idx);
            assert_eq!(parse_coord(&str_coord(a)).unwrap(), a);
        }
        assert_eq!(parse_coord("a3").unwrap(), Action::new(0, 0));
        assert_eq!(parse_coord("C1").unwrap(), Action::new(2, 2));
    }

    #[test]
    fn test_parse_coord_rejects_garbage() {
        for s in ["", "D1", "A0", "A4", "B", "B22", "pass"] {
            assert!(parse_coord(s).is_err(), "{s} should not parse");
        }
    }

    #[test]
    fn test_board_from_str_rejects_bad_counts() {
        let err = "XX./.../...".parse::<Board>().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidPieceCounts {
                x_count: 2,
                o_count: 0
            }
        );
        assert!("O../.../...".parse::<Board>().is_err());
    }

    #[test]
    fn test_board_from_str_rejects_two_winners() {
        let err = "XXX/OOO/...".parse::<Board>().unwrap_err();
        assert!(
            matches!(&err, Error::InvalidBoard { reason, .. } if reason.contains("both players")),
            "{err}"
        );
    }

    #[test]
    fn test_board_from_str_rejects_moves_after_win() {
        // X completed the top row, then O still moved.
        assert!(matches!(
            "XXX/OO./O..".parse::<Board>(),
            Err(Error::InvalidBoard { .. })
        ));
        // O completed the middle row, then X still moved.
        assert!(matches!(
            "XX./OOO/XX.".parse::<Board>(),
            Err(Error::InvalidBoard { .. })
        ));
        // The winner's own final mark is fine, including a double line.
        assert!("XXX/OO./...".parse::<Board>().is_ok());
        assert!("XO./OX./..X".parse::<Board>().is_ok());
        assert!("XXX/XOO/XOO".parse::<Board>().is_ok());
    }

    #[test]
    fn test_board_from_str_rejects_bad_shape() {
        assert!(matches!(
            "XO".parse::<Board>(),
            Err(Error::InvalidBoard { .. })
        ));
        assert!(matches!(
            "X?./.../...".parse::<Board>(),
            Err(Error::InvalidBoard { .. })
        ));
        assert!(matches!(
            "..........".parse::<Board>(),
            Err(Error::InvalidBoard { .. })
        ));
    }

    #[test]
    fn test_compact_roundtrip_and_display() {
        let b = board("x o . | . x . | o . .");
        assert_eq!(b.to_compact(), "XO./.X./O..");
        assert_eq!(board(&b.to_compact()), b);
        assert_eq!(b.to_string(), "X O .\n. X .\nO . .\n");
    }
}
