//! Terminal detection and scoring.

use crate::board::{Board, Player};
use crate::constants::LINES;

/// The player owning a complete line, if any.
///
/// Lines are checked rows first, then columns, then diagonals, and the first
/// complete one is reported. Legal alternating play never produces two
/// winners, but nothing here relies on that.
pub fn winner(board: &Board) -> Option<Player> {
    LINES.iter().find_map(|&[a, b, c]| {
        let first = board.cell(a)?;
        (board.cell(b) == Some(first) && board.cell(c) == Some(first)).then_some(first)
    })
}

/// True when `player` owns at least one complete line.
pub fn has_line(board: &Board, player: Player) -> bool {
    LINES
        .iter()
        .any(|line| line.iter().all(|&i| board.cell(i) == Some(player)))
}

/// True when the game is over: someone has a line or no cell is left.
pub fn is_terminal(board: &Board) -> bool {
    board.is_full() || winner(board).is_some()
}

/// Final score from X's point of view: `+1` X won, `-1` O won, `0` draw.
///
/// # Panics
/// If the board is not terminal. Scoring an unfinished game is a caller bug.
pub fn utility(board: &Board) -> i32 {
    assert!(
        is_terminal(board),
        "utility called on a running game: {}",
        board.to_compact()
    );
    match winner(board) {
        Some(Player::X) => 1,
        Some(Player::O) => -1,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_no_winner_empty_board() {
        let b = Board::new();
        assert_eq!(winner(&b), None);
        assert!(!is_terminal(&b));
    }

    #[test]
    fn test_winner_top_row() {
        let b = board("XXX/OO./...");
        assert_eq!(winner(&b), Some(Player::X));
        assert!(is_terminal(&b));
        assert_eq!(utility(&b), 1);
    }

    #[test]
    fn test_winner_column() {
        let b = board("XO./XO./.OX");
        assert_eq!(winner(&b), Some(Player::O));
        assert_eq!(utility(&b), -1);
    }

    #[test]
    fn test_winner_diagonals() {
        assert_eq!(winner(&board("XO./OX./..X")), Some(Player::X));
        assert_eq!(winner(&board("XXO/XO./O..")), Some(Player::O));
    }

    #[test]
    fn test_full_board_draw() {
        let b = board("XOX/XOO/OXX");
        assert_eq!(winner(&b), None);
        assert!(is_terminal(&b));
        assert_eq!(utility(&b), 0);
    }

    #[test]
    fn test_full_board_with_win_scores_win() {
        let b = board("XXX/OOX/XOO");
        assert!(is_terminal(&b));
        assert_eq!(utility(&b), 1);
    }

    #[test]
    fn test_has_line() {
        let b = board("XO./XO./X..");
        assert!(has_line(&b, Player::X));
        assert!(!has_line(&b, Player::O));
        assert!(!has_line(&Board::new(), Player::X));
    }

    #[test]
    #[should_panic(expected = "running game")]
    fn test_utility_on_running_game_panics() {
        utility(&board("X../.O./..."));
    }
}
