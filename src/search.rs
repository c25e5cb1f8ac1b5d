//! Minimax search with alpha-beta pruning.
//!
//! The search walks the implicit game tree recursively: every node is a
//! [`Board`] value owned by its call frame, and nothing survives between
//! top-level calls. X maximizes, O minimizes, and values are always from X's
//! point of view (`+1` win, `0` draw, `-1` loss).
//!
//! Children are visited in row-major order and only a strictly better value
//! replaces the running best, so among equally good actions the first one in
//! row-major order is returned. Pruning never changes that choice: a sibling
//! searched with a narrowed window can only tie or fail low, and neither
//! replaces the running best.
//!
//! # Example
//!
//! ```
//! use tictactoe_ai::board::{Action, Board};
//! use tictactoe_ai::search::best_move;
//!
//! // X to move with two in the top row.
//! let board: Board = "XX./OO./...".parse().unwrap();
//! assert_eq!(best_move(&board), Some(Action::new(0, 2)));
//! ```

use tracing::{debug, instrument};

use crate::board::{Action, Board, Player, apply, current_player, legal_actions};
use crate::rules::{is_terminal, utility};

/// Bound larger than any utility; `-INF`/`INF` open the initial window.
pub const INF: i32 = i32::MAX;

/// Value of a searched board and the action that achieves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Game value from X's point of view.
    pub value: i32,
    /// Recommended action, `None` on a terminal board.
    pub action: Option<Action>,
}

/// Work counters for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Boards visited, the root included.
    pub nodes: u64,
    /// Times a sibling loop stopped early.
    pub cutoffs: u64,
}

impl std::ops::AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
    }
}

/// The best action for the player to move, or `None` if the game is over.
pub fn best_move(board: &Board) -> Option<Action> {
    search(board).0.action
}

/// Full alpha-beta search from `board`, returning the result and work counters.
#[instrument(level = "debug", skip_all, fields(board = %board.to_compact()))]
pub fn search(board: &Board) -> (SearchResult, SearchStats) {
    let mut stats = SearchStats::default();
    if is_terminal(board) {
        stats.nodes = 1;
        return (
            SearchResult {
                value: utility(board),
                action: None,
            },
            stats,
        );
    }

    let result = match current_player(board) {
        Player::X => max_value(board, -INF, INF, &mut stats),
        Player::O => min_value(board, -INF, INF, &mut stats),
    };
    debug!(
        value = result.value,
        action = ?result.action,
        nodes = stats.nodes,
        cutoffs = stats.cutoffs,
        "search complete"
    );
    (result, stats)
}

/// Maximizing half of the search. Returns the best value X can force within
/// the `(alpha, beta)` window and the first action reaching it.
pub fn max_value(board: &Board, mut alpha: i32, beta: i32, stats: &mut SearchStats) -> SearchResult {
    stats.nodes += 1;
    if is_terminal(board) {
        return SearchResult {
            value: utility(board),
            action: None,
        };
    }

    let mut best = SearchResult {
        value: -INF,
        action: None,
    };
    for action in legal_actions(board) {
        let child = successor(board, action);
        let value = min_value(&child, alpha, beta, stats).value;
        if value > best.value {
            best = SearchResult {
                value,
                action: Some(action),
            };
        }
        alpha = alpha.max(best.value);
        if alpha >= beta {
            stats.cutoffs += 1;
            break;
        }
    }
    best
}

/// Minimizing half of the search, the mirror of [`max_value`].
pub fn min_value(board: &Board, alpha: i32, mut beta: i32, stats: &mut SearchStats) -> SearchResult {
    stats.nodes += 1;
    if is_terminal(board) {
        return SearchResult {
            value: utility(board),
            action: None,
        };
    }

    let mut best = SearchResult {
        value: INF,
        action: None,
    };
    for action in legal_actions(board) {
        let child = successor(board, action);
        let value = max_value(&child, alpha, beta, stats).value;
        if value < best.value {
            best = SearchResult {
                value,
                action: Some(action),
            };
        }
        beta = beta.min(best.value);
        if beta <= alpha {
            stats.cutoffs += 1;
            break;
        }
    }
    best
}

/// Plain minimax without pruning, with the same tie-breaking as the
/// alpha-beta search. Visits the whole subtree.
pub fn minimax(board: &Board) -> SearchResult {
    if is_terminal(board) {
        return SearchResult {
            value: utility(board),
            action: None,
        };
    }

    let maximizing = current_player(board) == Player::X;
    let mut best = SearchResult {
        value: if maximizing { -INF } else { INF },
        action: None,
    };
    for action in legal_actions(board) {
        let value = minimax(&successor(board, action)).value;
        let better = if maximizing {
            value > best.value
        } else {
            value < best.value
        };
        if better {
            best = SearchResult {
                value,
                action: Some(action),
            };
        }
    }
    best
}

/// Same answer as [`best_move`], with each first-level action searched on the
/// rayon pool under its own full window.
#[cfg(feature = "parallel")]
pub fn best_move_parallel(board: &Board) -> Option<Action> {
    search_parallel(board).0.action
}

/// Parallel counterpart of [`search`]. Statistics are summed over all
/// subtrees; since siblings cannot share bounds the node count is higher.
#[cfg(feature = "parallel")]
#[instrument(level = "debug", skip_all, fields(board = %board.to_compact()))]
pub fn search_parallel(board: &Board) -> (SearchResult, SearchStats) {
    use rayon::prelude::*;

    if is_terminal(board) {
        return search(board);
    }

    let player = current_player(board);
    // Collecting an indexed parallel iterator keeps row-major order.
    let scored: Vec<(Action, i32, SearchStats)> = legal_actions(board)
        .par_iter()
        .map(|&action| {
            let child = successor(board, action);
            let mut stats = SearchStats::default();
            let value = match player {
                Player::X => min_value(&child, -INF, INF, &mut stats).value,
                Player::O => max_value(&child, -INF, INF, &mut stats).value,
            };
            (action, value, stats)
        })
        .collect();

    let mut stats = SearchStats {
        nodes: 1,
        cutoffs: 0,
    };
    let mut best = SearchResult {
        value: if player == Player::X { -INF } else { INF },
        action: None,
    };
    for (action, value, sub) in scored {
        stats += sub;
        let better = match player {
            Player::X => value > best.value,
            Player::O => value < best.value,
        };
        if better {
            best = SearchResult {
                value,
                action: Some(action),
            };
        }
    }
    debug!(
        value = best.value,
        action = ?best.action,
        nodes = stats.nodes,
        "parallel search complete"
    );
    (best, stats)
}

/// Apply an action taken from `legal_actions` of the same board.
#[inline]
fn successor(board: &Board, action: Action) -> Board {
    match apply(board, action) {
        Ok(next) => next,
        Err(err) => unreachable!("legal action rejected: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::apply;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_terminal_board_has_no_move() {
        let full = board("XOX/XOO/OXX");
        assert_eq!(best_move(&full), None);
        let (result, stats) = search(&full);
        assert_eq!(result.value, 0);
        assert_eq!(stats.nodes, 1);
    }

    #[test]
    fn test_takes_immediate_win() {
        let b = board("XX./OO./...");
        let action = best_move(&b).unwrap();
        assert_eq!(action, Action::new(0, 2));
        assert_eq!(utility(&apply(&b, action).unwrap()), 1);
    }

    #[test]
    fn test_o_takes_immediate_win() {
        // O to move, can complete the middle row.
        let b = board("XX./OO./X..");
        assert_eq!(best_move(&b), Some(Action::new(1, 2)));
        assert_eq!(search(&b).0.value, -1);
    }

    #[test]
    fn test_blocks_opponent() {
        // X to move; O threatens the left column at (2, 0).
        let b = board("OX./O.X/...");
        assert_eq!(best_move(&b), Some(Action::new(2, 0)));
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let (result, _) = search(&Board::new());
        assert_eq!(result.value, 0);
        // First row-major action reaching the draw.
        assert_eq!(result.action, Some(Action::new(0, 0)));
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let (_, stats) = search(&Board::new());
        // Unpruned tree from the empty board has 549946 nodes.
        assert!(stats.nodes < 549_946, "nodes = {}", stats.nodes);
        assert!(stats.cutoffs > 0);
    }

    #[test]
    fn test_minimax_agrees_on_empty_board() {
        assert_eq!(minimax(&Board::new()), search(&Board::new()).0);
    }

    #[test]
    fn test_deterministic() {
        let b = board("X../.O./...");
        let first = best_move(&b);
        for _ in 0..5 {
            assert_eq!(best_move(&b), first);
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        for s in ["X../.O./...", "XX./OO./...", "OX./O.X/...", "XOX/XOO/OXX", "X../.../..."] {
            let b = board(s);
            assert_eq!(best_move_parallel(&b), best_move(&b), "board {s}");
            assert_eq!(search_parallel(&b).0, search(&b).0, "board {s}");
        }
    }
}
