//! Move-selection strategies that can sit on either side of a game.

use crate::board::{Action, Board, legal_actions};
use crate::search::best_move;

/// Something that picks a move for the player to move.
pub trait Agent {
    /// Short name for logs and reports.
    fn name(&self) -> &str;

    /// The chosen action, or `None` when there is nothing to play.
    fn select(&mut self, board: &Board) -> Option<Action>;
}

/// Plays the alpha-beta search result. Never loses.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxAgent {
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
}

impl MinimaxAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search first-level moves on the rayon pool. Same moves, more threads.
    #[cfg(feature = "parallel")]
    pub fn parallel() -> Self {
        Self { parallel: true }
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn select(&mut self, board: &Board) -> Option<Action> {
        #[cfg(feature = "parallel")]
        if self.parallel {
            return crate::search::best_move_parallel(board);
        }
        best_move(board)
    }
}

/// Plays a uniformly random legal move.
#[derive(Debug)]
pub struct RandomAgent {
    rng: fastrand::Rng,
}

impl RandomAgent {
    /// A random agent with a fixed seed, for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn select(&mut self, board: &Board) -> Option<Action> {
        if crate::rules::is_terminal(board) {
            return None;
        }
        let actions = legal_actions(board);
        self.rng.choice(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_agent_is_reproducible() {
        let board: Board = "X../.O./...".parse().unwrap();
        let mut a = RandomAgent::with_seed(42);
        let mut b = RandomAgent::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.select(&board), b.select(&board));
        }
    }

    #[test]
    fn test_random_agent_picks_legal_moves() {
        let board: Board = "XO./.X./O..".parse().unwrap();
        let legal = legal_actions(&board);
        let mut agent = RandomAgent::with_seed(7);
        for _ in 0..20 {
            let action = agent.select(&board).unwrap();
            assert!(legal.contains(&action));
        }
    }

    #[test]
    fn test_agents_pass_on_finished_game() {
        let board: Board = "XXX/OO./...".parse().unwrap();
        assert_eq!(MinimaxAgent::new().select(&board), None);
        assert_eq!(RandomAgent::with_seed(1).select(&board), None);
    }
}
