//! Full games between two agents.
//!
//! A playout starts from the empty board and alternates the two agents until
//! the board is terminal. Every move goes through [`apply`], so an agent that
//! answers with an occupied cell ends the playout with an error instead of
//! corrupting the board.

use tracing::{debug, info, instrument};

use crate::agent::Agent;
use crate::board::{Action, Board, Player, apply, current_player};
use crate::error::{Error, Result};
use crate::rules::{is_terminal, winner};

/// Outcome of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Moves in the order they were played, X first.
    pub moves: Vec<Action>,
    pub final_board: Board,
    /// `None` for a draw.
    pub winner: Option<Player>,
}

/// Win/draw tallies over a series of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesSummary {
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl SeriesSummary {
    fn record(&mut self, winner: Option<Player>) {
        self.games += 1;
        match winner {
            Some(Player::X) => self.x_wins += 1,
            Some(Player::O) => self.o_wins += 1,
            None => self.draws += 1,
        }
    }
}

/// Play one game with `x` moving first.
pub fn play_game(x: &mut dyn Agent, o: &mut dyn Agent) -> Result<GameRecord> {
    let mut board = Board::new();
    let mut moves = Vec::new();

    while !is_terminal(&board) {
        let action = match current_player(&board) {
            Player::X => select(x, &board)?,
            Player::O => select(o, &board)?,
        };
        board = apply(&board, action)?;
        moves.push(action);
    }

    Ok(GameRecord {
        moves,
        final_board: board,
        winner: winner(&board),
    })
}

fn select(agent: &mut dyn Agent, board: &Board) -> Result<Action> {
    let action = agent.select(board).ok_or_else(|| Error::NoMove {
        agent: agent.name().to_string(),
    })?;
    debug!(agent = agent.name(), %action, "move");
    Ok(action)
}

/// Play `games` games with the same seating and tally the results.
#[instrument(skip(x, o), fields(x = x.name(), o = o.name()))]
pub fn play_series(x: &mut dyn Agent, o: &mut dyn Agent, games: usize) -> Result<SeriesSummary> {
    let mut summary = SeriesSummary::default();
    for _ in 0..games {
        let record = play_game(x, o)?;
        summary.record(record.winner);
    }
    info!(
        x_wins = summary.x_wins,
        o_wins = summary.o_wins,
        draws = summary.draws,
        "series finished"
    );
    Ok(summary)
}
