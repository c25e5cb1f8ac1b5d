//! Tic-Tac-Toe AI command line.
//!
//! ## Usage
//!
//! - `tictactoe-ai` - Show a demo
//! - `tictactoe-ai protocol` - Start the text protocol server on stdin/stdout
//! - `tictactoe-ai play` - Play against the engine in the terminal
//! - `tictactoe-ai selfplay` - Pit the engine against a random player
//! - `tictactoe-ai analyze <board>` - Search a board and report the result
//!
//! Set `RUST_LOG=debug` to see search statistics on stderr.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tictactoe_ai::agent::{Agent, MinimaxAgent, RandomAgent};
use tictactoe_ai::board::{Board, Player, apply, current_player, parse_coord};
use tictactoe_ai::constants::{DEFAULT_SEED, SELFPLAY_GAMES};
use tictactoe_ai::error::Error;
use tictactoe_ai::playout::{play_game, play_series};
use tictactoe_ai::protocol::ProtocolEngine;
use tictactoe_ai::rules::{is_terminal, winner};
use tictactoe_ai::search::{minimax, search};

/// Tic-Tac-Toe AI: exact minimax search with alpha-beta pruning
#[derive(Parser)]
#[command(name = "tictactoe-ai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text protocol server for use with scripts and front ends
    Protocol,
    /// Play a game against the engine
    Play {
        /// Side the human plays (x moves first)
        #[arg(long, default_value = "x")]
        human: Player,
        /// Search first-level moves in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Play the engine against a random opponent from both seats
    Selfplay {
        /// Games per seating
        #[arg(long, default_value_t = SELFPLAY_GAMES)]
        games: usize,
        /// Seed for the random opponent
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Search first-level moves in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Search a board such as `X.O/.X./...` and print the result
    Analyze {
        board: Board,
    },
    /// Run a simple demo of the engine
    Demo,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Protocol) => {
            let mut engine = ProtocolEngine::new();
            engine
                .run(io::stdin().lock(), io::stdout().lock())
                .context("protocol session failed")?;
        }
        Some(Commands::Play { human, parallel }) => run_play(human, engine(parallel))?,
        Some(Commands::Selfplay {
            games,
            seed,
            parallel,
        }) => run_selfplay(games, seed, parallel)?,
        Some(Commands::Analyze { board }) => run_analyze(&board),
        Some(Commands::Demo) | None => run_demo()?,
    }
    Ok(())
}

fn engine(parallel: bool) -> MinimaxAgent {
    #[cfg(feature = "parallel")]
    if parallel {
        return MinimaxAgent::parallel();
    }
    #[cfg(not(feature = "parallel"))]
    if parallel {
        tracing::warn!("built without the `parallel` feature; searching sequentially");
    }
    MinimaxAgent::new()
}

fn run_play(human: Player, mut engine: MinimaxAgent) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut board = Board::new();

    println!("You are {human}. Enter moves as A1..C3 (column letter, row number from the bottom).\n");
    while !is_terminal(&board) {
        if current_player(&board) != human {
            let action = engine
                .select(&board)
                .context("engine found no move on a running game")?;
            board = apply(&board, action)?;
            println!("Engine plays {action}");
            continue;
        }

        print!("{board}{human} to move> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            bail!("input closed before the game finished");
        };
        let line = line.context("failed to read move")?;
        let action = match parse_coord(&line) {
            Ok(action) => action,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match apply(&board, action) {
            Ok(next) => board = next,
            Err(err @ Error::InvalidMove { .. }) => println!("{err}, try another cell"),
            Err(err) => return Err(err.into()),
        }
    }

    println!("\n{board}");
    match winner(&board) {
        Some(p) if p == human => println!("You win."),
        Some(_) => println!("Engine wins."),
        None => println!("Draw."),
    }
    Ok(())
}

fn run_selfplay(games: usize, seed: u64, parallel: bool) -> Result<()> {
    let mut minimax_agent = engine(parallel);
    let mut random = RandomAgent::with_seed(seed);

    let as_x = play_series(&mut minimax_agent, &mut random, games)?;
    let as_o = play_series(&mut random, &mut minimax_agent, games)?;

    println!("engine as X: {} wins, {} draws, {} losses", as_x.x_wins, as_x.draws, as_x.o_wins);
    println!("engine as O: {} wins, {} draws, {} losses", as_o.o_wins, as_o.draws, as_o.x_wins);
    if as_x.o_wins > 0 || as_o.x_wins > 0 {
        bail!("engine lost a game");
    }
    Ok(())
}

fn run_analyze(board: &Board) {
    let (result, stats) = search(board);
    let reference = minimax(board);

    println!("{board}");
    match result.action {
        Some(action) => println!("{} to move, best move {action}", current_player(board)),
        None => println!("game over"),
    }
    println!("value: {} (exhaustive minimax: {})", result.value, reference.value);
    println!("nodes: {}, cutoffs: {}", stats.nodes, stats.cutoffs);
}

fn run_demo() -> Result<()> {
    println!("Tic-Tac-Toe AI: minimax with alpha-beta pruning\n");

    println!("=== Empty Board ===");
    run_analyze(&Board::new());

    println!("\n=== Engine vs Engine ===");
    let record = play_game(&mut MinimaxAgent::new(), &mut MinimaxAgent::new())?;
    let moves: Vec<String> = record.moves.iter().map(ToString::to_string).collect();
    println!("moves: {}", moves.join(" "));
    print!("{}", record.final_board);
    match record.winner {
        Some(p) => println!("{p} wins"),
        None => println!("draw"),
    }
    Ok(())
}
