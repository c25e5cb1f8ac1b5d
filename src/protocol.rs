//! Line-oriented text protocol, modelled on the Go Text Protocol.
//!
//! Each request is one line, optionally prefixed by a numeric id. Each
//! response is `=` (success) or `?` (failure), the echoed id, a space, the
//! message, and a terminating blank line. This lets the engine be driven by
//! scripts or by a front end that renders the board and takes human input.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - Engine identity
//! - `list_commands`, `known_command <cmd>` - Command discovery
//! - `quit` - Exit the loop
//! - `boardsize <size>` - Accepted only for 3
//! - `clear_board` - Reset to the empty board
//! - `play <color> <vertex>` - Play a move for the side to move
//! - `genmove <color>` - Search, play, and report the engine's move
//! - `undo` - Take back the last move
//! - `showboard` - Print the board
//! - `setboard <board>` - Load a board such as `X.O/.X./...`
//! - `final_score` - `X+`, `O+` or `0` on a finished game
//!
//! ## Example
//!
//! ```
//! use tictactoe_ai::protocol::ProtocolEngine;
//!
//! let mut engine = ProtocolEngine::new();
//! let mut out = Vec::new();
//! engine.run("1 play x B2\n2 genmove o\n".as_bytes(), &mut out).unwrap();
//! let out = String::from_utf8(out).unwrap();
//! assert!(out.starts_with("=1 \n\n=2 A3\n\n"));
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, instrument};

use crate::board::{Board, Player, apply, current_player, parse_coord};
use crate::constants::{ENGINE_NAME, N, PROTOCOL_VERSION};
use crate::rules::{is_terminal, winner};
use crate::search::best_move;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "setboard",
    "showboard",
    "undo",
    "version",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    /// Current board
    board: Board,
    /// Earlier boards, most recent last, for `undo`
    history: Vec<Board>,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the command loop until `quit` or end of input.
    #[instrument(skip_all)]
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            debug!(%command, ?args, success, %message, "command");

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional numeric command id off the front of the line.
    /// The id must be followed by whitespace or the end of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let (head, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        if !head.bytes().all(|b| b.is_ascii_digit()) {
            return (None, trimmed);
        }
        match head.parse::<u32>() {
            Ok(id) => (Some(id), rest.trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, ENGINE_NAME.to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, PROTOCOL_VERSION.to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "boardsize" => match args.first().map(|s| s.parse::<usize>()) {
                Some(Ok(size)) if size == N => (true, String::new()),
                Some(Ok(size)) => (
                    false,
                    format!("unacceptable size, only {N} is supported (got {size})"),
                ),
                Some(Err(_)) => (false, "invalid size".to_string()),
                None => (false, "missing argument".to_string()),
            },

            "clear_board" => {
                self.board = Board::new();
                self.history.clear();
                (true, String::new())
            }

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                if let Err(msg) = self.check_turn(color) {
                    return (false, msg);
                }
                let action = match parse_coord(vertex) {
                    Ok(action) => action,
                    Err(err) => return (false, err.to_string()),
                };
                match apply(&self.board, action) {
                    Ok(next) => {
                        self.push(next);
                        (true, String::new())
                    }
                    Err(err) => (false, format!("illegal move: {err}")),
                }
            }

            "genmove" => {
                let Some(color) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                if let Err(msg) = self.check_turn(color) {
                    return (false, msg);
                }
                match best_move(&self.board).map(|action| (action, apply(&self.board, action))) {
                    Some((action, Ok(next))) => {
                        self.push(next);
                        (true, action.to_string())
                    }
                    Some((_, Err(err))) => (false, err.to_string()),
                    None => (false, "game is over".to_string()),
                }
            }

            "undo" => match self.history.pop() {
                Some(previous) => {
                    self.board = previous;
                    (true, String::new())
                }
                None => (false, "cannot undo".to_string()),
            },

            "showboard" => (true, format!("\n{}", self.board.to_string().trim_end())),

            "setboard" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args.concat().parse::<Board>() {
                    Ok(board) => {
                        self.board = board;
                        self.history.clear();
                        (true, String::new())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "final_score" => {
                if !is_terminal(&self.board) {
                    return (false, "game is not over".to_string());
                }
                let score = match winner(&self.board) {
                    Some(player) => format!("{player}+"),
                    None => "0".to_string(),
                };
                (true, score)
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Reject moves for the wrong side or on a finished game.
    fn check_turn(&self, color: &str) -> Result<(), String> {
        let player: Player = color.parse().map_err(|err| format!("{err}"))?;
        if is_terminal(&self.board) {
            return Err("game is over".to_string());
        }
        let to_move = current_player(&self.board);
        if player != to_move {
            return Err(format!("it is {to_move}'s turn"));
        }
        Ok(())
    }

    fn push(&mut self, next: Board) {
        self.history.push(self.board);
        self.board = next;
    }
}
