//! This module defines the core data structures and types shared by the tape, the transition
//! table and the execution engine, including the reserved symbols, head directions and error
//! types.

use serde::{Deserialize, Serialize};
use std::collections::TryReserveError;
use thiserror::Error;

/// The symbol held by every cell that was never written.
pub const BLANK_SYMBOL: char = '_';
/// Matches any symbol when read, leaves the cell untouched when written and keeps the current
/// state when used as a next state.
pub const WILDCARD: char = '*';
/// The wildcard as it appears in the next-state column.
pub const WILDCARD_STATE: &str = "*";
/// Record separator skipped when filling the initial tape.
pub const LINE_SEPARATOR: char = '\n';
/// The state every run starts in.
pub const INITIAL_STATE: &str = "0";
/// The only state that stops the machine.
pub const HALT_STATE: &str = "halt";

/// Move symbol for [`Direction::Left`].
pub const MOVE_LEFT: char = 'l';
/// Move symbol for [`Direction::Right`].
pub const MOVE_RIGHT: char = 'r';
/// Move symbol for [`Direction::Stay`].
pub const MOVE_STAY: char = '*';

/// Represents the possible directions the tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// Maps a move symbol from a transition record to a direction.
    ///
    /// Returns `None` for anything other than `l`, `r` or `*`.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            MOVE_LEFT => Some(Direction::Left),
            MOVE_RIGHT => Some(Direction::Right),
            MOVE_STAY => Some(Direction::Stay),
            _ => None,
        }
    }

    /// Returns the symbol this direction is written as in a transition record.
    pub fn symbol(self) -> char {
        match self {
            Direction::Left => MOVE_LEFT,
            Direction::Right => MOVE_RIGHT,
            Direction::Stay => MOVE_STAY,
        }
    }
}

/// Errors raised while materializing tape cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TapeError {
    /// The backing storage could not grow.
    #[error("Allocation failure: {0}")]
    Allocation(#[from] TryReserveError),
    /// The tape already holds the configured maximum number of cells.
    #[error("Tape cell limit of {0} reached")]
    LimitReached(usize),
}

/// Errors raised while loading a transition table or an initial tape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// A transition record moves the head with something other than `l`, `r` or `*`.
    #[error("Invalid move symbol '{symbol}' on line {line}: moving symbols are only 'l', 'r' and '*'")]
    InvalidMoveSymbol { line: usize, symbol: char },
    /// A source file could not be read.
    #[error("File error: {0}")]
    FileError(String),
    /// The initial tape could not be allocated.
    #[error(transparent)]
    Tape(#[from] TapeError),
}

/// Errors that end a run. All of them are terminal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// No rule matches the current state and symbol.
    #[error("There is no rule for state {state} with symbol {symbol}")]
    NoMatchingRule { state: String, symbol: char },
    /// The head could not move because a new cell could not be materialized.
    #[error("{0}! Most likely the Turing machine went into an infinite loop")]
    TapeExhausted(#[source] TapeError),
    /// The configured step limit was reached before the machine halted.
    #[error("Step limit of {0} reached before the machine halted")]
    StepLimitExceeded(usize),
    /// Reading a debug command or writing debug output failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SimulationError {
    fn from(error: std::io::Error) -> Self {
        SimulationError::Io(error.to_string())
    }
}

/// Any error that ends a load-and-run of the emulator. Tape errors arrive wrapped in one of
/// the two stages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}
