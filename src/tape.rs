//! This module defines the `Tape`, the machine's unbounded working memory.
//!
//! Cells are stored in a `VecDeque` so the tape can grow at either end in amortized constant
//! time. Only cells the head has visited (or that were part of the input) are materialized;
//! everything else reads as the blank symbol.

use crate::types::{Direction, TapeError, BLANK_SYMBOL, LINE_SEPARATOR, WILDCARD};
use std::collections::VecDeque;
use std::fmt;

/// A bidirectional tape with a single read/write head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<char>,
    /// Storage index of the cell under the head.
    head: usize,
    /// Storage index of logical position 0.
    origin: usize,
    cell_limit: Option<usize>,
}

impl Tape {
    /// Creates a tape holding `symbols` from position 0 rightwards, with the head on the
    /// leftmost cell.
    ///
    /// Line separators are skipped without consuming a cell. Every symbol goes through
    /// [`Tape::write`], so a wildcard in the input leaves its cell blank. An empty input yields
    /// a single blank cell.
    ///
    /// # Errors
    ///
    /// * `TapeError::Allocation` if the backing storage cannot be allocated.
    pub fn new<I>(symbols: I) -> Result<Self, TapeError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut tape = Self {
            cells: VecDeque::new(),
            head: 0,
            origin: 0,
            cell_limit: None,
        };

        for symbol in symbols.into_iter().filter(|&c| c != LINE_SEPARATOR) {
            tape.cells.try_reserve(1)?;
            tape.cells.push_back(BLANK_SYMBOL);
            tape.head = tape.cells.len() - 1;
            tape.write(symbol);
        }

        if tape.cells.is_empty() {
            tape.cells.try_reserve(1)?;
            tape.cells.push_back(BLANK_SYMBOL);
        }

        tape.seek_to_leftmost();
        Ok(tape)
    }

    /// Creates a tape from the characters of `input`.
    pub fn from_input(input: &str) -> Result<Self, TapeError> {
        Self::new(input.chars())
    }

    /// Caps the number of materialized cells. Growing past the cap fails with
    /// `TapeError::LimitReached`; `None` removes the cap.
    pub fn set_cell_limit(&mut self, limit: Option<usize>) {
        self.cell_limit = limit;
    }

    /// Returns the configured cell cap, if any.
    pub fn cell_limit(&self) -> Option<usize> {
        self.cell_limit
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> char {
        self.cells[self.head]
    }

    /// Writes `symbol` under the head. Writing the wildcard leaves the cell unchanged.
    pub fn write(&mut self, symbol: char) {
        if symbol != WILDCARD {
            self.cells[self.head] = symbol;
        }
    }

    /// Moves the head one cell in `direction`, materializing a blank cell when the head walks
    /// off either end.
    ///
    /// # Errors
    ///
    /// * `TapeError::LimitReached` if a new cell would exceed the configured cap.
    /// * `TapeError::Allocation` if the storage cannot grow.
    pub fn move_head(&mut self, direction: Direction) -> Result<(), TapeError> {
        match direction {
            Direction::Left => {
                if self.head == 0 {
                    self.grow()?;
                    self.cells.push_front(BLANK_SYMBOL);
                    self.origin += 1;
                } else {
                    self.head -= 1;
                }
            }
            Direction::Right => {
                if self.head + 1 == self.cells.len() {
                    self.grow()?;
                    self.cells.push_back(BLANK_SYMBOL);
                }
                self.head += 1;
            }
            Direction::Stay => {}
        }

        Ok(())
    }

    /// Moves the head to the leftmost materialized cell.
    pub fn seek_to_leftmost(&mut self) {
        self.head = 0;
    }

    /// Returns every non-blank symbol from the leftmost to the rightmost materialized cell.
    pub fn render(&self) -> String {
        self.cells.iter().filter(|&&c| c != BLANK_SYMBOL).collect()
    }

    /// Returns the logical position of the head. The first input symbol sits at 0; cells
    /// materialized to its left have negative positions.
    pub fn position(&self) -> isize {
        self.head as isize - self.origin as isize
    }

    /// Returns the storage index of the head, counted from the leftmost materialized cell.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A tape always holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the materialized cells, blanks included, from left to right.
    pub fn cells(&self) -> impl Iterator<Item = char> + '_ {
        self.cells.iter().copied()
    }

    fn grow(&mut self) -> Result<(), TapeError> {
        if let Some(limit) = self.cell_limit {
            if self.cells.len() >= limit {
                return Err(TapeError::LimitReached(limit));
            }
        }

        self.cells.try_reserve(1)?;
        Ok(())
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
