//! This module provides the `ProgramLoader` struct, responsible for loading transition tables
//! and initial tapes from files and strings.

use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::LoadError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// `ProgramLoader` is a utility struct for loading the two inputs of a machine: its transition
/// table and its initial tape.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a transition table from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(TransitionTable)` if the file is read and every record is valid.
    /// * `Err(LoadError::FileError)` if the file cannot be read.
    /// * `Err(LoadError::InvalidMoveSymbol)` if a record moves with an unknown symbol.
    pub fn load_table(path: &Path) -> Result<TransitionTable, LoadError> {
        let content = decode(read_file(path)?);
        let table = Self::load_table_from_string(&content)?;

        debug!(path = %path.display(), rules = table.len(), "loaded transition table");
        Ok(table)
    }

    /// Loads a transition table from the provided string content.
    pub fn load_table_from_string(content: &str) -> Result<TransitionTable, LoadError> {
        TransitionTable::parse(content)
    }

    /// Loads an initial tape from the specified file path.
    ///
    /// Every character of the file becomes one cell, except line separators. A file that is
    /// not valid UTF-8 is read one byte per cell.
    ///
    /// # Returns
    ///
    /// * `Ok(Tape)` with the head on the first cell.
    /// * `Err(LoadError::FileError)` if the file cannot be read.
    /// * `Err(LoadError::Tape)` if the tape cannot be allocated.
    pub fn load_tape(path: &Path) -> Result<Tape, LoadError> {
        let content = decode(read_file(path)?);
        let tape = Self::load_tape_from_string(&content)?;

        debug!(path = %path.display(), cells = tape.len(), "loaded initial tape");
        Ok(tape)
    }

    /// Loads an initial tape from the provided string content.
    pub fn load_tape_from_string(content: &str) -> Result<Tape, LoadError> {
        Ok(Tape::from_input(content)?)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|e| {
        LoadError::FileError(format!("Failed to read file {}: {}", path.display(), e))
    })
}

/// Decodes UTF-8 when possible, otherwise maps every byte to the char with the same value.
fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        debug!(error = %e, "input is not UTF-8, reading raw bytes");
        e.into_bytes().into_iter().map(char::from).collect()
    })
}
