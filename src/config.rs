//! Runtime settings of the execution engine.

use crate::types::{HALT_STATE, INITIAL_STATE};

/// Settings applied to a `TuringMachine`.
///
/// The defaults run the machine from state `0` until it reaches `halt`, with no step or tape
/// limit: a machine that never halts runs until the process is stopped or memory runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The state every run starts in.
    pub initial_state: String,
    /// The state that stops the machine.
    pub halt_state: String,
    /// Fail a run that has not halted after this many steps.
    pub max_steps: Option<usize>,
    /// Fail a run that needs more than this many tape cells.
    pub max_tape_cells: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_state: INITIAL_STATE.to_string(),
            halt_state: HALT_STATE.to_string(),
            max_steps: None,
            max_tape_cells: None,
        }
    }
}

impl Config {
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_max_tape_cells(mut self, max_tape_cells: Option<usize>) -> Self {
        self.max_tape_cells = max_tape_cells;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.initial_state, "0");
        assert_eq!(config.halt_state, "halt");
        assert_eq!(config.max_steps, None);
        assert_eq!(config.max_tape_cells, None);
    }

    #[test]
    fn test_builder() {
        let config = Config::default()
            .with_max_steps(Some(100))
            .with_max_tape_cells(Some(64));

        assert_eq!(config.max_steps, Some(100));
        assert_eq!(config.max_tape_cells, Some(64));
    }
}
