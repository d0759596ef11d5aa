//! This module defines the `TuringMachine` struct, which drives a single tape through a
//! transition table until the machine reaches its halting state.
//!
//! The run loop is parameterized by a [`StepHook`], which is told about the initial
//! configuration and about every applied rule. The silent hook turns `run_with` into a plain
//! run to completion; the [`crate::debugger::Debugger`] hook implements interactive stepping.

use crate::config::Config;
use crate::table::{Transition, TransitionTable};
use crate::tape::Tape;
use crate::types::SimulationError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine applied this rule and continues execution.
    Continue(Transition),
    /// The machine is in its halting state.
    Halt,
}

/// Where a run stands.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Running,
    Halted,
    /// The run ended with this error. No further step is attempted.
    Failed(SimulationError),
}

/// A serializable view of the machine between two steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The current state.
    pub state: String,
    /// The number of rules applied so far.
    pub steps: usize,
    /// The logical head position.
    pub head: isize,
    /// The rendered tape, blanks omitted.
    pub tape: String,
}

/// Observes a run. Called once before the first step and once after every applied rule.
///
/// Returning an error aborts the run with that error.
pub trait StepHook {
    fn on_start(&mut self, _machine: &TuringMachine) -> Result<(), SimulationError> {
        Ok(())
    }

    fn on_step(
        &mut self,
        _machine: &TuringMachine,
        _transition: &Transition,
    ) -> Result<(), SimulationError> {
        Ok(())
    }
}

/// A hook that observes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl StepHook for Silent {}

/// Represents a single-tape Turing Machine.
///
/// The machine owns its transition table and its tape, and tracks the current state, the
/// symbol under the head and the number of applied rules.
pub struct TuringMachine {
    table: TransitionTable,
    tape: Tape,
    state: String,
    symbol: char,
    step_count: usize,
    status: Status,
    config: Config,
}

impl TuringMachine {
    /// Creates a machine with the default configuration.
    pub fn new(table: TransitionTable, tape: Tape) -> Self {
        Self::with_config(table, tape, Config::default())
    }

    /// Creates a machine. The configured tape cell limit is applied to `tape`.
    pub fn with_config(table: TransitionTable, mut tape: Tape, config: Config) -> Self {
        tape.set_cell_limit(config.max_tape_cells);

        Self {
            state: config.initial_state.clone(),
            symbol: tape.read(),
            table,
            tape,
            step_count: 0,
            status: Status::Running,
            config,
        }
    }

    /// Executes a single step of the machine's computation.
    ///
    /// Looks up the rule for the current state and symbol, writes its output symbol (the
    /// wildcard leaves the cell as is), moves the head and switches to the next state (the
    /// wildcard keeps the current one).
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue(_))` with the applied rule.
    /// * `Ok(Step::Halt)` if the machine is in its halting state. Nothing is applied.
    ///
    /// # Errors
    ///
    /// * `SimulationError::NoMatchingRule` if no rule applies.
    /// * `SimulationError::TapeExhausted` if the head cannot move onto a new cell.
    /// * `SimulationError::StepLimitExceeded` if the configured step limit is reached.
    ///
    /// Once a step has failed, every later call returns the same error.
    pub fn step(&mut self) -> Result<Step, SimulationError> {
        if let Status::Failed(error) = &self.status {
            return Err(error.clone());
        }

        let result = self.advance();
        match &result {
            Ok(Step::Continue(_)) => {}
            Ok(Step::Halt) => self.status = Status::Halted,
            Err(error) => self.status = Status::Failed(error.clone()),
        }

        result
    }

    fn advance(&mut self) -> Result<Step, SimulationError> {
        if self.is_halted() {
            return Ok(Step::Halt);
        }

        if let Some(limit) = self.config.max_steps {
            if self.step_count >= limit {
                return Err(SimulationError::StepLimitExceeded(limit));
            }
        }

        let transition = self
            .table
            .find_rule(&self.state, self.symbol)
            .cloned()
            .ok_or_else(|| SimulationError::NoMatchingRule {
                state: self.state.clone(),
                symbol: self.symbol,
            })?;

        self.tape.write(transition.write);
        self.tape
            .move_head(transition.direction)
            .map_err(SimulationError::TapeExhausted)?;

        self.state = transition.resolve_next_state(&self.state).to_string();
        self.symbol = self.tape.read();
        self.step_count += 1;

        trace!(
            step = self.step_count,
            rule = %transition,
            state = %self.state,
            symbol = %self.symbol,
            "applied rule"
        );

        Ok(Step::Continue(transition))
    }

    /// Runs the machine silently until it halts and returns the rendered tape.
    pub fn run(&mut self) -> Result<String, SimulationError> {
        self.run_with(&mut Silent)
    }

    /// Runs the machine until it halts, reporting to `hook` along the way, and returns the
    /// rendered tape.
    ///
    /// Every run starts over from the initial state, reading the symbol currently under the
    /// head. The tape itself is left as it is.
    pub fn run_with<H>(&mut self, hook: &mut H) -> Result<String, SimulationError>
    where
        H: StepHook + ?Sized,
    {
        self.restart();
        debug!(state = %self.state, symbol = %self.symbol, "starting run");

        if let Err(error) = hook.on_start(self) {
            self.status = Status::Failed(error.clone());
            return Err(error);
        }

        loop {
            match self.step()? {
                Step::Continue(transition) => {
                    if let Err(error) = hook.on_step(self, &transition) {
                        self.status = Status::Failed(error.clone());
                        return Err(error);
                    }
                }
                Step::Halt => break,
            }
        }

        info!(steps = self.step_count, "machine halted");
        Ok(self.tape.render())
    }

    /// Puts the machine back into its initial state, keeping the tape and the head where they
    /// are.
    pub fn restart(&mut self) {
        self.state = self.config.initial_state.clone();
        self.symbol = self.tape.read();
        self.step_count = 0;
        self.status = Status::Running;
    }

    /// Returns the current state.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the symbol under the head.
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Returns the number of rules applied in the current run.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns `true` if the machine is in its halting state.
    pub fn is_halted(&self) -> bool {
        self.state == self.config.halt_state
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consumes the machine and returns its tape.
    pub fn into_tape(self) -> Tape {
        self.tape
    }

    /// Captures the current configuration.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            steps: self.step_count,
            head: self.tape.position(),
            tape: self.tape.render(),
        }
    }
}
