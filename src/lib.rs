//! This crate provides the core logic for a single-tape Turing machine emulator.
//! It includes modules for parsing transition tables, modelling the unbounded tape,
//! executing transitions until the machine halts, stepping through a run interactively,
//! and checking tables for common mistakes.

pub mod analyzer;
pub mod config;
pub mod debugger;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisWarning` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisWarning};
/// Re-exports the engine settings.
pub use config::Config;
/// Re-exports the interactive stepping hook.
pub use debugger::{DebugCommand, Debugger};
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct and its run-loop types from the machine module.
pub use machine::{Silent, Snapshot, Status, Step, StepHook, TuringMachine};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the transition table types.
pub use table::{Record, StateRules, Transition, TransitionTable};
/// Re-exports the `Tape` struct.
pub use tape::Tape;
/// Re-exports the reserved symbols, directions and error types from the types module.
pub use types::{
    Direction, Error, LoadError, SimulationError, TapeError, BLANK_SYMBOL, HALT_STATE,
    INITIAL_STATE, WILDCARD,
};
