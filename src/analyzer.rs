//! This module provides static checks over a transition table and its initial tape. They
//! point at tables that are likely to stop with a missing rule or never halt, before the
//! machine is started. Findings are warnings: the run itself stays the authority.

use crate::config::Config;
use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{BLANK_SYMBOL, WILDCARD_STATE};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// Represents the issues that can be found while analyzing a transition table.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum AnalysisWarning {
    /// The initial state owns no rule, so the first step cannot succeed.
    #[error("No rule for the initial state '{0}'")]
    MissingInitialState(String),
    /// No rule switches to the halting state.
    #[error("No rule leads to the halting state '{0}'")]
    HaltUnreachable(String),
    /// Rules switch to states that own no rule.
    #[error("Rules reference states without rules: {0:?}")]
    UndefinedNextStates(Vec<String>),
    /// States own rules but cannot be reached from the initial state.
    #[error("Unreachable states detected: {0:?}")]
    UnreachableStates(Vec<String>),
    /// The initial tape holds symbols that no rule reads.
    #[error("Initial tape contains symbols not handled by any rule: {0:?}")]
    UnhandledTapeSymbols(Vec<char>),
}

/// Analyzes `table` against the initial `tape` and returns every finding, in a fixed order.
pub fn analyze(table: &TransitionTable, tape: &Tape, config: &Config) -> Vec<AnalysisWarning> {
    // A machine that starts halted never consults its table.
    if config.initial_state == config.halt_state {
        return Vec::new();
    }

    [
        check_initial_state(table, config),
        check_halt_reachable(table, config),
        check_undefined_next_states(table, config),
        check_unreachable_states(table, config),
        check_tape_symbols(table, tape),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn check_initial_state(table: &TransitionTable, config: &Config) -> Option<AnalysisWarning> {
    (!table.contains_state(&config.initial_state))
        .then(|| AnalysisWarning::MissingInitialState(config.initial_state.clone()))
}

fn check_halt_reachable(table: &TransitionTable, config: &Config) -> Option<AnalysisWarning> {
    (!table.iter().any(|t| t.next_state == config.halt_state))
        .then(|| AnalysisWarning::HaltUnreachable(config.halt_state.clone()))
}

/// The halting state and the wildcard are never undefined.
fn check_undefined_next_states(
    table: &TransitionTable,
    config: &Config,
) -> Option<AnalysisWarning> {
    let undefined: BTreeSet<String> = table
        .iter()
        .map(|t| t.next_state.as_str())
        .filter(|next| {
            *next != config.halt_state && *next != WILDCARD_STATE && !table.contains_state(next)
        })
        .map(str::to_string)
        .collect();

    (!undefined.is_empty())
        .then(|| AnalysisWarning::UndefinedNextStates(undefined.into_iter().collect()))
}

/// Walks the state graph from the initial state. A wildcard next state loops back onto the
/// state that owns the rule, so it adds nothing to the walk.
fn check_unreachable_states(table: &TransitionTable, config: &Config) -> Option<AnalysisWarning> {
    let mut visited = HashSet::new();
    let mut queue = vec![config.initial_state.as_str()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        if let Some(rules) = table.rules_for(state) {
            queue.extend(
                rules
                    .iter()
                    .map(|t| t.next_state.as_str())
                    .filter(|next| *next != WILDCARD_STATE && !visited.contains(next)),
            );
        }
    }

    let unreachable: Vec<String> = table
        .states()
        .filter(|state| !visited.contains(state))
        .map(str::to_string)
        .collect();

    (!unreachable.is_empty()).then_some(AnalysisWarning::UnreachableStates(unreachable))
}

/// A table with any wildcard rule may handle every symbol, so it is not checked.
fn check_tape_symbols(table: &TransitionTable, tape: &Tape) -> Option<AnalysisWarning> {
    if table.iter().any(|t| t.is_wildcard()) {
        return None;
    }

    let handled: HashSet<char> = table.iter().map(|t| t.read).collect();
    let unhandled: BTreeSet<char> = tape
        .cells()
        .filter(|c| *c != BLANK_SYMBOL && !handled.contains(c))
        .collect();

    (!unhandled.is_empty())
        .then(|| AnalysisWarning::UnhandledTapeSymbols(unhandled.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze_source(source: &str, input: &str) -> Vec<AnalysisWarning> {
        let table = TransitionTable::parse(source).unwrap();
        let tape = Tape::from_input(input).unwrap();
        analyze(&table, &tape, &Config::default())
    }

    #[test]
    fn test_valid_table() {
        let warnings = analyze_source("0 1 1 r 0\n0 _ 1 * halt", "11");
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn test_missing_initial_state() {
        let warnings = analyze_source("start 1 1 r halt", "1");

        assert_eq!(
            warnings,
            vec![
                AnalysisWarning::MissingInitialState("0".to_string()),
                AnalysisWarning::UnreachableStates(vec!["start".to_string()]),
            ]
        );
    }

    #[test]
    fn test_halt_unreachable() {
        let warnings = analyze_source("0 * * r *", "");

        assert_eq!(
            warnings,
            vec![AnalysisWarning::HaltUnreachable("halt".to_string())]
        );
    }

    #[test]
    fn test_undefined_next_states() {
        let warnings = analyze_source("0 1 1 r q2\n0 0 0 r q1\n0 _ _ * halt", "10");

        assert_eq!(
            warnings,
            vec![AnalysisWarning::UndefinedNextStates(vec![
                "q1".to_string(),
                "q2".to_string()
            ])]
        );
    }

    #[test]
    fn test_unreachable_states() {
        let warnings = analyze_source(
            "0 1 1 r a\na 1 1 r *\na _ _ * halt\nb 1 1 r c\nc 1 1 r halt",
            "1",
        );

        assert_eq!(
            warnings,
            vec![AnalysisWarning::UnreachableStates(vec![
                "b".to_string(),
                "c".to_string()
            ])]
        );
    }

    #[test]
    fn test_unhandled_tape_symbols() {
        let warnings = analyze_source("0 1 1 r 0\n0 _ 1 * halt", "1x1y");

        assert_eq!(
            warnings,
            vec![AnalysisWarning::UnhandledTapeSymbols(vec!['x', 'y'])]
        );
    }

    #[test]
    fn test_wildcard_rules_handle_every_symbol() {
        let warnings = analyze_source("0 * * r 0\n0 _ _ * halt", "xyz");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_initial_state_is_halt() {
        let table = TransitionTable::default();
        let tape = Tape::from_input("abc").unwrap();
        let config = Config {
            initial_state: "halt".to_string(),
            ..Config::default()
        };

        assert!(analyze(&table, &tape, &config).is_empty());
    }

    #[test]
    fn test_warning_display() {
        let warning = AnalysisWarning::MissingInitialState("0".to_string());
        assert_eq!(warning.to_string(), "No rule for the initial state '0'");
    }
}
