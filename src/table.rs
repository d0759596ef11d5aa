//! This module defines transition rules and the `TransitionTable` that looks them up.
//!
//! Rules are grouped by state name. Inside a group, rules reading a concrete symbol are always
//! consulted before the group's wildcard rule, so an exact match wins over the fallback no
//! matter where each rule appeared in the source.

use crate::parser;
use crate::types::{Direction, LoadError, WILDCARD, WILDCARD_STATE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// A raw transition record as read from the table source, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the source.
    pub line: usize,
    pub state: String,
    pub read: char,
    pub write: char,
    /// Unvalidated move symbol.
    pub movement: char,
    pub next_state: String,
}

/// Represents a single, validated transition rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state this rule applies to.
    pub state: String,
    /// The symbol this rule reads, or the wildcard to match any symbol.
    pub read: char,
    /// The symbol this rule writes, or the wildcard to leave the cell unchanged.
    pub write: char,
    /// Where the head moves after writing.
    pub direction: Direction,
    /// The state to switch to, or the wildcard to stay in the current state.
    pub next_state: String,
}

impl Transition {
    /// Returns `true` if this rule reads any symbol.
    pub fn is_wildcard(&self) -> bool {
        self.read == WILDCARD
    }

    /// Returns `true` if this rule applies to `symbol`.
    pub fn matches(&self, symbol: char) -> bool {
        self.is_wildcard() || self.read == symbol
    }

    /// Resolves the state the machine is in after applying this rule from `current`.
    pub fn resolve_next_state<'a>(&'a self, current: &'a str) -> &'a str {
        if self.next_state == WILDCARD_STATE {
            current
        } else {
            &self.next_state
        }
    }
}

impl TryFrom<Record> for Transition {
    type Error = LoadError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let direction =
            Direction::from_symbol(record.movement).ok_or(LoadError::InvalidMoveSymbol {
                line: record.line,
                symbol: record.movement,
            })?;

        Ok(Transition {
            state: record.state,
            read: record.read,
            write: record.write,
            direction,
            next_state: record.next_state,
        })
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.state,
            self.read,
            self.write,
            self.direction.symbol(),
            self.next_state
        )
    }
}

/// The rules of one state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateRules {
    /// Rules reading a concrete symbol, in source order.
    exact: Vec<Transition>,
    /// The rule reading the wildcard.
    fallback: Option<Transition>,
}

impl StateRules {
    /// Returns the rule for `symbol`, preferring an exact match over the wildcard rule.
    pub fn find(&self, symbol: char) -> Option<&Transition> {
        self.exact
            .iter()
            .find(|t| t.read == symbol)
            .or(self.fallback.as_ref())
    }

    /// Returns the rules in lookup order: concrete symbols first, then the wildcard.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.exact.iter().chain(self.fallback.iter())
    }

    pub fn len(&self) -> usize {
        self.exact.len() + usize::from(self.fallback.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds `transition`, unless the group already has a rule for the same symbol.
    /// Returns `false` if the rule was ignored.
    fn insert(&mut self, transition: Transition) -> bool {
        if transition.is_wildcard() {
            if self.fallback.is_some() {
                return false;
            }
            self.fallback = Some(transition);
        } else {
            if self.exact.iter().any(|t| t.read == transition.read) {
                return false;
            }
            self.exact.push(transition);
        }

        true
    }
}

/// A deterministic transition table keyed by state name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    states: BTreeMap<String, StateRules>,
}

impl TransitionTable {
    /// Builds a table from raw records.
    ///
    /// Every record must move with `l`, `r` or `*`. When two records share a state and read
    /// symbol, the first one is kept and the later one is ignored with a warning.
    ///
    /// # Errors
    ///
    /// * `LoadError::InvalidMoveSymbol` for the first record with an invalid move symbol.
    ///   No partial table is returned.
    pub fn load<I>(records: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut table = Self::default();

        for record in records {
            let line = record.line;
            let transition = Transition::try_from(record)?;
            let (state, read) = (transition.state.clone(), transition.read);

            let group = table.states.entry(state.clone()).or_default();
            if !group.insert(transition) {
                warn!(line, state = %state, symbol = %read, "duplicate rule ignored");
            }
        }

        Ok(table)
    }

    /// Parses table source text and builds a table from it.
    ///
    /// See [`parser::parse`] for the accepted format.
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        Self::load(parser::parse(source))
    }

    /// Finds the rule for `state` reading `symbol`.
    ///
    /// A rule reading exactly `symbol` wins over the state's wildcard rule. Returns `None` if
    /// the state has no applicable rule.
    pub fn find_rule(&self, state: &str, symbol: char) -> Option<&Transition> {
        self.states.get(state)?.find(symbol)
    }

    /// Returns the rules of `state`, if it has any.
    pub fn rules_for(&self, state: &str) -> Option<&StateRules> {
        self.states.get(state)
    }

    /// Returns `true` if `state` has at least one rule.
    pub fn contains_state(&self, state: &str) -> bool {
        self.states.contains_key(state)
    }

    /// Returns the states that own rules, in lexicographic order.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Iterates over all rules, ordered by state name and, inside a state, concrete symbols
    /// before the wildcard.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.states.values().flat_map(StateRules::iter)
    }

    /// Returns the total number of rules.
    pub fn len(&self) -> usize {
        self.states.values().map(StateRules::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
