//! This module provides the parser for transition table sources, utilizing the `pest` crate.
//!
//! A table source holds one whitespace-separated record per line:
//!
//! ```text
//! <state> <read> <write> <move> <next_state>
//! ```
//!
//! Blank lines are skipped and `;` starts a comment running to the end of the line. A line
//! that holds a full record is always read as one, so a state may itself start with `;`.
//! Parsing stops at the first malformed line; the records read up to that point are kept.

use crate::table::Record;
use crate::types::BLANK_SYMBOL;
use pest::{
    error::Error,
    iterators::{Pair, Pairs},
    Parser as PestParser,
};
use pest_derive::Parser as PestParser;
use tracing::{debug, warn};

/// Derives a `PestParser` for the table grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TableParser;

/// Parses table source text into raw records.
///
/// Move symbols are not validated here; see [`crate::TransitionTable::load`].
pub fn parse(input: &str) -> Vec<Record> {
    let mut records = Vec::new();

    for (index, text) in input.lines().enumerate() {
        let line = index + 1;

        match parse_line(text, line) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => {
                warn!(line, error = %e, "malformed record, ignoring the rest of the table");
                break;
            }
        }
    }

    debug!(records = records.len(), "parsed transition table");
    records
}

/// Parses a single source line.
///
/// # Returns
///
/// * `Ok(Some(Record))` if the line holds a record.
/// * `Ok(None)` if the line is blank or a comment.
/// * `Err(_)` if the line does not hold exactly five fields with single-character symbols.
pub fn parse_line(text: &str, line: usize) -> Result<Option<Record>, Box<Error<Rule>>> {
    let record = TableParser::parse(Rule::line, text)?
        .flat_map(Pair::into_inner)
        .find(|pair| pair.as_rule() == Rule::record);

    Ok(record.map(|pair| parse_record(pair, line)))
}

/// Builds a `Record` from a `Pair<Rule::record>`.
fn parse_record(pair: Pair<Rule>, line: usize) -> Record {
    // Rule: record > name, symbol, symbol, symbol, name
    let mut fields = pair.into_inner();

    Record {
        line,
        state: parse_string(&mut fields),
        read: parse_symbol(&mut fields),
        write: parse_symbol(&mut fields),
        movement: parse_symbol(&mut fields),
        next_state: parse_string(&mut fields),
    }
}

fn parse_string(pairs: &mut Pairs<Rule>) -> String {
    pairs
        .next()
        .map(|pair| pair.as_str().to_string())
        .unwrap_or_default()
}

fn parse_symbol(pairs: &mut Pairs<Rule>) -> char {
    pairs
        .next()
        .and_then(|pair| pair.as_str().chars().next())
        .unwrap_or(BLANK_SYMBOL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let input = "0 1 1 r 0\n0 _ 1 * halt\n";

        let records = parse(input);

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            Record {
                line: 1,
                state: "0".into(),
                read: '1',
                write: '1',
                movement: 'r',
                next_state: "0".into(),
            }
        );
        assert_eq!(records[1].read, '_');
        assert_eq!(records[1].movement, '*');
        assert_eq!(records[1].next_state, "halt");
        assert_eq!(records[1].line, 2);
    }

    #[test]
    fn test_parse_mixed_whitespace() {
        let records = parse("  add_one\t1  1\tr   carry  \r\n");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].state, "add_one");
        assert_eq!(records[0].next_state, "carry");
    }

    #[test]
    fn test_parse_wildcards() {
        let records = parse("q1 * * * *");

        let record = &records[0];
        assert_eq!(record.read, '*');
        assert_eq!(record.write, '*');
        assert_eq!(record.movement, '*');
        assert_eq!(record.next_state, "*");
    }

    #[test]
    fn test_parse_skips_blank_lines_and_comments() {
        let input = r#"
; unary increment
0 1 1 r 0      ; walk over the ones

0 _ 1 * halt
"#;

        let records = parse(input);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 3);
        assert_eq!(records[1].line, 5);
    }

    #[test]
    fn test_parse_semicolon_as_symbol() {
        let records = parse("0 ; ; r 0");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].read, ';');
        assert_eq!(records[0].write, ';');
    }

    #[test]
    fn test_parse_state_starting_with_semicolon() {
        let records = parse(";s 1 1 r halt\n0 1 1 r ;s\n; a note, not a record\n");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state, ";s");
        assert_eq!(records[0].next_state, "halt");
        assert_eq!(records[0].line, 1);
        assert_eq!(records[1].next_state, ";s");
    }

    #[test]
    fn test_parse_stops_at_wrong_field_count() {
        let input = "0 1 1 r 0\n0 _ 1 *\n0 0 0 r 0\n";

        let records = parse(input);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].read, '1');
    }

    #[test]
    fn test_parse_stops_at_extra_field() {
        let records = parse("0 1 1 r 0 extra\n0 0 0 r 0");

        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_stops_at_multi_character_symbol() {
        let records = parse("0 1 1 r 0\n0 10 1 r 0\n0 0 0 r 0");

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_keeps_invalid_move_symbol() {
        // The move column is validated when the table is built, not here.
        let records = parse("0 1 1 x 0");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].movement, 'x');
    }

    #[test]
    fn test_parse_line_results() {
        assert!(parse_line("", 1).unwrap().is_none());
        assert!(parse_line("   ", 1).unwrap().is_none());
        assert!(parse_line("; only a comment", 1).unwrap().is_none());
        assert!(parse_line("0 1 1 r 0", 7).unwrap().is_some());
        assert!(parse_line("0 1", 1).is_err());
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
    }
}
