//! Interactive single-stepping.
//!
//! The `Debugger` is a [`StepHook`] that prints the tape before the first step and then asks the
//! operator what to do: advance one rule (`n`) and print the tape again, or run to the end
//! (`c`) without printing anything until the machine halts.

use crate::machine::{StepHook, TuringMachine};
use crate::table::Transition;
use crate::types::SimulationError;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::debug;

const GREETING: &str = "Hello in debug mode!
Press 'n' to go to the next step
Press 'c' to run the program until the end
";

const PROMPT: &str = "Please enter 'n' (next step) or 'c' (go to the end)";

/// An operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugCommand {
    /// Apply one rule, then print the tape and ask again.
    NextStep,
    /// Run until the machine halts without stopping.
    UntilEnd,
}

impl FromStr for DebugCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" | "next" => Ok(DebugCommand::NextStep),
            "c" | "continue" => Ok(DebugCommand::UntilEnd),
            _ => Err(format!("Unknown debug command: {s}")),
        }
    }
}

/// Steps through a run under operator control, reading commands from `input` and writing the
/// tape and prompts to `output`.
pub struct Debugger<R, W> {
    input: R,
    output: W,
    command: DebugCommand,
}

impl<R: BufRead, W: Write> Debugger<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            command: DebugCommand::NextStep,
        }
    }

    /// Returns the last command read.
    pub fn command(&self) -> DebugCommand {
        self.command
    }

    /// Consumes the debugger and returns its output.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads commands until a valid one arrives.
    ///
    /// Blank lines are ignored, anything else that is not a command is answered with a prompt.
    /// When the input ends, the run continues to the end.
    fn read_command(&mut self) -> Result<DebugCommand, SimulationError> {
        self.output.flush()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("debug input closed, running until the end");
                return Ok(DebugCommand::UntilEnd);
            }

            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            match text.parse::<DebugCommand>() {
                Ok(command) => return Ok(command),
                Err(_) => {
                    writeln!(self.output, "{PROMPT}")?;
                    self.output.flush()?;
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> StepHook for Debugger<R, W> {
    fn on_start(&mut self, machine: &TuringMachine) -> Result<(), SimulationError> {
        writeln!(self.output, "{GREETING}")?;
        writeln!(self.output, "{}", machine.tape())?;

        self.command = self.read_command()?;
        Ok(())
    }

    fn on_step(
        &mut self,
        machine: &TuringMachine,
        transition: &Transition,
    ) -> Result<(), SimulationError> {
        if self.command != DebugCommand::NextStep {
            return Ok(());
        }

        writeln!(self.output, "{}", machine.tape())?;
        writeln!(self.output, "Last executed rule: {transition}")?;

        self.command = self.read_command()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TransitionTable;
    use crate::tape::Tape;
    use std::io::Cursor;

    fn run(input: &str) -> (Result<String, SimulationError>, String) {
        let table = TransitionTable::parse("0 1 1 r 0\n0 _ 1 * halt").unwrap();
        let tape = Tape::from_input("11").unwrap();
        let mut machine = TuringMachine::new(table, tape);

        let mut debugger = Debugger::new(Cursor::new(input.to_string()), Vec::new());
        let result = machine.run_with(&mut debugger);
        let output = String::from_utf8(debugger.into_output()).unwrap();

        (result, output)
    }

    #[test]
    fn test_parse_command() {
        assert_eq!("n".parse::<DebugCommand>(), Ok(DebugCommand::NextStep));
        assert_eq!("next".parse::<DebugCommand>(), Ok(DebugCommand::NextStep));
        assert_eq!("c".parse::<DebugCommand>(), Ok(DebugCommand::UntilEnd));
        assert_eq!("continue".parse::<DebugCommand>(), Ok(DebugCommand::UntilEnd));
        assert!("x".parse::<DebugCommand>().is_err());
        assert!("N".parse::<DebugCommand>().is_err());
    }

    #[test]
    fn test_step_through_every_rule() {
        let (result, output) = run("n\nn\nn\n");

        assert_eq!(result.unwrap(), "111");
        assert!(output.starts_with("Hello in debug mode!"));

        let rules: Vec<&str> = output
            .lines()
            .filter(|line| line.starts_with("Last executed rule: "))
            .collect();
        assert_eq!(
            rules,
            vec![
                "Last executed rule: 0 1 1 r 0",
                "Last executed rule: 0 1 1 r 0",
                "Last executed rule: 0 _ 1 * halt",
            ]
        );

        // Initial tape plus one rendering per step.
        let tapes = output
            .lines()
            .filter(|line| *line == "11" || *line == "111")
            .count();
        assert_eq!(tapes, 4);
    }

    #[test]
    fn test_continue_stops_printing() {
        let (result, output) = run("n\nc\n");

        assert_eq!(result.unwrap(), "111");
        assert_eq!(output.matches("Last executed rule").count(), 1);
        assert!(!output.contains(PROMPT));
    }

    #[test]
    fn test_continue_right_away() {
        let (result, output) = run("c\n");

        assert_eq!(result.unwrap(), "111");
        assert!(!output.contains("Last executed rule"));
        assert!(output.contains("\n11\n"));
    }

    #[test]
    fn test_invalid_commands_are_prompted_again() {
        let (result, output) = run("x\n\n   \nhelp\nc\n");

        assert_eq!(result.unwrap(), "111");
        assert_eq!(output.matches(PROMPT).count(), 2);
    }

    #[test]
    fn test_closed_input_runs_to_the_end() {
        let (result, output) = run("n\n");

        assert_eq!(result.unwrap(), "111");
        assert_eq!(output.matches("Last executed rule").count(), 1);
    }

    #[test]
    fn test_failure_is_reported_after_last_rendering() {
        let table = TransitionTable::parse("0 1 1 r 0").unwrap();
        let tape = Tape::from_input("11").unwrap();
        let mut machine = TuringMachine::new(table, tape);
        let mut debugger = Debugger::new(Cursor::new("n\nn\nn\n"), Vec::new());

        let result = machine.run_with(&mut debugger);

        assert_eq!(
            result,
            Err(SimulationError::NoMatchingRule {
                state: "0".to_string(),
                symbol: '_',
            })
        );
        assert_eq!(debugger.command(), DebugCommand::NextStep);

        let output = String::from_utf8(debugger.into_output()).unwrap();
        assert_eq!(output.matches("Last executed rule: 0 1 1 r 0").count(), 2);
        assert_eq!(output.lines().filter(|line| *line == "11").count(), 3);
        assert!(output.ends_with("11\nLast executed rule: 0 1 1 r 0\n"));
    }
}
