use clap::{ArgAction, Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use turing_tape::{analyze, Config, Debugger, Error, ProgramLoader, Snapshot, TuringMachine};

/// Runs a single-tape Turing machine until it reaches the `halt` state and prints the tape.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  turing-tape demos/unary-increment.tm demos/unary-increment.txt release
  turing-tape demos/binary-increment.tm demos/binary-increment.txt debug")]
struct Cli {
    /// The transition table, one `<state> <read> <write> <l|r|*> <next_state>` record per line
    table: PathBuf,

    /// The initial tape content
    input: PathBuf,

    /// `release` prints only the final tape, `debug` steps through the run interactively
    #[clap(value_enum)]
    mode: Mode,

    /// Fail if the machine has not halted after this many steps
    #[clap(long, value_name = "N")]
    max_steps: Option<usize>,

    /// Fail if the machine needs more than this many tape cells
    #[clap(long, value_name = "N")]
    max_tape_cells: Option<usize>,

    /// Print the final machine snapshot as JSON instead of the bare tape
    #[clap(long)]
    json: bool,

    /// Log more details to stderr (-v, -vv, -vvv)
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    #[value(alias = "r")]
    Release,
    #[value(alias = "d")]
    Debug,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (output, snapshot) = match run(&cli) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if !cli.json {
        println!("{output}");
        return ExitCode::SUCCESS;
    }

    match serde_json::to_string(&snapshot) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads both inputs and runs the machine in the requested mode. Returns the final tape
/// rendering and the halted machine's snapshot.
fn run(cli: &Cli) -> Result<(String, Snapshot), Error> {
    let table = ProgramLoader::load_table(&cli.table)?;
    let tape = ProgramLoader::load_tape(&cli.input)?;

    let config = Config::default()
        .with_max_steps(cli.max_steps)
        .with_max_tape_cells(cli.max_tape_cells);

    for warning in analyze(&table, &tape, &config) {
        warn!("{warning}");
    }

    let mut machine = TuringMachine::with_config(table, tape, config);

    let output = match cli.mode {
        Mode::Release => machine.run()?,
        Mode::Debug => {
            let mut debugger = Debugger::new(io::stdin().lock(), io::stdout().lock());
            machine.run_with(&mut debugger)?
        }
    };

    info!(steps = machine.step_count(), mode = ?cli.mode, "simulation finished");

    Ok((output, machine.snapshot()))
}

/// Installs a stderr subscriber. `RUST_LOG` takes precedence over the `-v` count.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .init();
}
