mod input;

use clap::Parser;
use dfa::{Automaton, Derivation, Outcome, ProcessingStep, SampleCatalog, Tape};
use input::{Definition, InputError};
use serde::Serialize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Checks words against a deterministic finite automaton and prints the derivation of
/// each run.
#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  dfa-cli --sample aa-or-bb abaa abab
  dfa-cli -a a,b -s q0,q1 -t q1 -d q0,a,q1 -d q0,b,q0 -d q1,a,q1 -d q1,b,q0 ba ab")]
struct Cli {
    /// Use a built-in automaton instead of describing one
    #[clap(long, conflicts_with_all = ["alphabet", "states", "terminal", "initial", "transitions"])]
    sample: Option<String>,

    /// List the built-in automata and exit
    #[clap(long)]
    list: bool,

    /// Comma-separated input symbols, e.g. a,b
    #[clap(short, long, default_value = "")]
    alphabet: String,

    /// Comma-separated state names, e.g. q0,q1,q2
    #[clap(short, long, default_value = "")]
    states: String,

    /// Comma-separated terminal states
    #[clap(short, long)]
    terminal: Option<String>,

    /// The initial state (defaults to the lowest-numbered state)
    #[clap(short, long)]
    initial: Option<String>,

    /// A transition as origin,symbol,destination; repeat for each one
    #[clap(short = 'd', long = "transition")]
    transitions: Vec<String>,

    /// Print one JSON report per word instead of text
    #[clap(long)]
    json: bool,

    /// Log each simulation step
    #[clap(short, long)]
    verbose: bool,

    /// The words to check; an empty argument ("") checks the empty word
    words: Vec<String>,
}

/// The result of checking one word, as printed with `--json`.
#[derive(Serialize)]
struct RunReport<'a> {
    word: &'a str,
    accepted: bool,
    outcome: Outcome,
    steps: &'a [ProcessingStep],
    derivation: Derivation,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "trace" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    if cli.list {
        for info in SampleCatalog::list() {
            println!("{:<14} {}", info.name, info.description);
            println!("{:<14} {}", "", info.formal);
        }
        return ExitCode::SUCCESS;
    }

    let mut automaton = match build(&cli) {
        Ok(automaton) => automaton,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if !cli.json {
        println!("{automaton}");
    }

    let mut status = ExitCode::SUCCESS;
    for word in &cli.words {
        let outcome = match automaton.run(&Tape::from(word.as_str())) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("error: {e}");
                status = ExitCode::FAILURE;
                break;
            }
        };
        let derivation = Derivation::new(automaton.history());

        if cli.json {
            let report = RunReport {
                word: word.as_str(),
                accepted: outcome.is_accepted(),
                outcome,
                steps: automaton.history(),
                derivation,
            };
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("error: {e}");
                    status = ExitCode::FAILURE;
                }
            }
        } else {
            println!("\n\"{word}\": {outcome}");
            for line in derivation.to_string().lines() {
                println!("  {line}");
            }
        }
    }

    status
}

fn build(cli: &Cli) -> Result<Automaton, InputError> {
    if let Some(name) = &cli.sample {
        return Ok(SampleCatalog::get(name)?);
    }

    let (automaton, diagnostics) = input::load(&Definition {
        alphabet: &cli.alphabet,
        states: &cli.states,
        terminal: cli.terminal.as_deref(),
        initial: cli.initial.as_deref(),
        transitions: &cli.transitions,
    })?;

    if !diagnostics.is_empty() {
        for message in diagnostics.messages() {
            eprintln!("warning: {message}");
        }
        eprintln!("warning: continuing with {automaton}");
    }

    Ok(automaton)
}
