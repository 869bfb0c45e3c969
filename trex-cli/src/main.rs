use clap::Parser;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use trex::automaton::Automaton;
use trex::{graphviz, parse, ParseError};

/// Compiles one or more regexes into an NFA and a DFA, printing both and writing a Graphviz
/// `.dot` file for each.
#[derive(Parser)]
#[command(name = "trex", about = "Regex -> NFA -> DFA compiler")]
struct Args {
    /// Regex source strings to compile. Each produces its own pair of `.dot` files.
    #[arg(required = true)]
    patterns: Vec<String>,

    /// Directory Graphviz files are written to.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Suppress the printed AST/NFA/DFA summaries; only write the `.dot` files.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Error)]
enum Error {
    #[error("failed to parse regex {0:?}: {1}")]
    Parse(String, ParseError),
    #[error("failed to write {0}: {1}")]
    Write(PathBuf, io::Error),
}

fn main() {
    let args = Args::parse();
    let mut had_error = false;

    for (i, pattern) in args.patterns.iter().enumerate() {
        if let Err(e) = compile_one(&args, i, pattern) {
            eprintln!("{e}");
            had_error = true;
        }
    }

    if had_error {
        std::process::exit(1);
    }
}

fn compile_one(args: &Args, index: usize, pattern: &str) -> Result<(), Error> {
    let ast = parse(pattern).map_err(|e| Error::Parse(pattern.to_string(), e))?;
    let nfa = ast.to_nfa();
    let dfa = nfa.to_dfa();

    if !args.quiet {
        println!("{pattern}  --->  {ast}");
        println!();
        println!("Nondeterministic finite automaton");
        println!(
            "states: {}, transitions: {}",
            nfa.states().len(),
            nfa.transitions().len()
        );
        println!();
        println!("Deterministic finite automaton");
        println!(
            "states: {}, transitions: {}",
            dfa.states().len(),
            dfa.transitions().len()
        );
        println!();
    }

    let nfa_path = args.out_dir.join(format!("nfa{index}.dot"));
    fs::write(&nfa_path, graphviz::to_dot(&nfa, pattern))
        .map_err(|e| Error::Write(nfa_path.clone(), e))?;

    let dfa_path = args.out_dir.join(format!("dfa{index}.dot"));
    fs::write(&dfa_path, graphviz::to_dot(&dfa, pattern))
        .map_err(|e| Error::Write(dfa_path.clone(), e))?;

    Ok(())
}
