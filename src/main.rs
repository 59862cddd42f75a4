use std::fmt::Display;
use std::fs::read_to_string;
use std::io::{stderr, stdin, stdout};
use std::path::PathBuf;
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use apoml::frontend::parse;
use apoml::semantics::{evaluate_closed, Concrete, Initial, IntervalAnalysis, PromptInput};

#[derive(Parser)]
#[clap(about, version, author)]
struct Args {
    /// The program to run
    #[clap(short, long)]
    target: PathBuf,

    /// Also print the range of values the program can produce
    #[clap(short, long)]
    analyze: bool,

    /// Print the program with its lets inlined, without running it
    #[clap(short, long)]
    parse_only: bool,
}

fn init_tracing() -> Result<()> {
    // RUST_LOG selects what gets logged; the log goes to stderr so that it
    // never mixes with the program's output
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .context("failed to initialise tracing filter")?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stderr))
        .init();
    Ok(())
}

fn bail_out(header: &str, message: impl Display) -> ! {
    println!("{header}");
    println!("{}", message.to_string().lines().map(|l| format!("\t{l}")).join("\n"));
    exit(1)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    let contents = read_to_string(&args.target)
        .with_context(|| format!("unable to open source file {}", args.target.display()))?;
    let exp = parse(&contents).unwrap_or_else(|e| bail_out("Invalid ApoML program:", e));
    info!(path = %args.target.display(), "parsed program");

    // inline the lets to get a plain symbolic expression
    let inlined =
        evaluate_closed(&mut Initial, &exp).unwrap_or_else(|e| bail_out("Evaluation failed:", e));
    let range = args
        .analyze
        .then(|| evaluate_closed(&mut IntervalAnalysis, &exp))
        .transpose()
        .unwrap_or_else(|e| bail_out("Evaluation failed:", e));

    if args.parse_only {
        println!("{inlined}");
    } else {
        let mut concrete = Concrete::new(PromptInput::new(stdin().lock(), stdout()));
        let result = evaluate_closed(&mut concrete, &exp)
            .unwrap_or_else(|e| bail_out("Evaluation failed:", e));
        println!("{}", "-".repeat(80));
        println!("{inlined} = {result}");
    }
    if let Some(range) = range {
        println!("range: {range}");
    }
    Ok(())
}
