use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use termpick::{Logging, Menu, PROJECT_VERSION};

/// Pick one of the given choices interactively and print it to stdout.
#[derive(Parser)]
#[command(version = PROJECT_VERSION, about, long_about = None)]
struct UserArgs {
    /// Choices to pick from, in display order
    #[arg(required = true)]
    choices: Vec<String>,

    /// Single-character key that picks the highlighted choice directly
    #[arg(short, long = "key", value_name = "KEY")]
    keys: Vec<String>,

    /// Force the numbered prompt instead of arrow-key navigation
    #[arg(short, long, conflicts_with = "ansi")]
    plain: bool,

    /// Force arrow-key navigation even when the terminal looks incapable
    #[arg(long)]
    ansi: bool,

    /// Print the zero-based index of the pick instead of its text
    #[arg(short, long)]
    index: bool,

    /// Verbose
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: UserArgs) -> Result<()> {
    let mut builder = Menu::new(args.choices).with_shortcuts(args.keys);

    if args.plain {
        builder = builder.with_ansi(false);
    } else if args.ansi {
        builder = builder.with_ansi(true);
    }

    let mut menu = builder.build().context("Invalid menu configuration")?;
    let pick = menu.choose().context("Failed to read selection")?;

    if args.index {
        println!("{}", pick.index);
    } else {
        println!("{}", pick.text);
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = UserArgs::parse();

    if let Err(err) = Logging::new().with_debug_mode(args.verbose).start() {
        eprintln!("{} {err:#}", "Error:".red());
        return ExitCode::FAILURE;
    }

    if let Err(err) = run(args) {
        eprintln!("{} {err:#}", "Error:".red());
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
