#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]

mod logging;

use arbor_core::{Module, Walker};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about = "Walk an installed dependency tree and classify every package", long_about = None)]
struct Cli {
    /// Root package directory (defaults to the current directory)
    path: Option<PathBuf>,

    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json);

    let root = cli
        .path
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let walker = Walker::new(root).into_diagnostic()?;
    let modules = walker.walk_tree().into_diagnostic()?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(modules).into_diagnostic()?
        );
    } else {
        render_table(modules);
    }

    Ok(())
}

fn render_table(modules: &[Module]) {
    let name_width = modules
        .iter()
        .map(|m| m.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    println!(
        "{:<name_width$}  {:<22}  {:<20}  PATH",
        "NAME", "RELATIONSHIP", "NATIVE"
    );
    for module in modules {
        println!(
            "{:<name_width$}  {:<22}  {:<20}  {}",
            module.name,
            module.relationship,
            module.native_build_kind,
            module.path.display()
        );
    }
}
