//! Authsome - Entry Point

use authsome::cli::{Cli, run};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    println!("{}", run(&cli)?);
    Ok(())
}
