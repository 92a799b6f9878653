use anyhow::{Context, Result};
use clap::Parser;
use opflip::invert_source;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "opflip")]
#[command(about = "Invert comparison operators in Python conditionals")]
#[command(
    long_about = "Parses a Python snippet, flips every comparison operator to its logical \
inverse (< becomes >=, == becomes != and so on), and prints the rewritten code together \
with the position and original kind of each inverted operator."
)]
#[command(version)]
struct Cli {
    /// Source file to transform (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Emit the positions and inverted code as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = match &cli.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let inversion = invert_source(&source).context("failed to invert conditionals")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&inversion)?);
        return Ok(());
    }

    if inversion.positions.is_empty() {
        println!("No comparison operators found.");
    }
    for record in &inversion.positions {
        println!("inverted {} at {}:{}", record.kind, record.line, record.col);
    }
    println!();
    print!("{}", inversion.code);
    Ok(())
}
