//! Bank OCR CLI
//!
//! Reads a file of scanned entries (three glyph lines each, blank-line
//! separated) and prints one report line per entry.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use bank_ocr::{Entry, Validation};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bank-ocr", about = "Decode account numbers from printer output")]
struct Args {
    /// File of scanned entries
    input: PathBuf,

    /// Validate decoded accounts against the position-weighted checksum
    #[arg(long)]
    checksum: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let policy = if args.checksum {
        Validation::ShapeAndChecksum
    } else {
        Validation::Shape
    };

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    for block in blocks(&text) {
        let entry = Entry::parse(&block).with_context(|| format!("entry {block:?}"))?;
        println!("{}", entry.report(policy));
    }
    Ok(())
}

/// Group the input into three-line entries, skipping blank separator lines
fn blocks(text: &str) -> Vec<Vec<&str>> {
    let mut result = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        current.push(line);
        if current.len() == 3 {
            result.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    result
}
