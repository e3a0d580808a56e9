//! # rowblock
//!
//! A CLI that reprints document tables as labeled blocks, one per data row.
//!
//! ## Overview
//!
//! rowblock is built on top of rowblocklib. It reads a table (or a whole
//! extracted document body) as JSON and prints every data row as a block of
//! `header: value` lines between dashed borders.
//!
//! ## Usage
//!
//! ```bash
//! # Transpose a single table
//! rowblock table.json
//!
//! # Read from stdin
//! extract-docx report.docx | rowblock
//!
//! # Pad ragged rows instead of truncating them
//! rowblock table.json --policy pad
//!
//! # Fail on ragged rows
//! rowblock table.json --policy strict
//!
//! # Output as JSON
//! rowblock table.json --output json
//!
//! # Write to a file
//! rowblock document.json --write extracted.txt
//! ```

mod render;

use std::fs;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rowblocklib::{
    load_input, read_input, BlockRenderer, Document, RenderOptions, RowPolicy, TransposeOptions,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use render::{render_json, render_text, OutputMode};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("rowblock")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Reprint document tables as labeled `header: value` blocks")
        .arg(
            Arg::new("input")
                .help("JSON table or document to read ('-' or omitted reads stdin)")
                .default_value("-"),
        )
        .arg(
            Arg::new("policy")
                .short('p')
                .long("policy")
                .value_parser(["truncate", "pad", "strict"])
                .default_value("truncate")
                .help("How to handle rows whose length differs from the header"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("write")
                .short('w')
                .long("write")
                .value_name("FILE")
                .help("Write output to FILE instead of stdout"),
        )
        .arg(
            Arg::new("border-width")
                .long("border-width")
                .value_parser(value_parser!(usize))
                .default_value("20")
                .help("Width of the dashed border around each block"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (repeatable; RUST_LOG overrides)"),
        )
}

/// Initialize logging to stderr
fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Extract transpose options from matches
fn extract_transpose_options(matches: &ArgMatches) -> Result<TransposeOptions, anyhow::Error> {
    let policy = matches
        .get_one::<String>("policy")
        .map(|s| s.parse::<RowPolicy>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();
    Ok(TransposeOptions::new().policy(policy))
}

/// Extract output mode from matches
fn extract_output_mode(matches: &ArgMatches) -> Result<OutputMode, anyhow::Error> {
    matches
        .get_one::<String>("output")
        .map(|s| s.parse::<OutputMode>())
        .transpose()
        .map_err(anyhow::Error::msg)
        .map(Option::unwrap_or_default)
}

/// Load the input document from a path or stdin
fn load_document(input: &str) -> Result<Document, anyhow::Error> {
    if input == "-" {
        debug!("reading stdin");
        read_input(io::stdin().lock()).context("failed to read input from stdin")
    } else {
        load_input(input).with_context(|| format!("failed to load '{input}'"))
    }
}

/// End non-empty output with a newline, for stdout and files alike
fn terminate(mut output: String) -> String {
    if !output.is_empty() {
        output.push('\n');
    }
    output
}

fn run(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let input = matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .unwrap_or("-");
    let options = extract_transpose_options(matches)?;
    let output_mode = extract_output_mode(matches)?;
    let border_width = matches
        .get_one::<usize>("border-width")
        .copied()
        .unwrap_or(20);
    let write_to = matches.get_one::<String>("write");

    let document = load_document(input)?;
    info!(
        elements = document.body.len(),
        tables = document.tables().count(),
        "loaded document"
    );

    let output = match output_mode {
        OutputMode::Text => {
            let renderer = BlockRenderer::new(RenderOptions::new().border_width(border_width));
            let styled = write_to.is_none() && io::stdout().is_terminal();
            render_text(&document, options, &renderer, styled)?
        }
        OutputMode::Json => render_json(&document, options)?,
    };

    let output = terminate(output);
    match write_to {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("failed to write '{path}'"))?;
            info!(path = %path, bytes = output.len(), "wrote output");
        }
        None => print!("{output}"),
    }

    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
