//! Pandoc JSON filter entry point.
//!
//! ```sh
//! pandoc thesis.md -t json | texweave latex | pandoc -f json -o thesis.tex
//! pandoc thesis.md --filter texweave -o thesis.tex
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use texweave::config::{Config, PANDOC_ENV};
use texweave::convert::{TextConverter, Verbatim};
use texweave::filters;
use texweave::transform::Pipeline;
use texweave::{Document, Format};

/// Rewrite pandoc documents into LaTeX-first markup.
#[derive(Parser)]
#[command(name = "texweave")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Target format; pandoc passes it as the first argument
    #[arg(default_value = "html")]
    format: String,

    /// Filters to run, in order (default: all)
    #[arg(short, long = "filter", value_name = "NAME", value_delimiter = ',')]
    filters: Vec<String>,

    /// Read the JSON document from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the JSON document to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Converter executable
    #[arg(long, env = PANDOC_ENV, default_value = texweave::config::DEFAULT_PANDOC)]
    pandoc: String,

    /// Do not call the converter; markdown fragments are emitted as is
    #[arg(long)]
    no_convert: bool,
}

fn main() -> ExitCode {
    // stdout carries the document, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
            buf
        }
    };

    let doc = Document::from_json(&input)
        .context("input is not a pandoc JSON document")?
        .with_format(Format::from(cli.format.as_str()));

    let config = Config::default().with_pandoc(cli.pandoc);
    let mut selected = if cli.filters.is_empty() {
        filters::all(&config)
    } else {
        cli.filters
            .iter()
            .map(|name| filters::by_name(name, &config))
            .collect::<Result<Vec<_>, _>>()?
    };

    let pandoc = config.converter();
    let converter: &dyn TextConverter = if cli.no_convert { &Verbatim } else { &pandoc };
    info!(format = %doc.format, filters = selected.len(), "running filters");

    let doc = Pipeline::new(doc, converter)
        .pipe_all(selected.iter_mut())?
        .into_inner();
    let json = doc.to_json().context("failed to serialize document")?;

    match &cli.output {
        Some(path) => fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes()).context("failed to write stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
