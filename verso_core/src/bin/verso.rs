use std::io::Write;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use serde::Serialize;
use verso_core::config::load_config;
use verso_core::logging::{init_tracing, init_tracing_with_filter};
use verso_core::service::registry_from_config;
use verso_core::{
    HighlightPolicy, HighlightSink, HighlightSummary, MismatchResponse, ReviewService,
    TextHighlighter,
};

/// Verso - flag phrases a translation got wrong against its ground truth
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log at debug level regardless of VERSO_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare a candidate text file against a reference text file
    Compare {
        /// Path to the ground-truth text
        reference: Utf8PathBuf,

        /// Path to the text being checked
        candidate: Utf8PathBuf,

        /// Suggestion strategy id (see `verso strategies`)
        #[arg(long)]
        strategy: Option<String>,

        /// Report each distinct phrase once
        #[arg(long)]
        unique: bool,

        /// Include the full segment list in the output
        #[arg(long)]
        segments: bool,

        /// Per-side token ceiling
        #[arg(long)]
        max_tokens: Option<usize>,

        /// Highlight the phrases in this document and report match counts
        #[arg(long)]
        document: Option<Utf8PathBuf>,

        /// Configuration file layered over the default locations
        #[arg(long)]
        config: Option<Utf8PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List available suggestion strategies
    Strategies {
        /// Configuration file layered over the default locations
        #[arg(long)]
        config: Option<Utf8PathBuf>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareOutput {
    #[serde(flatten)]
    response: MismatchResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlights: Option<HighlightSummary>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        init_tracing_with_filter("verso_core=debug,verso_strategies=debug");
    } else {
        init_tracing();
    }

    match cli.command {
        Command::Compare {
            reference,
            candidate,
            strategy,
            unique,
            segments,
            max_tokens,
            document,
            config,
            pretty,
        } => {
            let mut settings =
                load_config(config.as_deref()).context("failed to load configuration")?;
            if let Some(strategy) = strategy {
                settings.suggestions.strategy = strategy;
            }
            if unique {
                settings.extractor.highlight_policy = HighlightPolicy::Unique;
            }
            if segments {
                settings.output.include_segments = true;
            }
            if let Some(limit) = max_tokens {
                settings.extractor.max_tokens = limit;
            }

            let service = ReviewService::from_config(settings)?;
            let reference_bytes = read_file(&reference)?;
            let candidate_bytes = read_file(&candidate)?;
            let response = service
                .review_bytes(&reference_bytes, &candidate_bytes)
                .with_context(|| format!("failed to compare {candidate} against {reference}"))?;

            let highlights = match document {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {path}"))?;
                    Some(TextHighlighter::new(&text).highlight(&response.phrases_to_highlight))
                }
                None => None,
            };

            write_json(
                &CompareOutput {
                    response,
                    highlights,
                },
                pretty,
            )
        }
        Command::Strategies { config } => {
            let settings =
                load_config(config.as_deref()).context("failed to load configuration")?;
            write_json(&registry_from_config(&settings).summaries(), true)
        }
    }
}

fn read_file(path: &Utf8Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {path}"))
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to serialize output")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write output")?;
    Ok(())
}
