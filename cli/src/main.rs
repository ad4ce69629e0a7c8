//! CLI for the project showcase pipeline.
//!
//! Discovers course repositories on GitHub, parses their names, fetches
//! their sketches and renders the Quarto listing pages, one subcommand per
//! stage.

use clap::{Parser, Subcommand};
use showcase_pipeline::{Pipeline, PipelineConfig, PipelineError, RunSummary, Stage};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Showcase - build the course project listing from GitHub repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding data/, group_data/ and projects/.
    #[arg(long, global = true, default_value = ".")]
    base_dir: PathBuf,

    /// Settings file [default: <BASE_DIR>/showcase.toml].
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dataset read by the stage [default: <BASE_DIR>/data/repos.csv].
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stage 1: list organization repositories matching the name prefix.
    Fetch {
        /// GitHub organization to list.
        #[arg(long)]
        org: Option<String>,

        /// Repository name prefix.
        #[arg(long)]
        pattern: Option<String>,

        /// GitHub Personal Access Token [fallback: GITHUB_PAT, .env, prompt].
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Write the dataset here instead of the default location.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Stage 2: split repository names into group number and project name.
    Parse {
        /// Repository name prefix.
        #[arg(long)]
        pattern: Option<String>,

        /// Write the dataset here instead of overwriting the input.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Stage 3: download each group's sketch image.
    Sketches {
        /// Write the dataset here instead of overwriting the input.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Stage 4: render one listing page per group.
    Pages,

    /// Run all four stages in order.
    All {
        /// GitHub organization to list.
        #[arg(long)]
        org: Option<String>,

        /// Repository name prefix.
        #[arg(long)]
        pattern: Option<String>,

        /// GitHub Personal Access Token [fallback: GITHUB_PAT, .env, prompt].
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Both octocrab and reqwest use rustls; pin one process-wide provider
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, PipelineError> {
    let mut config = PipelineConfig::load(args.base_dir, args.config)?;
    if let Some(dataset) = args.dataset {
        config = config.with_dataset_path(dataset);
    }

    let (config, stages) = match args.command {
        Command::Fetch {
            org,
            pattern,
            token,
            output,
        } => {
            let config = with_output(with_source(config, org, pattern, token), output);
            (config, vec![Stage::Fetch])
        }
        Command::Parse { pattern, output } => {
            let config = with_output(with_source(config, None, pattern, None), output);
            (config, vec![Stage::Parse])
        }
        Command::Sketches { output } => (with_output(config, output), vec![Stage::Sketches]),
        Command::Pages => (config, vec![Stage::Pages]),
        Command::All {
            org,
            pattern,
            token,
        } => (
            with_source(config, org, pattern, token),
            Stage::ALL.to_vec(),
        ),
    };

    Pipeline::new(config).run(&stages).await
}

/// Applies the discovery overrides given on the command line.
fn with_source(
    mut config: PipelineConfig,
    org: Option<String>,
    pattern: Option<String>,
    token: Option<String>,
) -> PipelineConfig {
    if let Some(org) = org {
        config = config.with_organization(org);
    }
    if let Some(pattern) = pattern {
        config = config.with_pattern(pattern);
    }
    if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
        config = config.with_token(token.trim().to_string());
    }
    config
}

fn with_output(config: PipelineConfig, output: Option<PathBuf>) -> PipelineConfig {
    match output {
        Some(output) => config.with_output_path(output),
        None => config,
    }
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");

    if summary.ran(Stage::Fetch) {
        println!(
            "  Repositories discovered: {}",
            summary.repositories_discovered
        );
    }

    if summary.ran(Stage::Parse) {
        println!("  Names with a group number: {}", summary.names_grouped);
    }

    if summary.ran(Stage::Sketches) {
        println!(
            "  Sketches downloaded: {}/{}",
            summary.sketches_downloaded, summary.sketches_processed
        );
        println!("  Sketches missing: {}", summary.sketches_missing);
        println!("  Repositories skipped: {}", summary.sketches_skipped);
        if summary.sketches_failed > 0 {
            println!("  Sketches not saved: {}", summary.sketches_failed);
            for repository in &summary.failed_repositories {
                println!("    - {repository}");
            }
        }
    }

    if let Some(path) = &summary.dataset_path {
        println!("  Dataset: {}", path.display());
    }

    if summary.ran(Stage::Pages) {
        println!(
            "  Pages created: {} ({} numeric, {} non-numeric)",
            summary.pages_created(),
            summary.pages_numeric,
            summary.pages_non_numeric
        );
        if let Some(dir) = &summary.pages_dir {
            println!("  Pages directory: {}", dir.display());
        }
        println!("\nTo build the website, run:\n  quarto render");
    }
}
