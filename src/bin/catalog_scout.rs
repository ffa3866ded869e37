//! CLI binary for catalog-scout.

use std::path::{Path, PathBuf};

use anyhow::Context;
use catalog_scout::{ScoutConfig, output};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// catalog-scout: fuzzy product search over strict marketplace catalogs.
#[derive(Parser)]
#[command(name = "catalog-scout", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, env = "CATALOG_SCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search a JSON catalog and print ranked records as JSON lines.
    ///
    /// Name, category and link are printed under the keys `name`,
    /// `category` and `link` even when the catalog uses `nom`, `categorie`
    /// or `lien`. Other fields are printed as read.
    Search {
        /// Free-form search term.
        term: String,

        /// JSON array of catalog records. Defaults to `catalog_path` from
        /// the config file.
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Maximum number of records to print.
        #[arg(short, long)]
        limit: Option<usize>,

        /// Query the raw term only, without variants or relevance filtering.
        #[arg(long)]
        exact: bool,

        /// Print scores, provenance and a summary line.
        #[arg(long)]
        explain: bool,
    },

    /// Print the query variants generated for a term, one per line.
    Variants {
        /// Free-form search term.
        term: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON lines.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalog_scout=info,scout_search=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Search {
            term,
            catalog,
            limit,
            exact,
            explain,
        } => run_search(config, &term, catalog, limit, exact, explain).await,
        Command::Variants { term } => print_variants(&config, &term),
    }
}

/// Explicit path, else the default path when it exists, else defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<ScoutConfig> {
    if let Some(path) = path {
        return ScoutConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    let default_path = ScoutConfig::default_config_path();
    if default_path.is_file() {
        info!(path = %default_path.display(), "using default config file");
        return Ok(ScoutConfig::from_file(&default_path)?);
    }
    Ok(ScoutConfig::default())
}

async fn run_search(
    mut config: ScoutConfig,
    term: &str,
    catalog: Option<PathBuf>,
    limit: Option<usize>,
    exact: bool,
    explain: bool,
) -> anyhow::Result<()> {
    if let Some(limit) = limit {
        config.result_limit = limit;
    }
    if exact {
        config.search.fuzzy = false;
    }
    let engine = config.build_engine()?;

    let catalog_path = catalog
        .or_else(|| config.catalog_path.clone())
        .context("no catalog given: pass --catalog or set catalog_path in the config file")?;
    let catalog = config.load_catalog(&catalog_path)?;
    info!(
        records = catalog.inner().len(),
        path = %catalog_path.display(),
        cached = catalog.is_caching(),
        "catalog loaded"
    );

    let report = engine
        .search_detailed(term, &catalog, config.result_limit)
        .await;
    info!(
        results = report.candidates.len(),
        fetched = report.variants_fetched,
        "search finished"
    );

    let lines = if explain {
        output::explain_lines(&report)?
    } else {
        output::record_lines(&report.into_records())?
    };
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn print_variants(config: &ScoutConfig, term: &str) -> anyhow::Result<()> {
    let engine = config.build_engine()?;
    for variant in engine.variants(term) {
        println!("{variant}");
    }
    Ok(())
}
