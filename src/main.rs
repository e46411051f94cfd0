use anyhow::Context;
use clap::Parser;
use docsift::ui::cli::{Cli, Commands};
use docsift::{CommandExtractor, Config, FileOutcome, Indexer, Searcher};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.resolve_config().context("Failed to load configuration")?;

    match cli.command {
        Commands::Index { path, force } => handle_index(config, path, force),
        Commands::Search { query, path } => handle_search(config, &query, path),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "docsift=info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_index(config: Config, path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let root = path.unwrap_or_else(|| PathBuf::from("."));
    println!("Indexing documents in: {}", root.display());

    let extractor = CommandExtractor::new(&config.extractor)?;
    let indexer = Indexer::new(config, extractor).force(force);

    let report = indexer
        .index_with(&root, |file| match &file.outcome {
            FileOutcome::Extracted => println!("  ✓ {}", file.document.display()),
            FileOutcome::UpToDate => println!("  - {} (up to date)", file.document.display()),
            FileOutcome::Failed(_) => println!("  ✗ {} (failed)", file.document.display()),
        })
        .with_context(|| format!("Failed to index {}", root.display()))?;

    println!("\nIndexing complete!");
    println!("  Documents: {}", report.considered());
    println!("  Extracted: {}", report.extracted());
    if report.up_to_date() > 0 {
        println!("  Skipped (up to date): {}", report.up_to_date());
    }
    if report.failed() > 0 {
        println!("  Errors: {}", report.failed());
    }

    Ok(())
}

fn handle_search(config: Config, query: &str, path: Option<PathBuf>) -> anyhow::Result<()> {
    let results = Searcher::new(config)
        .search(path.as_deref(), query)
        .context("Failed to start search")?;
    println!("Searching for \"{}\" in: {}", query, results.root().display());

    let mut matches = 0;
    let mut errors = 0;
    for result in results {
        match result {
            Ok(record) => {
                println!("  {}", record.display());
                matches += 1;
            }
            Err(err) => {
                eprintln!("  ✗ {}", err);
                errors += 1;
            }
        }
    }

    println!("\nFound {} matching files.", matches);
    if errors > 0 {
        println!("  Unreadable cache files: {}", errors);
    }

    Ok(())
}
