//! Load episode and character data into the database

use anyhow::Result;
use api::{
    importer::{self, CharacterRecord, EpisodeRecord},
    init_tracing,
};
use clap::Parser;
use common::database::{DatabaseConfig, init_pool, run_migrations};
use std::path::PathBuf;
use tracing::info;

/// Apply the schema and import episodes/characters from JSON files
#[derive(Parser, Debug)]
#[command(name = "import")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON array of episode records
    #[arg(long)]
    episodes: Option<PathBuf>,

    /// JSON array of character records
    #[arg(long)]
    characters: Option<PathBuf>,

    /// Only apply migrations
    #[arg(long)]
    schema_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let pool = init_pool(&DatabaseConfig::from_env()?).await?;
    run_migrations(&pool).await?;

    if cli.schema_only {
        info!("Schema applied, skipping data import");
        return Ok(());
    }

    let episodes: Vec<EpisodeRecord> = match &cli.episodes {
        Some(path) => importer::read_records(path)?,
        None => Vec::new(),
    };
    let characters: Vec<CharacterRecord> = match &cli.characters {
        Some(path) => importer::read_records(path)?,
        None => Vec::new(),
    };

    let summary = importer::import(&pool, &episodes, &characters).await?;
    println!(
        "Imported {} episodes and {} characters",
        summary.episodes, summary.characters
    );

    Ok(())
}
