use anyhow::Result;
use clap::{Parser, Subcommand};
use minisearch_core::persist::MissingSnapshot;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an inverted index from crawled corpus snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a corpus file or a directory of corpus files
    Build {
        /// Input path (JSON/JSONL file or directory)
        #[arg(long, default_value = "crawled_data.json")]
        input: PathBuf,
        /// Output index snapshot
        #[arg(long, default_value = "inverted_index.json")]
        output: PathBuf,
        /// Fail instead of writing an empty index when the corpus is missing
        #[arg(long, default_value_t = false)]
        require_corpus: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, require_corpus } => {
            let missing = if require_corpus { MissingSnapshot::Fail } else { MissingSnapshot::Empty };
            indexer::build_index(&input, &output, missing)?;
            Ok(())
        }
    }
}
