//! Operator entry point for the corpus pipeline.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use corpus_crawler::{CrawlConfig, Crawler, JsonlSink, WikiClient, DEFAULT_API_URL};
use paraphrase::{rewrite_corpus, OpenAiClient, Rewriter};

/// Identity header required by the content source's usage policy.
const USER_AGENT: &str = "CorpusPipeline/0.1 (research crawler; corpus-pipeline@example.com)";

/// Well-linked titles to start from when no seed file is given.
const DEFAULT_SEEDS: &[&str] = &[
    "United States",
    "Donald Trump",
    "Elizabeth II",
    "India",
    "Barack Obama",
    "Cristiano Ronaldo",
    "World War II",
    "United Kingdom",
    "Michael Jackson",
    "Elon Musk",
];

#[derive(Parser)]
#[command(name = "corpus")]
#[command(about = "Builds a labeled human/AI paragraph corpus from an encyclopedia crawl")]
#[command(version)]
struct Cli {
    /// Duplicate log output into this file
    #[arg(long, global = true, default_value = "corpus.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl pre-cutoff encyclopedia paragraphs into a JSONL corpus
    Crawl {
        /// Number of paragraphs to collect
        #[arg(short, long, default_value_t = 100)]
        target: usize,

        /// Output file, truncated at crawl start (one JSON record per line)
        #[arg(short, long, default_value = "human_text.jsonl")]
        output: PathBuf,

        /// Cutoff timestamp, YYYYMMDDHHMMSS (UTC)
        #[arg(long, default_value = "20220101000000")]
        cutoff: String,

        /// File with one seed title per line (defaults to a built-in list)
        #[arg(long)]
        seeds_file: Option<PathBuf>,

        /// Content source query endpoint
        #[arg(long, default_value = DEFAULT_API_URL)]
        api_url: String,
    },

    /// Derive AI-paraphrased counterparts for each crawled paragraph
    Rewrite {
        /// Crawl output to read
        #[arg(short, long, default_value = "human_text.jsonl")]
        input: PathBuf,

        /// Output file for human/AI pairs
        #[arg(short, long, default_value = "ai_text.jsonl")]
        output: PathBuf,

        /// Chat model to use
        #[arg(long, default_value = "gpt-4o-mini")]
        model: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    match cli.command {
        Commands::Crawl {
            target,
            output,
            cutoff,
            seeds_file,
            api_url,
        } => run_crawl(target, &output, &cutoff, seeds_file.as_deref(), &api_url).await,
        Commands::Rewrite {
            input,
            output,
            model,
        } => run_rewrite(&input, &output, &model).await,
    }
}

/// Console plus log-file subscriber, filtered by `RUST_LOG` (default info).
fn init_logging(log_file: &Path) -> Result<()> {
    let file = File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .init();
    Ok(())
}

async fn run_crawl(
    target: usize,
    output: &Path,
    cutoff: &str,
    seeds_file: Option<&Path>,
    api_url: &str,
) -> Result<()> {
    let cutoff = NaiveDateTime::parse_from_str(cutoff, "%Y%m%d%H%M%S")
        .context("Cutoff must be a YYYYMMDDHHMMSS timestamp")?;
    let seeds = load_seeds(seeds_file)?;
    tracing::info!(
        seeds = seeds.len(),
        api_url = %api_url,
        output = %output.display(),
        "Crawl configured"
    );

    let config = CrawlConfig::new(seeds, cutoff).with_target(target);
    let client = WikiClient::new(api_url, USER_AGENT);
    let mut sink = JsonlSink::create(output)
        .with_context(|| format!("Failed to create output file {}", output.display()))?;

    let crawler = Crawler::new(client, config);
    let stats = crawler.run(&mut sink).await;

    println!(
        "Collected {} paragraphs across {} pages ({} failed)",
        stats.collected, stats.pages_visited, stats.pages_failed
    );
    Ok(())
}

fn load_seeds(seeds_file: Option<&Path>) -> Result<Vec<String>> {
    let seeds = match seeds_file {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read seed file {}", path.display()))?;
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect()
        }
        None => DEFAULT_SEEDS.iter().map(|s| s.to_string()).collect(),
    };
    Ok(seeds)
}

async fn run_rewrite(input: &Path, output: &Path, model: &str) -> Result<()> {
    let client = OpenAiClient::from_env().context("OPENAI_API_KEY must be set")?;
    let rewriter = Rewriter::new(client, model);
    tracing::info!(model = %model, input = %input.display(), "Rewrite configured");

    let stats = rewrite_corpus(&rewriter, input, output, Duration::from_millis(500))
        .await
        .context("Rewrite run failed")?;

    println!(
        "Rewrote {} paragraphs ({} failed)",
        stats.rewritten, stats.failed
    );
    Ok(())
}
