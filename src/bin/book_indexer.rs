//! Offline indexer: splits a text export of the book into pages, embeds them
//! and writes `pages.csv` and `embeddings.csv`.

use std::{path::PathBuf, sync::Arc};

use ai_llm_service::LlmServiceProfiles;
use anyhow::{Context, bail};
use book_qa::{settings::ServerSettings, telemetry};
use clap::Parser;
use colored::Colorize;
use page_store::{
    embed::openai::{OpenAiEmbedder, OpenAiEmbedderConfig},
    ingest::{DEFAULT_MAX_PAGE_TOKENS, SkipReason, embed_pages, split_pages},
    io_csv::{read_page_table_file, write_embeddings_file, write_page_table_file},
    progress::IndicatifProgress,
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "book-indexer", about = "Build the page and embedding tables for book-qa")]
struct Args {
    /// Plain-text export of the book, pages separated by form feeds.
    #[arg(long, required_unless_present = "embed_only")]
    input: Option<PathBuf>,

    /// Page table to write (or read with --embed-only).
    #[arg(long, default_value = "data/pages.csv")]
    pages: PathBuf,

    /// Embedding table to write.
    #[arg(long, default_value = "data/embeddings.csv")]
    embeddings: PathBuf,

    /// Embedding requests in flight.
    #[arg(long, default_value_t = 4)]
    concurrency: usize,

    /// Pages above this many tokens are skipped.
    #[arg(long, default_value_t = DEFAULT_MAX_PAGE_TOKENS)]
    max_page_tokens: usize,

    /// Re-embed an existing page table instead of splitting the input.
    #[arg(long)]
    embed_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init("warn,page_store=info")?;
    let args = Args::parse();

    let pages = if args.embed_only {
        read_page_table_file(&args.pages)
            .with_context(|| format!("reading {}", args.pages.display()))?
    } else {
        let Some(input) = &args.input else {
            bail!("--input is required unless --embed-only is set");
        };
        let text = std::fs::read_to_string(input)
            .with_context(|| format!("reading {}", input.display()))?;
        let split = split_pages(&text, args.max_page_tokens)?;

        for s in &split.skipped {
            let why = match s.reason {
                SkipReason::Blank => "blank".to_string(),
                SkipReason::TooLong { tokens } => format!("{tokens} tokens"),
            };
            println!("{} {} ({})", "skipped".yellow(), s.title, why);
        }
        write_page_table_file(&args.pages, &split.pages)?;
        split.pages
    };

    if pages.is_empty() {
        bail!("no pages to embed");
    }

    let settings = ServerSettings::from_env();
    let svc = Arc::new(LlmServiceProfiles::from_env()?);
    let embedder = OpenAiEmbedder::new(OpenAiEmbedderConfig {
        svc,
        dim: settings.embedding_dim,
    });

    info!(pages = pages.len(), concurrency = args.concurrency, "embedding pages");
    let progress = IndicatifProgress::pages(pages.len() as u64);
    let store = embed_pages(&pages, &embedder, args.concurrency, &progress).await?;
    write_embeddings_file(&args.embeddings, &store)?;

    println!(
        "{} {} pages, {} tokens, dimension {}",
        "indexed".green().bold(),
        pages.len(),
        pages.total_tokens(),
        store.dimension()
    );
    println!("  pages:      {}", args.pages.display());
    println!("  embeddings: {}", args.embeddings.display());
    Ok(())
}
