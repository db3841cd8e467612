use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use api::core::app_state::{ApiConfig, AppState};
use book_qa::{settings::ServerSettings, telemetry};
use contextor::{AskDeps, AskPipeline, OpenAiCompletion, cfg::ContextorConfig};
use page_store::{
    CsvPageRepository, InMemoryPageRepository, PageRepository,
    embed::openai::{OpenAiEmbedder, OpenAiEmbedderConfig},
};
use qa_cache::SqliteQaCache;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env; real environment variables win.
    dotenvy::dotenv().ok();
    telemetry::init("info")?;

    let settings = ServerSettings::from_env();
    let api_config = ApiConfig::from_env()?;
    let svc = Arc::new(LlmServiceProfiles::from_env()?);

    let csv = CsvPageRepository::new(&settings.pages_csv, &settings.embeddings_csv);
    let pages: Arc<dyn PageRepository> = if settings.preload_pages {
        Arc::new(InMemoryPageRepository::preload(&csv).await?)
    } else {
        Arc::new(csv)
    };

    let deps = AskDeps {
        pages,
        embedder: Arc::new(OpenAiEmbedder::new(OpenAiEmbedderConfig {
            svc: Arc::clone(&svc),
            dim: settings.embedding_dim,
        })),
        generator: Arc::new(OpenAiCompletion::new(svc)),
        cache: Arc::new(SqliteQaCache::connect(&settings.database_url).await?),
    };
    let pipeline = AskPipeline::new(&ContextorConfig::from_env(), deps);

    info!(
        pages = %settings.pages_csv.display(),
        embeddings = %settings.embeddings_csv.display(),
        preload = settings.preload_pages,
        "starting book-qa"
    );
    api::start(api_config, AppState::new(Arc::new(pipeline))).await?;

    Ok(())
}
