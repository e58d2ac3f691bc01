use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docrelay_api::{app::build_router, config::Config, state::AppState};
use docrelay_persist::{MongoStore, SessionStore, UserStore};
use docrelay_provider::{ChatPdfClient, ProviderClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting docrelay API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    tracing::info!("Connecting to MongoDB");
    let store = Arc::new(MongoStore::connect(&config.mongodb_uri, &config.mongodb.database).await?);
    tracing::info!("MongoDB connected");

    let provider: Arc<dyn ProviderClient> = Arc::new(
        ChatPdfClient::with_base_url(
            config.chatpdf_api_key.clone(),
            config.provider.base_url.clone(),
        )?
        .max_attempts(config.provider.max_attempts),
    );

    let sessions: Arc<dyn SessionStore> = store.clone();
    let users: Arc<dyn UserStore> = store;

    let state = Arc::new(AppState::new(config, sessions, users, provider));
    let app = build_router(state.clone());

    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("API docs: http://{}/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
