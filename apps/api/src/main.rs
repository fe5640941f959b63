mod billing;
mod config;
mod db;
mod documents;
mod errors;
mod evaluation;
mod llm_client;
mod models;
mod records;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::billing::store::PgBillingStore;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::documents::bucket::BucketStorage;
use crate::documents::content::ContentDir;
use crate::documents::renderer::DocumentRenderer;
use crate::llm_client::build_generator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Agency API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and bring the schema up to date
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize S3-compatible bucket storage
    let s3 = build_s3_client(&config).await;
    let bucket = BucketStorage::new(s3, config.s3_bucket.clone(), config.s3_public_url.clone());
    info!("Bucket storage initialized (bucket: {})", config.s3_bucket);

    // Templates are read from, and rendered documents written to, the content directory
    let content = Arc::new(ContentDir::open(config.content_dir.clone()).await?);
    info!("Content directory: {}", config.content_dir.display());
    let renderer = DocumentRenderer::new(
        content.clone(),
        content,
        config.brand_logo.clone(),
        config.invoice_title.clone(),
    );

    // Initialize LLM client for the configured provider
    let llm = build_generator(&config.llm)?;
    info!("LLM client initialized (provider: {})", config.llm.provider);

    // Build app state
    let state = AppState {
        store: Arc::new(PgBillingStore::new(db.clone())),
        db,
        renderer,
        llm,
        bucket,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client for MinIO (local) or any S3-compatible endpoint.
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "agency-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.s3_region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
