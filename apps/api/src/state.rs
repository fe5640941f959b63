use std::sync::Arc;

use sqlx::PgPool;

use crate::billing::store::BillingStore;
use crate::config::Config;
use crate::documents::bucket::BucketStorage;
use crate::documents::renderer::DocumentRenderer;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pool behind the Record API and its lookups.
    pub db: PgPool,
    /// Persistence seam of the billing core. Default: `PgBillingStore` over `db`.
    pub store: Arc<dyn BillingStore>,
    /// Renders invoices and work orders from the content directory.
    pub renderer: DocumentRenderer,
    /// Provider chosen once from `LLM_PROVIDER`.
    pub llm: Arc<dyn TextGenerator>,
    pub bucket: BucketStorage,
    pub config: Config,
}
