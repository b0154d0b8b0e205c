use sqlx::PgPool;

use crate::config::Config;
use crate::extraction::extractor::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Resume skill extraction. Wraps an `Arc<dyn SkillInference>`, swappable in tests.
    pub extractor: SkillExtractor,
}
