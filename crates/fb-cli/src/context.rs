use anyhow::Context;
use fb_config::FeedbackConfig;
use fb_db::FeedbackDb;
use fb_db::service::FeedbackService;
use fb_db::store::FeedbackStore;

/// Everything a workflow command needs: the service and the loaded config.
pub struct AppContext<S: FeedbackStore = FeedbackDb> {
    pub service: FeedbackService<S>,
    pub config: FeedbackConfig,
}

impl AppContext<FeedbackDb> {
    /// Open the configured database.
    pub async fn init(config: FeedbackConfig) -> anyhow::Result<Self> {
        let db = FeedbackDb::open(&config.database)
            .await
            .with_context(|| format!("failed to open feedback database at {}", config.database.path))?;
        Ok(Self::new(FeedbackService::new(db), config))
    }

    pub fn close(self) {
        self.service.into_store().close();
    }
}

impl<S: FeedbackStore> AppContext<S> {
    pub const fn new(service: FeedbackService<S>, config: FeedbackConfig) -> Self {
        Self { service, config }
    }
}
