//! AppContext: app-wide collaborators, constructed once and shared by clone.

use std::sync::Arc;

use lumen_client::{ApiClient, FileStateQuery};
use lumen_core::errors::LumenResult;
use lumen_core::traits::PredictionApi;
use lumen_core::LumenConfig;

use crate::notifications::NotificationCenter;

/// Shared application context.
///
/// Cloning is cheap; every clone sees the same file-state cache and the same
/// notification queue.
pub struct AppContext<A> {
    pub config: Arc<LumenConfig>,
    pub api: Arc<A>,
    pub file_query: Arc<FileStateQuery<Arc<A>>>,
    pub notifications: Arc<NotificationCenter>,
}

impl AppContext<ApiClient> {
    /// Build the context around a real HTTP client.
    pub fn connect(config: LumenConfig) -> LumenResult<Self> {
        let api = ApiClient::new(&config.api)?;
        tracing::info!(base_url = %api.base_url(), "lumen context initialized");
        Ok(Self::with_api(config, api))
    }
}

impl<A: PredictionApi> AppContext<A> {
    /// Build the context around any `PredictionApi` implementation.
    pub fn with_api(config: LumenConfig, api: A) -> Self {
        let api = Arc::new(api);
        let file_query = Arc::new(FileStateQuery::new(Arc::clone(&api), &config.cache));
        let notifications = Arc::new(NotificationCenter::new(config.notifications.clone()));
        Self {
            config: Arc::new(config),
            api,
            file_query,
            notifications,
        }
    }
}

impl<A> Clone for AppContext<A> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            api: Arc::clone(&self.api),
            file_query: Arc::clone(&self.file_query),
            notifications: Arc::clone(&self.notifications),
        }
    }
}
