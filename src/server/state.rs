use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::storage::Storage;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<Config>,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, config: Config) -> Self {
        let metrics = crate::metrics::init_metrics();
        let sessions = Arc::new(SessionStore::new(config.server.session_ttl_minutes));
        Self {
            storage,
            sessions,
            config: Arc::new(config),
            metrics,
        }
    }
}
