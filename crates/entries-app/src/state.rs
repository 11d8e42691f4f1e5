use std::{sync::Arc, time::Duration};

use entries_dal::Pool;

pub const DEFAULT_CORS_MAX_AGE: Duration = Duration::from_secs(86400);

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(app_config: AppConfig, pool: Pool) -> Self {
        AppState {
            state: Arc::new(AppStateInner { app_config, pool }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.app_config
    }

    pub fn pool(&self) -> &Pool {
        &self.state.pool
    }
}

struct AppStateInner {
    pool: Pool,
    app_config: AppConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// How long browsers may cache preflight answers
    pub cors_max_age: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cors_max_age: DEFAULT_CORS_MAX_AGE,
        }
    }
}
