use crate::core::AppConfig;

/// Read-only after startup; every request reads from it, none mutate it.
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}
