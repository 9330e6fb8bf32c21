// src/api/state.rs
use crate::config::AppConfig;
use crate::fixture::{self, FixtureSource};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub fixture: Arc<dyn FixtureSource>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let fixture = fixture::from_config(&config);
        Self::with_source(config, fixture)
    }

    pub fn with_source(config: AppConfig, fixture: Arc<dyn FixtureSource>) -> Self {
        Self {
            config: Arc::new(config),
            fixture,
        }
    }
}
