// src/fixture.rs
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{AppConfig, FixtureMode};
use crate::errors::{EvalHubError, Result};
use crate::models::Fixture;

/// Where handlers get the fixture document from.
///
/// Implementations must be cheap to call on every request; handlers call
/// `load` once per request and never hold the result across requests.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    async fn load(&self) -> Result<Arc<Fixture>>;

    /// Human-readable origin of the data, used in logs and the health check.
    fn describe(&self) -> String;
}

pub fn parse_fixture(bytes: &[u8]) -> Result<Fixture> {
    Fixture::from_slice(bytes)
}

pub fn load_fixture(path: &Path) -> Result<Fixture> {
    let bytes = std::fs::read(path)?;
    parse_fixture(&bytes)
}

/// A fixture read once and shared for the lifetime of the process.
pub struct StaticFixture {
    origin: String,
    loaded: std::result::Result<Arc<Fixture>, String>,
}

impl StaticFixture {
    /// Read `path` now. A failure does not abort startup; it is remembered
    /// and reported on every later `load`.
    pub fn open(path: &Path) -> Self {
        let origin = path.display().to_string();
        let loaded = match load_fixture(path) {
            Ok(fixture) => {
                log::info!(
                    "Loaded fixture {} ({} runs, {} tasks)",
                    origin,
                    fixture.evaluation_runs().map_or(0, <[_]>::len),
                    fixture.evaluation_tasks().map_or(0, <[_]>::len)
                );
                Ok(Arc::new(fixture))
            }
            Err(e) => {
                log::error!("Failed to load fixture {}: {}", origin, e);
                Err(e.to_string())
            }
        };
        Self { origin, loaded }
    }

    pub fn from_fixture(fixture: Fixture) -> Self {
        Self {
            origin: "in-memory".to_string(),
            loaded: Ok(Arc::new(fixture)),
        }
    }

    /// A source that always fails with `reason`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            origin: "unavailable".to_string(),
            loaded: Err(reason.into()),
        }
    }
}

#[async_trait]
impl FixtureSource for StaticFixture {
    async fn load(&self) -> Result<Arc<Fixture>> {
        self.loaded
            .clone()
            .map_err(EvalHubError::Unavailable)
    }

    fn describe(&self) -> String {
        self.origin.clone()
    }
}

/// A fixture re-read from disk on every request.
pub struct FileFixture {
    path: PathBuf,
}

impl FileFixture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FixtureSource for FileFixture {
    async fn load(&self) -> Result<Arc<Fixture>> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(Arc::new(parse_fixture(&bytes)?))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Build the source selected by the configuration.
pub fn from_config(config: &AppConfig) -> Arc<dyn FixtureSource> {
    match config.fixture_mode {
        FixtureMode::Startup => Arc::new(StaticFixture::open(&config.fixture_path)),
        FixtureMode::PerRequest => {
            log::info!("Reading fixture {} on every request", config.fixture_path.display());
            Arc::new(FileFixture::new(&config.fixture_path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOCUMENT: &str = r#"{
        "evaluationRuns": [{"id": "r1"}],
        "evaluationTasks": [{"id": "t1", "evaluationId": "r1"}]
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_fixture_rejects_malformed_json() {
        let err = parse_fixture(b"{\"evaluationRuns\": [").unwrap_err();
        assert!(matches!(err, EvalHubError::JsonParse(_)));
    }

    #[test]
    fn test_parse_fixture_rejects_non_object() {
        let err = parse_fixture(br#"[{"id": "r1"}]"#).unwrap_err();
        assert!(matches!(err, EvalHubError::JsonParse(_)));
    }

    #[test]
    fn test_wrong_shaped_collection_only_fails_that_collection() {
        let fixture = parse_fixture(br#"{"evaluationRuns": {"id": "r1"}, "deployments": [{"id": 3}]}"#).unwrap();
        assert!(matches!(fixture.evaluation_runs(), Err(EvalHubError::Malformed(_))));
        assert_eq!(fixture.deployments().unwrap().len(), 1);
    }

    #[test]
    fn test_load_fixture_missing_file() {
        let err = load_fixture(Path::new("/nonexistent/evaluations.json")).unwrap_err();
        assert!(matches!(err, EvalHubError::FileRead(_)));
    }

    #[actix_rt::test]
    async fn test_static_fixture_loads_once() {
        let file = write_temp(DOCUMENT);
        let source = StaticFixture::open(file.path());

        std::fs::write(file.path(), "not json").unwrap();

        let fixture = source.load().await.unwrap();
        assert_eq!(fixture.evaluation_runs().unwrap().len(), 1);
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[actix_rt::test]
    async fn test_static_fixture_remembers_startup_failure() {
        let source = StaticFixture::open(Path::new("/nonexistent/evaluations.json"));
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, EvalHubError::Unavailable(_)));
    }

    #[actix_rt::test]
    async fn test_file_fixture_sees_updates() {
        let file = write_temp(DOCUMENT);
        let source = FileFixture::new(file.path());
        assert_eq!(source.load().await.unwrap().evaluation_runs().unwrap().len(), 1);

        std::fs::write(file.path(), r#"{"evaluationRuns": [{"id": "r1"}, {"id": "r2"}]}"#).unwrap();
        assert_eq!(source.load().await.unwrap().evaluation_runs().unwrap().len(), 2);

        std::fs::write(file.path(), "[").unwrap();
        assert!(source.load().await.is_err());
    }
}
