// src/config.rs
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use crate::errors::{Result, EvalHubError};

pub const DEFAULT_FIXTURE_PATH: &str = "data/evaluations.json";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// When the fixture document is read from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixtureMode {
    /// Read once when the server starts and shared by every request.
    #[default]
    Startup,
    /// Read again on every request, so edits show up without a restart.
    #[serde(alias = "per_request")]
    PerRequest,
}

impl FromStr for FixtureMode {
    type Err = EvalHubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "startup" => Ok(FixtureMode::Startup),
            "per-request" | "per_request" => Ok(FixtureMode::PerRequest),
            other => Err(EvalHubError::Config(format!(
                "Unknown fixture mode '{}'. Expected 'startup' or 'per-request'.",
                other
            ))),
        }
    }
}

impl fmt::Display for FixtureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureMode::Startup => write!(f, "startup"),
            FixtureMode::PerRequest => write!(f, "per-request"),
        }
    }
}

/// Optional TOML config file. Every key may be overridden from the environment.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,

    #[serde(default)]
    pub fixture_mode: Option<FixtureMode>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// High-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fixture_path: PathBuf,
    pub fixture_mode: FixtureMode,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            fixture_path: PathBuf::from(DEFAULT_FIXTURE_PATH),
            fixture_mode: FixtureMode::Startup,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    /// Precedence is lookup, then the TOML file named by `EVALHUB_CONFIG`, then defaults.
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let file = match var("EVALHUB_CONFIG") {
            Some(path) => FileConfig::load(Path::new(&path))?,
            None => FileConfig::default(),
        };
        let defaults = AppConfig::default();

        let fixture_path = var("FIXTURE_PATH")
            .map(PathBuf::from)
            .or(file.fixture_path)
            .unwrap_or(defaults.fixture_path);

        let fixture_mode = match var("FIXTURE_MODE") {
            Some(mode) => mode.parse()?,
            None => file.fixture_mode.unwrap_or(defaults.fixture_mode),
        };

        let host = var("HOST")
            .map(|h| h.trim().to_string())
            .or(file.host)
            .unwrap_or(defaults.host);

        let port = match var("PORT") {
            Some(port) => port.trim().parse::<u16>().map_err(|_| {
                EvalHubError::Config(format!("PORT must be a number between 0 and 65535, got '{}'", port))
            })?,
            None => file.port.unwrap_or(defaults.port),
        };

        Ok(AppConfig { fixture_path, fixture_mode, host, port })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.fixture_path, PathBuf::from(DEFAULT_FIXTURE_PATH));
        assert_eq!(config.fixture_mode, FixtureMode::Startup);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("FIXTURE_PATH", "/srv/fixtures/evals.json"),
            ("FIXTURE_MODE", "per-request"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9090"),
        ]))
        .unwrap();

        assert_eq!(config.fixture_path, PathBuf::from("/srv/fixtures/evals.json"));
        assert_eq!(config.fixture_mode, FixtureMode::PerRequest);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[("PORT", "  "), ("FIXTURE_PATH", "")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.fixture_path, PathBuf::from(DEFAULT_FIXTURE_PATH));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, EvalHubError::Config(_)));
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("FIXTURE_MODE", "sometimes")])).unwrap_err();
        assert!(err.to_string().contains("sometimes"));
    }

    #[test]
    fn test_fixture_mode_parsing() {
        assert_eq!("startup".parse::<FixtureMode>().unwrap(), FixtureMode::Startup);
        assert_eq!("Per-Request".parse::<FixtureMode>().unwrap(), FixtureMode::PerRequest);
        assert_eq!("per_request".parse::<FixtureMode>().unwrap(), FixtureMode::PerRequest);
        assert_eq!(FixtureMode::PerRequest.to_string(), "per-request");
    }

    #[test]
    fn test_toml_file_with_env_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
fixture_path = "fixtures/runs.json"
fixture_mode = "per-request"
port = 3000
"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = AppConfig::from_lookup(lookup_from(&[
            ("EVALHUB_CONFIG", path.as_str()),
            ("PORT", "4000"),
        ]))
        .unwrap();

        assert_eq!(config.fixture_path, PathBuf::from("fixtures/runs.json"));
        assert_eq!(config.fixture_mode, FixtureMode::PerRequest);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn test_toml_accepts_same_mode_spellings_as_env() {
        let dashed = FileConfig::parse("fixture_mode = \"per-request\"").unwrap();
        let underscored = FileConfig::parse("fixture_mode = \"per_request\"").unwrap();

        assert_eq!(dashed.fixture_mode, Some(FixtureMode::PerRequest));
        assert_eq!(underscored.fixture_mode, Some(FixtureMode::PerRequest));
    }

    #[test]
    fn test_toml_unknown_key_is_an_error() {
        let err = FileConfig::parse("fixture = \"x.json\"").unwrap_err();
        assert!(matches!(err, EvalHubError::TomlParse(_)));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("EVALHUB_CONFIG", "/nonexistent/evalhub.toml")])).unwrap_err();
        assert!(matches!(err, EvalHubError::FileRead(_)));
    }
}
