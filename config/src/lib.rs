//! Configuration loading for IdeaForge.
//!
//! Reads `~/.ideaforge/config.toml` and resolves the credential handed to the
//! expander and critic.
//!
//! ```toml
//! [api_keys]
//! gemini = "${GEMINI_API_KEY}"
//!
//! [logging]
//! filter = "ideaforge=debug"
//! ```

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use ideaforge_types::Credential;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable consulted when no credential is passed explicitly.
pub const CREDENTIAL_ENV_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Default, Deserialize)]
pub struct IdeaForgeConfig {
    pub api_keys: Option<ApiKeys>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Default, Deserialize)]
pub struct ApiKeys {
    pub gemini: Option<String>,
}

// Manual Debug impl to prevent leaking API keys in logs.
impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field(
                "gemini",
                &if self.gemini.is_some() {
                    "[REDACTED]"
                } else {
                    "None"
                },
            )
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

/// Where the resolved credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// `--api-key` or `IDEAFORGE_API_KEY`.
    Explicit,
    /// `GEMINI_API_KEY`.
    Environment,
    /// `[api_keys] gemini` in the config file.
    ConfigFile,
    /// Nothing configured; an empty credential is used.
    Missing,
}

impl CredentialSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Environment => "environment",
            Self::ConfigFile => "config file",
            Self::Missing => "missing",
        }
    }
}

/// Replace `${VAR}` references with their environment values.
///
/// Unset variables expand to the empty string. An unclosed `${` is kept as is.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

impl IdeaForgeConfig {
    /// Load the default config file. A missing file is not an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file found");
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    /// Load a specific config file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// The configured Gemini key with `${VAR}` references expanded.
    #[must_use]
    pub fn gemini_key(&self) -> Option<String> {
        self.api_keys
            .as_ref()
            .and_then(|keys| keys.gemini.as_deref())
            .map(expand_env_vars)
    }

    #[must_use]
    pub fn log_filter(&self) -> Option<&str> {
        self.logging
            .as_ref()
            .and_then(|logging| logging.filter.as_deref())
            .map(str::trim)
            .filter(|filter| !filter.is_empty())
    }
}

/// Pick a credential by precedence: explicit, then environment, then config file.
///
/// An explicit value is taken as given, blank or not. Blank environment and
/// config values are skipped. When nothing is found the credential is empty,
/// which is never an error.
#[must_use]
pub fn resolve_credential(
    explicit: Option<&str>,
    env_value: Option<&str>,
    config: Option<&IdeaForgeConfig>,
) -> (Credential, CredentialSource) {
    fn present(value: Option<&str>) -> Option<&str> {
        value.filter(|v| !v.trim().is_empty())
    }

    if let Some(value) = explicit {
        return (Credential::new(value), CredentialSource::Explicit);
    }
    if let Some(value) = present(env_value) {
        return (Credential::new(value), CredentialSource::Environment);
    }
    if let Some(value) = config.and_then(IdeaForgeConfig::gemini_key)
        && !value.trim().is_empty()
    {
        return (Credential::new(value), CredentialSource::ConfigFile);
    }

    tracing::warn!(
        "No credential configured; set {} or [api_keys] gemini in {}",
        CREDENTIAL_ENV_VAR,
        config_path().map_or_else(
            || "~/.ideaforge/config.toml".to_string(),
            |p| p.display().to_string()
        )
    );
    (Credential::default(), CredentialSource::Missing)
}

/// [`resolve_credential`] reading [`CREDENTIAL_ENV_VAR`] from the process environment.
#[must_use]
pub fn resolve_credential_from_env(
    explicit: Option<&str>,
    config: Option<&IdeaForgeConfig>,
) -> (Credential, CredentialSource) {
    let env_value = env::var(CREDENTIAL_ENV_VAR).ok();
    resolve_credential(explicit, env_value.as_deref(), config)
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ideaforge").join("config.toml"))
}


// load_from tests

#[test]
fn load_from_reads_file() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let config_path = tmp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "# mine\n[api_keys]\ngemini = \"AIza-disk\"\n\n[logging]\nfilter = \"warn\"\n",
    )
    .unwrap();

    let config = IdeaForgeConfig::load_from(&config_path).unwrap();
    assert_eq!(config.gemini_key(), Some("AIza-disk".to_string()));
    assert_eq!(config.log_filter(), Some("warn"));
}

#[test]
fn load_from_missing_file_is_read_error() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let config_path = tmp_dir.path().join("absent.toml");

    let err = IdeaForgeConfig::load_from(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert_eq!(err.path(), &config_path);
}

#[test]
fn load_from_malformed_file_is_parse_error() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let config_path = tmp_dir.path().join("config.toml");
    std::fs::write(&config_path, "[api_keys\ngemini = ").unwrap();

    let err = IdeaForgeConfig::load_from(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
