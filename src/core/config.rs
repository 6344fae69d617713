//! Application configuration management
//!
//! Configuration is resolved once at startup from the process environment,
//! optionally seeded from a dotenv file, and then passed explicitly to the
//! search invoker. Variables already present in the process environment are
//! never overridden by the file.

use crate::core::constants::{self, endpoint, env};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A source of configuration values keyed by variable name
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// The real process environment
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Search credentials
///
/// Either value may be absent; a missing credential is reported when a
/// search is attempted, not when configuration is resolved.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub cse_id: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &Option<String>) -> &'static str {
            if value.is_some() { "<set>" } else { "<unset>" }
        }

        f.debug_struct("Credentials")
            .field("api_key", &redact(&self.api_key))
            .field("cse_id", &redact(&self.cse_id))
            .finish()
    }
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API key and search engine identifier
    pub credentials: Credentials,

    /// Custom Search API host
    pub base_url: String,

    /// Logging level
    pub log_level: String,

    /// Request timeout in seconds; `None` keeps the HTTP client default
    pub request_timeout: Option<u64>,

    /// Dotenv file that was loaded, if any
    pub env_file: Option<EnvFile>,
}

/// Outcome of loading a dotenv file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFile {
    /// File that was read
    pub path: PathBuf,

    /// One message per malformed line that was skipped
    pub skipped: Vec<String>,
}

fn find_env_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(".env"))
        .find(|candidate| candidate.is_file())
}

/// Load a dotenv file into the process environment
///
/// With an explicit `path` only that file is read; otherwise `.env` is
/// searched from the current directory upward. Variables already set in
/// the process are kept. Malformed lines are skipped and reported in
/// [`EnvFile::skipped`]; the remaining lines are still applied.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read. A missing file is
/// `Ok(None)`.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<EnvFile>> {
    let path = match path.map(Path::to_path_buf).or_else(find_env_file) {
        Some(path) => path,
        None => return Ok(None),
    };

    let entries = match dotenv::from_path_iter(&path) {
        Ok(entries) => entries,
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(None);
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read environment file {}", path.display()));
        }
    };

    let mut skipped = Vec::new();
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                if std::env::var_os(&key).is_none() {
                    // SAFETY: runs during startup, before anything else reads the environment
                    unsafe { std::env::set_var(&key, value) };
                }
            }
            Err(e @ dotenv::Error::LineParse(..)) => skipped.push(e.to_string()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read environment file {}", path.display()));
            }
        }
    }

    Ok(Some(EnvFile { path, skipped }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Resolve configuration from the given source
    ///
    /// # Errors
    ///
    /// Returns error if `REQUEST_TIMEOUT` is set but is not a whole number of
    /// seconds.
    pub fn from_source<S: EnvSource + ?Sized>(source: &S) -> Result<Self> {
        let credentials = Credentials {
            api_key: non_empty(source.get(env::GOOGLE_API_KEY)),
            cse_id: non_empty(source.get(env::GOOGLE_CSE_ID)),
        };

        let base_url = non_empty(source.get(env::GOOGLE_CSE_BASE_URL))
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| endpoint::DEFAULT_BASE_URL.to_string());

        let log_level = non_empty(source.get(env::LOG_LEVEL))
            .unwrap_or_else(|| constants::DEFAULT_LOG_LEVEL.to_string());

        let request_timeout = non_empty(source.get(env::REQUEST_TIMEOUT))
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("Invalid {} value: {raw}", env::REQUEST_TIMEOUT))
            })
            .transpose()?;

        Ok(Config {
            credentials,
            base_url,
            log_level,
            request_timeout,
            env_file: None,
        })
    }

    /// Load configuration from the dotenv file and the process environment
    ///
    /// `DOTENV_PATH` selects the file; by default `.env` is looked up from
    /// the current directory.
    pub fn from_env() -> Result<Self> {
        let explicit = non_empty(ProcessEnv.get(env::DOTENV_PATH)).map(PathBuf::from);
        let env_file = load_env_file(explicit.as_deref())?;

        let mut config = Self::from_source(&ProcessEnv)?;
        config.env_file = env_file;
        Ok(config)
    }

    /// Whether both credentials are present
    pub fn has_credentials(&self) -> bool {
        self.credentials.api_key.is_some() && self.credentials.cse_id.is_some()
    }
}
