use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::debug;

use crate::github::DEFAULT_API_URL;

pub const DEFAULT_CONFIG_FILE: &str = ".ossint.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("GitHub username is required. Set it with --username")]
    MissingUsername,

    #[error("error getting GitHub token: {0}\nPlease provide a token with --token or set the GITHUB_TOKEN environment variable")]
    TokenUnavailable(String),
}

/// Settings read from `.ossint.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// Token used when neither --token nor GITHUB_TOKEN is set.
    pub token: Option<String>,
    /// REST API root, for GitHub Enterprise installs.
    pub api_url: Option<String>,
}

impl Config {
    /// Load `path` if given, otherwise `.ossint.toml` in the current
    /// directory. Only the default file is allowed to be missing.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from(path)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        debug!(path = %path.display(), "loading config file");
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn api_url(&self) -> &str {
        self.github.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}

/// Pick the first non-empty token from: the --token flag, GITHUB_TOKEN, the
/// config file, then the output of `helper`. A notice goes to `notice`
/// before the helper runs.
pub fn resolve_token<F, W>(
    flag: Option<String>,
    env: Option<String>,
    config: &Config,
    helper: F,
    notice: &mut W,
) -> Result<String, ConfigError>
where
    F: FnOnce() -> Result<String, ConfigError>,
    W: Write,
{
    let candidate = [flag, env, config.github.token.clone()]
        .into_iter()
        .flatten()
        .find(|token| !token.is_empty());
    if let Some(token) = candidate {
        return Ok(token);
    }

    // A notice that cannot be written is no reason to abort.
    writeln!(
        notice,
        "GitHub token not provided. Attempting to use 'gh auth token'..."
    )
    .ok();
    helper()
}

/// Ask the GitHub CLI for its stored token.
pub fn gh_auth_token() -> Result<String, ConfigError> {
    run_token_helper("gh", &["auth", "token"])
}

/// Run a credential helper and take its trimmed stdout as the token.
pub fn run_token_helper(program: &str, args: &[&str]) -> Result<String, ConfigError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| ConfigError::TokenUnavailable(format!("failed to run {program}: {e}")))?;

    if !output.status.success() {
        return Err(ConfigError::TokenUnavailable(format!(
            "{program} exited with {}",
            output.status
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(ConfigError::TokenUnavailable(format!(
            "{program} printed no token"
        )));
    }
    Ok(token)
}
