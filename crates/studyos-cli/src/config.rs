//! Configuration file management for studyos.
//!
//! Provides a TOML-based config file at `~/.config/studyos/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use studyos_core::GeminiConfig;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "STUDYOS_GEMINI_MODEL";
pub const BASE_URL_ENV: &str = "STUDYOS_GEMINI_BASE_URL";

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub gemini: GeminiSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the studyos config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/studyos` or `~/.config/studyos`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("studyos");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("studyos")
}

/// Return the path to the studyos config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse a config file. Returns an error if it does not exist.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Load a config file if one exists.
///
/// A missing file is `Ok(None)`; any other read or parse failure is an error.
pub fn load_optional_config(path: &Path) -> Result<Option<ConfigFile>> {
    match std::fs::metadata(path) {
        Ok(_) => load_config_from(path).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e)
            .with_context(|| format!("failed to read config file at {}", path.display())),
    }
}

/// Serialize and write a config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix since the file holds an API key.
pub fn save_config_to(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub bind: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct StudyosConfig {
    pub gemini: GeminiConfig,
    pub bind: String,
    pub port: u16,
}

impl StudyosConfig {
    /// Resolve against the process environment and the default config file.
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let file = load_optional_config(&config_path())?;
        Self::resolve_with(cli, |name| std::env::var(name).ok(), file.as_ref())
    }

    /// Resolve using the chain: CLI flag > env var > config file > default.
    ///
    /// - API key: `--api-key` > `GEMINI_API_KEY` > `gemini.api_key` > error
    /// - Model: `--model` > `STUDYOS_GEMINI_MODEL` > `gemini.model` > `GeminiConfig::DEFAULT_MODEL`
    /// - Base URL: `STUDYOS_GEMINI_BASE_URL` > `gemini.base_url` > `GeminiConfig::DEFAULT_BASE_URL`
    /// - Bind/port: `--bind`/`--port` > `server.*` > `127.0.0.1:5000`
    pub fn resolve_with(
        cli: &CliOverrides,
        env: impl Fn(&str) -> Option<String>,
        file: Option<&ConfigFile>,
    ) -> Result<Self> {
        let gemini_file = file.map(|f| &f.gemini);
        let server_file = file.map(|f| &f.server);

        let api_key = cli
            .api_key
            .clone()
            .or_else(|| env(API_KEY_ENV))
            .or_else(|| gemini_file.and_then(|g| g.api_key.clone()))
            .filter(|k| !k.trim().is_empty());
        let Some(api_key) = api_key else {
            bail!(
                "Gemini API key not found; pass --api-key, set {API_KEY_ENV}, or run `studyos init --api-key <KEY>`"
            );
        };

        let model = cli
            .model
            .clone()
            .or_else(|| env(MODEL_ENV))
            .or_else(|| gemini_file.and_then(|g| g.model.clone()))
            .unwrap_or_else(|| GeminiConfig::DEFAULT_MODEL.to_string());

        let base_url = env(BASE_URL_ENV)
            .or_else(|| gemini_file.and_then(|g| g.base_url.clone()))
            .unwrap_or_else(|| GeminiConfig::DEFAULT_BASE_URL.to_string());

        let bind = cli
            .bind
            .clone()
            .or_else(|| server_file.and_then(|s| s.bind.clone()))
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let port = cli
            .port
            .or_else(|| server_file.and_then(|s| s.port))
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            gemini: GeminiConfig {
                api_key,
                model,
                base_url,
            },
            bind,
            port,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
