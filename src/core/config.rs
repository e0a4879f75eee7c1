//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.playground/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PlaygroundConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub compiler: CompilerConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CompilerConfig {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EditorConfig {
    pub mode: Option<EditorMode>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PreviewConfig {
    pub boilerplate_url: Option<String>,
    pub output_file: Option<String>,
    pub refresh_delay_ms: Option<u64>,
    pub max_age_secs: Option<u64>,
}

/// Which editor backs the source panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Self-managed editor widget with highlighting and its own buffer.
    #[default]
    Rich,
    /// Stateless text area driven straight from the store.
    Plain,
}

impl EditorMode {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rich" => Some(EditorMode::Rich),
            "plain" => Some(EditorMode::Plain),
            _ => None,
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:9292";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_COMPILER_COMMAND: &str = "opal";
pub const DEFAULT_BOILERPLATE_URL: &str = "/playground_boilerplate.js";
/// Preview refreshes are throttled to one per this many milliseconds.
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 1000;
/// A preview older than this is rebuilt from scratch on the next update.
pub const DEFAULT_MAX_AGE_SECS: u64 = 600;

fn default_compiler_args() -> Vec<String> {
    vec!["-c".to_string(), "-e".to_string()]
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub api_timeout: Duration,
    pub compiler_command: String,
    pub compiler_args: Vec<String>,
    pub editor_mode: EditorMode,
    pub boilerplate_url: String,
    pub preview_output: Option<PathBuf>,
    pub refresh_delay: Duration,
    pub max_preview_age: Duration,
    pub start_path: String,
}

/// Values that can only come from the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub plain: bool,
    pub path: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.playground/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".playground").join("config.toml"))
}

/// Load config from `~/.playground/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PlaygroundConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PlaygroundConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PlaygroundConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PlaygroundConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<PlaygroundConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PlaygroundConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Playground Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://localhost:9292"   # Or set PLAYGROUND_API_URL env var
# timeout_secs = 15

# [compiler]
# command = "opal"                     # Ruby → JS compiler
# args = ["-c", "-e"]                  # Source is appended as the last argument

# [editor]
# mode = "rich"                        # "rich" or "plain"; or PLAYGROUND_EDITOR env var

# [preview]
# boilerplate_url = "/playground_boilerplate.js"
# output_file = "preview.html"         # Live copy of the preview document
# refresh_delay_ms = 1000
# max_age_secs = 600
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PlaygroundConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &PlaygroundConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // API base URL: CLI → env → config → default
    let api_base_url = cli
        .api_url
        .clone()
        .or_else(|| env("PLAYGROUND_API_URL"))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    // Editor mode: --plain → env → config → default
    let editor_mode = if cli.plain {
        EditorMode::Plain
    } else {
        env("PLAYGROUND_EDITOR")
            .and_then(|s| EditorMode::parse(&s))
            .or(config.editor.mode)
            .unwrap_or_default()
    };

    ResolvedConfig {
        api_base_url,
        api_timeout: Duration::from_secs(
            config.api.timeout_secs.unwrap_or(DEFAULT_API_TIMEOUT_SECS),
        ),
        compiler_command: config
            .compiler
            .command
            .clone()
            .unwrap_or_else(|| DEFAULT_COMPILER_COMMAND.to_string()),
        compiler_args: config
            .compiler
            .args
            .clone()
            .unwrap_or_else(default_compiler_args),
        editor_mode,
        boilerplate_url: config
            .preview
            .boilerplate_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BOILERPLATE_URL.to_string()),
        preview_output: config.preview.output_file.as_ref().map(PathBuf::from),
        refresh_delay: Duration::from_millis(
            config
                .preview
                .refresh_delay_ms
                .unwrap_or(DEFAULT_REFRESH_DELAY_MS),
        ),
        max_preview_age: Duration::from_secs(
            config.preview.max_age_secs.unwrap_or(DEFAULT_MAX_AGE_SECS),
        ),
        start_path: cli.path.clone().unwrap_or_else(|| "/".to_string()),
    }
}
