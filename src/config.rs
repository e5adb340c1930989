// Test client settings.
//
// Layers, lowest precedence first: built-in defaults, the TOML config file,
// `KALC_*` environment variables, command-line flags. Environment and flags
// are both handled by clap (`env = ...`), so a flag wins over its variable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::Parser;
use serde::Deserialize;

use crate::scenario::{Scenario, ScenarioSettings, Step};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:42000";
pub const DEFAULT_TERMBASE: &str = "Kalcium";
pub const DEFAULT_SAMPLE_MEDIA: &str = "Resources/sample.png";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONFIG_DIR_NAME: &str = "kalcium-test-client";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Runs a fixed scenario against a Kalcium server and reports each step.
#[derive(Parser, Debug, Default)]
#[command(name = "kalcium-test-client", version, about)]
pub struct CliArgs {
    /// Kalcium server address
    #[arg(long, env = "KALC_SERVER_URL")]
    pub server_url: Option<String>,

    /// User to log in with (prompted when missing)
    #[arg(long, short = 'u', env = "KALC_USERNAME")]
    pub username: Option<String>,

    /// Password (prompted when missing)
    #[arg(long, env = "KALC_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Name of the termbase the entry steps work in
    #[arg(long, short = 't', env = "KALC_TERMBASE")]
    pub termbase: Option<String>,

    /// Config file (default: <config dir>/kalcium-test-client/config.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Refuse servers whose X-Kalc-Version differs from the supported release
    #[arg(long)]
    pub check_kalc_version: bool,

    /// Request timeout in seconds, 0 for none
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Where downloaded media files are written
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// Image attached to the test entry, empty for none
    #[arg(long, value_parser = OsStringValueParser::new().map(PathBuf::from))]
    pub sample_media: Option<PathBuf>,
}

/// Shape of the TOML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub termbase: Option<String>,
    pub check_kalc_version: Option<bool>,
    pub timeout: Option<u64>,
    pub download_dir: Option<PathBuf>,
    pub sample_media: Option<PathBuf>,
    /// Replaces the standard step list.
    pub steps: Option<Vec<Step>>,
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read `path`. With `required` unset a missing file yields the empty
    /// config.
    pub fn read(path: &Path, required: bool) -> Result<Self> {
        if !required && !path.exists() {
            return Ok(FileConfig::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Resolved settings of one run.
#[derive(Debug, Clone)]
pub struct TestClientConfig {
    pub server_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub termbase: String,
    pub check_kalc_version: bool,
    pub timeout: Option<Duration>,
    pub download_dir: PathBuf,
    /// `None` when an empty path was configured.
    pub sample_media: Option<PathBuf>,
    pub scenario: Scenario,
}

impl TestClientConfig {
    pub fn load(args: CliArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::read(path, true)?,
            None => match default_config_path() {
                Some(path) => FileConfig::read(&path, false)?,
                None => FileConfig::default(),
            },
        };
        Ok(Self::from_layers(args, file))
    }

    pub fn from_layers(args: CliArgs, file: FileConfig) -> Self {
        let timeout_secs = args
            .timeout
            .or(file.timeout)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        TestClientConfig {
            server_url: args
                .server_url
                .or(file.server_url)
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            username: args.username.or(file.username),
            password: args.password.or(file.password),
            termbase: args
                .termbase
                .or(file.termbase)
                .unwrap_or_else(|| DEFAULT_TERMBASE.to_string()),
            check_kalc_version: args.check_kalc_version || file.check_kalc_version.unwrap_or(false),
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            download_dir: args
                .download_dir
                .or(file.download_dir)
                .unwrap_or_else(std::env::temp_dir),
            sample_media: Some(
                args.sample_media
                    .or(file.sample_media)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLE_MEDIA)),
            )
            .filter(|path| !path.as_os_str().is_empty()),
            scenario: file.steps.map(Scenario::new).unwrap_or_else(Scenario::standard),
        }
    }

    pub fn scenario_settings(&self, user_name: String, password: String) -> ScenarioSettings {
        ScenarioSettings {
            user_name,
            password,
            termbase_name: self.termbase.clone(),
            sample_media: self.sample_media.clone(),
            download_dir: self.download_dir.clone(),
        }
    }
}
