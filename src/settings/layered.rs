use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::SettingsError;
use crate::hibp::client::{DEFAULT_USER_AGENT, HIBP_API_BASE};

pub const ENV_PREFIX: &str = "BREACHCHECK";

/// Values from defaults, the config file and the environment. Anything left
/// as `None` is asked for interactively or falls back to a default path.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub user_agent: String,
    pub profile: String,
    #[serde(default)]
    pub input_path: Option<PathBuf>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub output_file: Option<String>,
    #[serde(default)]
    pub open_after: Option<bool>,
    #[serde(default)]
    pub request_delay_secs: Option<u64>,
}

/// `<config dir>/breachcheck/config.toml`
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("breachcheck").join("config.toml"))
}

pub fn load(config_file: Option<&Path>) -> Result<Settings, SettingsError> {
    let mut builder = Config::builder()
        .set_default("base_url", HIBP_API_BASE)?
        .set_default("user_agent", DEFAULT_USER_AGENT)?
        .set_default("profile", "export")?;

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(false));
    }

    let settings = builder
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}

/// Hand-parsed command line flags.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CliArgs {
    pub config_file: Option<PathBuf>,
    pub input_path: Option<PathBuf>,
    pub service: Option<String>,
    pub profile: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub output_file: Option<String>,
    pub open_after: bool,
    pub no_prompt: bool,
}

impl CliArgs {
    pub fn parse(args: &[String]) -> Self {
        Self {
            config_file: flag_value(args, "--config").map(PathBuf::from),
            input_path: flag_value(args, "--input").map(PathBuf::from),
            service: flag_value(args, "--service"),
            profile: flag_value(args, "--profile"),
            output_dir: flag_value(args, "--output-dir").map(PathBuf::from),
            output_file: flag_value(args, "--output-file"),
            open_after: args.iter().any(|a| a == "--open"),
            no_prompt: args.iter().any(|a| a == "--no-prompt"),
        }
    }
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|pos| args.get(pos + 1))
        .filter(|value| !value.starts_with("--"))
        .cloned()
}

impl Settings {
    /// Flags win over every other layer.
    pub fn apply_cli(mut self, cli: &CliArgs) -> Self {
        if let Some(path) = &cli.input_path {
            self.input_path = Some(path.clone());
        }
        if let Some(service) = &cli.service {
            self.service = Some(service.clone());
        }
        if let Some(profile) = &cli.profile {
            self.profile = profile.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = Some(dir.clone());
        }
        if let Some(file) = &cli.output_file {
            self.output_file = Some(file.clone());
        }
        if cli.open_after {
            self.open_after = Some(true);
        }
        self
    }
}
