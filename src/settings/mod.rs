pub mod layered;
pub mod prompt;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::hibp::client::Endpoint;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Error reading configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Error reading input.. Detected: {0}")]
    InvalidSelection(String),

    #[error("Unknown profile '{0}' (expected 'export' or 'summary')")]
    UnknownProfile(String),

    #[error("Missing value for {0}")]
    MissingValue(&'static str),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Which lookups run for every email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Breaches,
    Pastes,
    Both,
}

impl Service {
    pub const LABELS: [&'static str; 3] = ["Account Breaches", "Public Pastes", "Both"];

    /// Menu number (1-3) to service.
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(Service::Breaches),
            2 => Some(Service::Pastes),
            3 => Some(Service::Both),
            _ => None,
        }
    }

    /// Lookups issued per email, in request order.
    pub fn endpoints(&self) -> &'static [Endpoint] {
        match self {
            Service::Breaches => &[Endpoint::Breaches],
            Service::Pastes => &[Endpoint::Pastes],
            Service::Both => &[Endpoint::Breaches, Endpoint::Pastes],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Service::Breaches => Self::LABELS[0],
            Service::Pastes => Self::LABELS[1],
            Service::Both => Self::LABELS[2],
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Both => write!(f, "{}, {}", Self::LABELS[0], Self::LABELS[1]),
            other => write!(f, "{}", other.label()),
        }
    }
}

/// Reporting behaviour bundle. The two profiles also differ in how they
/// treat out-of-range selections and in their default request pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Deduplicated CSV file.
    Export,
    /// Console listing of affected emails followed by raw blocks.
    Summary,
}

impl Profile {
    /// Clamp a raw selection. `Export` clamps both bounds; `Summary` only
    /// caps the top, so anything below 1 selects nothing.
    pub fn clamp_selection(&self, raw: i64) -> Option<Service> {
        match self {
            Profile::Export => Service::from_number(raw.clamp(1, 3)),
            Profile::Summary => Service::from_number(raw.min(3)),
        }
    }

    /// Sleep after every request when no rate-limit hint is pending.
    pub fn base_delay(&self) -> Duration {
        match self {
            Profile::Export => Duration::ZERO,
            Profile::Summary => Duration::from_secs(6),
        }
    }
}

impl FromStr for Profile {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "export" | "csv" => Ok(Profile::Export),
            "summary" | "console" => Ok(Profile::Summary),
            other => Err(SettingsError::UnknownProfile(other.to_string())),
        }
    }
}

/// Parse a typed selection. Empty input means "Both".
pub fn parse_selection(input: &str) -> Result<i64, SettingsError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(3);
    }
    trimmed
        .parse()
        .map_err(|_| SettingsError::InvalidSelection(trimmed.to_string()))
}

/// Where the CSV export lands.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTarget {
    pub dir: PathBuf,
    pub file_name: String,
    /// `None` asks once the file is written.
    pub open_after: Option<bool>,
}

impl OutputTarget {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Everything a run needs, resolved before the first request.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub api_key: String,
    pub base_url: String,
    pub user_agent: String,
    pub profile: Profile,
    pub input_path: PathBuf,
    /// `None` when the summary profile received a selection below 1.
    pub service: Option<Service>,
    pub output: OutputTarget,
    pub request_delay: Duration,
}

/// `~/hibp`, or `hibp` in the working directory when there is no home.
pub fn default_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("hibp"))
        .unwrap_or_else(|| PathBuf::from("hibp"))
}

pub fn default_input_path() -> PathBuf {
    default_dir().join("input.csv")
}

pub const DEFAULT_OUTPUT_FILE: &str = "output.csv";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_profile_clamps_both_bounds() {
        let p = Profile::Export;
        assert_eq!(p.clamp_selection(0), Some(Service::Breaches));
        assert_eq!(p.clamp_selection(-4), Some(Service::Breaches));
        assert_eq!(p.clamp_selection(2), Some(Service::Pastes));
        assert_eq!(p.clamp_selection(5), Some(Service::Both));
    }

    #[test]
    fn summary_profile_clamps_only_upper_bound() {
        let p = Profile::Summary;
        assert_eq!(p.clamp_selection(5), Some(Service::Both));
        assert_eq!(p.clamp_selection(1), Some(Service::Breaches));
        assert_eq!(p.clamp_selection(0), None);
    }

    #[test]
    fn profiles_differ_in_pacing() {
        assert_eq!(Profile::Export.base_delay(), Duration::ZERO);
        assert_eq!(Profile::Summary.base_delay(), Duration::from_secs(6));
    }

    #[test]
    fn selection_input_parsing() {
        assert_eq!(parse_selection("").unwrap(), 3);
        assert_eq!(parse_selection(" 2 ").unwrap(), 2);
        assert!(matches!(
            parse_selection("two"),
            Err(SettingsError::InvalidSelection(s)) if s == "two"
        ));
    }

    #[test]
    fn profile_names() {
        assert_eq!("CSV".parse::<Profile>().unwrap(), Profile::Export);
        assert_eq!("summary".parse::<Profile>().unwrap(), Profile::Summary);
        assert!("pdf".parse::<Profile>().is_err());
    }

    #[test]
    fn service_display_lists_both_labels() {
        assert_eq!(Service::Both.to_string(), "Account Breaches, Public Pastes");
        assert_eq!(Service::Pastes.to_string(), "Public Pastes");
    }
}
