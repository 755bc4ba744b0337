use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::layered::Settings;
use super::{
    default_dir, default_input_path, parse_selection, OutputTarget, Profile, RunConfig, Service,
    SettingsError, DEFAULT_OUTPUT_FILE,
};
use crate::auth::key_store::KeyStore;

/// Source of answers for values the other layers left open.
pub trait Prompt {
    /// Replacement for an input path that does not exist. `None` keeps it.
    fn input_path(&mut self, missing: &Path) -> Result<Option<PathBuf>, SettingsError>;
    /// Raw service selection text.
    fn selection(&mut self) -> Result<String, SettingsError>;
    /// Empty string keeps the default.
    fn output_dir(&mut self, default: &Path) -> Result<String, SettingsError>;
    fn output_file(&mut self) -> Result<String, SettingsError>;
    fn api_key(&mut self) -> Result<Option<String>, SettingsError>;
    fn open_now(&mut self, path: &Path) -> Result<bool, SettingsError>;
}

/// Terminal prompts.
pub struct Interactive {
    theme: ColorfulTheme,
}

impl Interactive {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompt for Interactive {
    fn input_path(&mut self, missing: &Path) -> Result<Option<PathBuf>, SettingsError> {
        let mut candidate = missing.to_path_buf();

        while !candidate.is_file() {
            println!("{}", format!("Unable to find: {}..", candidate.display()).red());
            let entered: String = Input::with_theme(&self.theme)
                .with_prompt("Please enter the full path of the input file")
                .interact_text()?;
            candidate = PathBuf::from(entered.trim());
        }

        Ok(Some(candidate))
    }

    fn selection(&mut self) -> Result<String, SettingsError> {
        println!(
            "{}",
            format!(
                "Services available: 1: {}, 2: {}, 3: {}",
                Service::LABELS[0],
                Service::LABELS[1],
                Service::LABELS[2]
            )
            .cyan()
        );

        let raw: String = Input::with_theme(&self.theme)
            .with_prompt("Which service should we check? (Enter the number, Default 3)")
            .allow_empty(true)
            .interact_text()?;
        Ok(raw)
    }

    fn output_dir(&mut self, default: &Path) -> Result<String, SettingsError> {
        let raw: String = Input::with_theme(&self.theme)
            .with_prompt(format!(
                "Where should we save the results? (Default: {})",
                default.display()
            ))
            .allow_empty(true)
            .interact_text()?;
        Ok(raw)
    }

    fn output_file(&mut self) -> Result<String, SettingsError> {
        let raw: String = Input::with_theme(&self.theme)
            .with_prompt(format!(
                "What do you want to call the file? (Default: {})",
                DEFAULT_OUTPUT_FILE
            ))
            .allow_empty(true)
            .interact_text()?;
        Ok(raw)
    }

    fn api_key(&mut self) -> Result<Option<String>, SettingsError> {
        println!("🔐 No stored API key found.");
        let key = Password::with_theme(&self.theme)
            .with_prompt("Enter your Have I Been Pwned API key")
            .interact()?;
        Ok(Some(key.trim().to_string()))
    }

    fn open_now(&mut self, path: &Path) -> Result<bool, SettingsError> {
        let open = Confirm::with_theme(&self.theme)
            .with_prompt(format!("Open {} now?", path.display()))
            .default(false)
            .interact()?;
        Ok(open)
    }
}

/// Answers with defaults only, for `--no-prompt` runs.
pub struct NoPrompt;

impl Prompt for NoPrompt {
    fn input_path(&mut self, _missing: &Path) -> Result<Option<PathBuf>, SettingsError> {
        Ok(None)
    }

    fn selection(&mut self) -> Result<String, SettingsError> {
        Ok(String::new())
    }

    fn output_dir(&mut self, _default: &Path) -> Result<String, SettingsError> {
        Ok(String::new())
    }

    fn output_file(&mut self) -> Result<String, SettingsError> {
        Ok(String::new())
    }

    fn api_key(&mut self) -> Result<Option<String>, SettingsError> {
        Ok(None)
    }

    fn open_now(&mut self, _path: &Path) -> Result<bool, SettingsError> {
        Ok(false)
    }
}

/// Fill every gap in `settings`, asking `prompt` for what is still missing.
pub fn resolve(
    settings: Settings,
    prompt: &mut dyn Prompt,
    keys: &dyn KeyStore,
) -> Result<RunConfig, SettingsError> {
    let profile: Profile = settings.profile.parse()?;

    let api_key = match settings.api_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => key,
        None => match keys.load() {
            Ok(Some(key)) => {
                println!("🔑 Using stored API key");
                key
            }
            stored => {
                if let Err(e) = stored {
                    tracing::warn!(error = %e, "could not read stored API key");
                }
                let key = prompt
                    .api_key()?
                    .filter(|k| !k.is_empty())
                    .ok_or(SettingsError::MissingValue("api_key"))?;
                if let Err(e) = keys.save(&key) {
                    tracing::warn!(error = %e, "could not store API key in keyring");
                } else {
                    println!("✅ API key saved securely!");
                }
                key
            }
        },
    };

    let mut input_path = settings.input_path.unwrap_or_else(default_input_path);
    if !input_path.is_file() {
        if let Some(replacement) = prompt.input_path(&input_path)? {
            input_path = replacement;
        }
    }

    let raw_selection = match settings.service {
        Some(service) => service,
        None => prompt.selection()?,
    };
    let service = profile.clamp_selection(parse_selection(&raw_selection)?);

    // Output location only matters for the CSV export.
    let output = if profile == Profile::Export {
        let default = default_dir();
        let dir = match settings.output_dir {
            Some(dir) => dir,
            None => non_empty(prompt.output_dir(&default)?)
                .map(PathBuf::from)
                .unwrap_or(default),
        };
        let file_name = match settings.output_file {
            Some(name) => name,
            None => non_empty(prompt.output_file()?)
                .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string()),
        };
        OutputTarget {
            dir,
            file_name,
            open_after: settings.open_after,
        }
    } else {
        OutputTarget {
            dir: default_dir(),
            file_name: DEFAULT_OUTPUT_FILE.to_string(),
            open_after: Some(false),
        }
    };

    let request_delay = settings
        .request_delay_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| profile.base_delay());

    Ok(RunConfig {
        api_key,
        base_url: settings.base_url,
        user_agent: settings.user_agent,
        profile,
        input_path,
        service,
        output,
        request_delay,
    })
}

fn non_empty(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
