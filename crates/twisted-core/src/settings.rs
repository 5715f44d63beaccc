use crate::selection::SelectionMode;
use crate::theme::ThemeVariant;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_PATH: &str = "config.toml";
const ENV_PREFIX: &str = "TWISTED_";
const IMAGE_SIZES: [&str; 3] = ["1K", "2K", "4K"];

#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    TextModel,
    ImageModel,
    ApiBase,
    TriggerPhrase,
    AspectRatio,
    ImageSize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    pub api_base: String,
    pub text_model: String,
    pub image_model: String,
    pub aspect_ratio: String,
    pub image_size: String,
    pub boot_delay_ms: u64,
    pub trigger_phrase: String,
    pub selection_mode: SelectionMode,
    pub theme: ThemeVariant,
    pub log_file: PathBuf,
    pub asset_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-3-pro-image-preview".to_string(),
            aspect_ratio: "1:1".to_string(),
            image_size: "1K".to_string(),
            boot_delay_ms: 800,
            trigger_phrase: "twisted".to_string(),
            selection_mode: SelectionMode::default(),
            theme: ThemeVariant::default(),
            log_file: PathBuf::from("twisted.log"),
            asset_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Defaults, then `config.toml`, then `TWISTED_*` environment variables.
    /// Writes a default `config.toml` when none exists yet.
    pub fn new() -> Result<Self, figment::Error> {
        if fs::metadata(CONFIG_PATH).is_err() {
            Settings::default().save().unwrap_or_default();
        }
        Self::extract(
            Self::figment()
                .merge(Toml::file(CONFIG_PATH))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
    }

    pub fn extract(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(CONFIG_PATH, toml_string)
    }

    pub fn is_valid(&self) -> Result<(), ValidationError> {
        if self.text_model.trim().is_empty() {
            return Err(ValidationError::TextModel);
        }
        if self.image_model.trim().is_empty() {
            return Err(ValidationError::ImageModel);
        }
        if !self.api_base.starts_with("http") {
            return Err(ValidationError::ApiBase);
        }
        if self.trigger_phrase.trim().is_empty() {
            return Err(ValidationError::TriggerPhrase);
        }
        if !is_ratio(&self.aspect_ratio) {
            return Err(ValidationError::AspectRatio);
        }
        if !IMAGE_SIZES.contains(&self.image_size.as_str()) {
            return Err(ValidationError::ImageSize);
        }
        Ok(())
    }

    pub fn boot_delay(&self) -> Duration {
        Duration::from_millis(self.boot_delay_ms)
    }

    /// The configured key, falling back to `GEMINI_API_KEY` then `API_KEY`.
    /// Resolved on every call so a key exported mid-session is picked up.
    pub fn resolve_api_key(&self) -> Option<String> {
        let configured = self.api_key.trim();
        if !configured.is_empty() {
            return Some(configured.to_string());
        }
        non_empty_env("GEMINI_API_KEY").or_else(|| non_empty_env("API_KEY"))
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn is_ratio(value: &str) -> bool {
    match value.split_once(':') {
        Some((w, h)) => {
            let positive = |s: &str| matches!(s.parse::<u32>(), Ok(n) if n > 0);
            positive(w) && positive(h)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.trigger_phrase, "twisted");
        assert_eq!(settings.boot_delay(), Duration::from_millis(800));
        assert_eq!(settings.selection_mode, SelectionMode::Multi);
        assert!(settings.is_valid().is_ok());
    }

    #[test]
    fn toml_overrides_defaults() {
        let figment = Settings::figment().merge(Toml::string(
            r#"
            text_model = "gemini-2.5-flash"
            selection_mode = "single"
            boot_delay_ms = 0
            "#,
        ));
        let settings = Settings::extract(figment).unwrap();
        assert_eq!(settings.text_model, "gemini-2.5-flash");
        assert_eq!(settings.selection_mode, SelectionMode::Single);
        assert_eq!(settings.boot_delay_ms, 0);
        assert_eq!(settings.image_model, "gemini-3-pro-image-preview");
    }

    #[test]
    fn validation_catches_bad_image_config() {
        let mut settings = Settings::default();
        settings.aspect_ratio = "square".to_string();
        assert_eq!(settings.is_valid(), Err(ValidationError::AspectRatio));

        settings.aspect_ratio = "16:9".to_string();
        settings.image_size = "8K".to_string();
        assert_eq!(settings.is_valid(), Err(ValidationError::ImageSize));
    }

    #[test]
    fn validation_requires_models_and_trigger() {
        let mut settings = Settings::default();
        settings.trigger_phrase = " ".to_string();
        assert_eq!(settings.is_valid(), Err(ValidationError::TriggerPhrase));

        let mut settings = Settings::default();
        settings.text_model.clear();
        assert_eq!(settings.is_valid(), Err(ValidationError::TextModel));
    }

    #[test]
    fn configured_key_wins_over_environment() {
        let settings = Settings {
            api_key: "  from-config ".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.resolve_api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn empty_key_is_not_serialized() {
        let rendered = toml::to_string_pretty(&Settings::default()).unwrap();
        assert!(!rendered.contains("api_key"));
        assert!(rendered.contains("trigger_phrase = \"twisted\""));
    }
}
