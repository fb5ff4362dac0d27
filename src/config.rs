//! Engine configuration.
//!
//! Defaults follow the behaviour users of the form plugin expect: values are
//! trimmed and written back trimmed, and invalid values are kept in place.
//! A configuration can come from JSON or from `FORM_VALIDATOR_*` environment
//! variables (a `.env` file is honoured).

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::services::validation_service::TriggerSettings;

/// Options applied by the field orchestrator around every validator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Validate the trimmed value instead of the raw one.
    #[serde(alias = "trimValues")]
    pub trim_values: bool,
    /// Write the trimmed value back into the field (needs `trim_values`).
    #[serde(alias = "replaceWithTrimmedValue", alias = "replaceWithTrimedValues")]
    pub replace_with_trimmed_value: bool,
    /// Leave an invalid value in the field instead of clearing it.
    #[serde(alias = "keepValueIfInvalid", alias = "keepValueIfWrong")]
    pub keep_value_if_invalid: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            trim_values: true,
            replace_with_trimmed_value: true,
            keep_value_if_invalid: true,
        }
    }
}

/// Attribute names the directive resolver reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectiveConfig {
    #[serde(alias = "validatorsAttribute")]
    pub validators_attribute: String,
    #[serde(alias = "againstPrefix")]
    pub against_prefix: String,
}

impl Default for DirectiveConfig {
    fn default() -> Self {
        Self {
            validators_attribute: "validators".to_string(),
            against_prefix: "against-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub options: ValidationOptions,
    pub directives: DirectiveConfig,
    pub triggers: TriggerSettings,
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Loads `.env` if present, then reads `FORM_VALIDATOR_*` variables over
    /// the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenv::dotenv() {
            log::debug!("No .env file loaded: {}", e);
        }
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds a configuration from any key/value source, using the same keys
    /// as [`EngineConfig::from_env`].
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let flag = |key: &str, target: &mut bool| -> Result<(), ConfigError> {
            if let Some(raw) = var(key) {
                *target = parse_flag(key, &raw)?;
            }
            Ok(())
        };

        flag("FORM_VALIDATOR_TRIM_VALUES", &mut config.options.trim_values)?;
        flag(
            "FORM_VALIDATOR_REPLACE_WITH_TRIMMED_VALUE",
            &mut config.options.replace_with_trimmed_value,
        )?;
        flag(
            "FORM_VALIDATOR_KEEP_VALUE_IF_INVALID",
            &mut config.options.keep_value_if_invalid,
        )?;
        flag(
            "FORM_VALIDATOR_VALIDATE_ON_BLUR",
            &mut config.triggers.validate_on_blur,
        )?;
        flag(
            "FORM_VALIDATOR_VALIDATE_ON_SUBMIT",
            &mut config.triggers.validate_on_submit,
        )?;
        flag(
            "FORM_VALIDATOR_VALIDATE_ON_KEY_UP",
            &mut config.triggers.validate_on_key_up,
        )?;
        flag(
            "FORM_VALIDATOR_VALIDATE_ON_KEY_DOWN",
            &mut config.triggers.validate_on_key_down,
        )?;
        flag(
            "FORM_VALIDATOR_VALIDATE_ON_FOCUS",
            &mut config.triggers.validate_on_focus,
        )?;

        if let Some(attribute) = var("FORM_VALIDATOR_VALIDATORS_ATTRIBUTE") {
            config.directives.validators_attribute = attribute;
        }
        if let Some(prefix) = var("FORM_VALIDATOR_AGAINST_PREFIX") {
            config.directives.against_prefix = prefix;
        }

        Ok(config)
    }
}
