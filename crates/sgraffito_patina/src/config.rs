//! Lint configuration.
//!
//! The configuration is JSON in the shape shared with eslint-plugin-vue:
//!
//! ```json
//! {
//!   "preset": "recommended",
//!   "rules": {
//!     "vue/attribute-hyphenation": ["error", "never", { "ignore": ["custom-prop"] }],
//!     "vue/this-in-template": "off"
//!   }
//! }
//! ```
//!
//! A rule setting is a level (`"off"`, `"warn"`, `"error"`, or `0`, `1`, `2`)
//! or an array of a level followed by the rule's options.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleRegistry};
use crate::rules::vue;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown rule '{0}'")]
    UnknownRule(String),

    #[error("invalid options for '{rule}': {source}")]
    InvalidOptions {
        rule: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown severity {value} for '{rule}'")]
    UnknownSeverity { rule: String, value: String },
}

/// Built-in rule sets a configuration starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    Essential,
    StronglyRecommended,
    #[default]
    Recommended,
    All,
}

impl Preset {
    pub fn registry(self) -> RuleRegistry {
        match self {
            Self::Essential => RuleRegistry::with_essential(),
            Self::StronglyRecommended => RuleRegistry::with_strongly_recommended(),
            Self::Recommended => RuleRegistry::with_recommended(),
            Self::All => RuleRegistry::with_all(),
        }
    }
}

/// Level part of a rule setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleLevel {
    Off,
    Warn,
    Error,
}

impl RuleLevel {
    fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => match s.as_str() {
                "off" => Some(Self::Off),
                "warn" => Some(Self::Warn),
                "error" => Some(Self::Error),
                _ => None,
            },
            Value::Number(n) => match n.as_u64()? {
                0 => Some(Self::Off),
                1 => Some(Self::Warn),
                2 => Some(Self::Error),
                _ => None,
            },
            _ => None,
        }
    }

    fn severity(self) -> Option<Severity> {
        match self {
            Self::Off => None,
            Self::Warn => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
        }
    }
}

/// Top-level lint configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub preset: Preset,

    /// Rule settings by rule name
    #[serde(default)]
    pub rules: BTreeMap<String, Value>,
}

impl LintConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Build the rule registry: the preset, then every rule setting applied
    /// in name order.
    pub fn into_registry(self) -> Result<RuleRegistry, ConfigError> {
        let mut registry = self.preset.registry();

        for (name, setting) in &self.rules {
            let (level, options) = match setting {
                Value::Array(items) => match items.split_first() {
                    Some((level, options)) => (level, options),
                    None => {
                        tracing::warn!(
                            target: "sgraffito_patina::config",
                            rule = %name,
                            "empty rule setting ignored"
                        );
                        continue;
                    }
                },
                level => (level, &[][..]),
            };
            let level = RuleLevel::parse(level).ok_or_else(|| ConfigError::UnknownSeverity {
                rule: name.clone(),
                value: level.to_string(),
            })?;

            let Some(severity) = level.severity() else {
                if !registry.remove(name) && !name.starts_with("vue/") {
                    tracing::warn!(
                        target: "sgraffito_patina::config",
                        rule = %name,
                        "setting for a rule outside this linter ignored"
                    );
                }
                continue;
            };

            match build_rule(name, options) {
                Ok(Some(rule)) => {
                    registry.remove(name);
                    registry.register_with_severity(rule, severity);
                }
                Ok(None) if !name.starts_with("vue/") => {
                    tracing::warn!(
                        target: "sgraffito_patina::config",
                        rule = %name,
                        "setting for a rule outside this linter ignored"
                    );
                }
                Ok(None) => return Err(ConfigError::UnknownRule(name.clone())),
                Err(source) => {
                    return Err(ConfigError::InvalidOptions {
                        rule: name.clone(),
                        source,
                    })
                }
            }
        }

        Ok(registry)
    }
}

/// Options of rules configured with a single object.
fn object_options<T: DeserializeOwned + Default>(options: &[Value]) -> Result<T, serde_json::Error> {
    match options.first() {
        Some(value) => T::deserialize(value),
        None => Ok(T::default()),
    }
}

/// Instantiate a built-in rule by name. `Ok(None)` for unknown names.
fn build_rule(name: &str, options: &[Value]) -> Result<Option<Box<dyn Rule>>, serde_json::Error> {
    let rule: Box<dyn Rule> = match name {
        "vue/script-setup-uses-vars" => Box::new(vue::ScriptSetupUsesVars),
        "vue/no-deprecated-dollar-scopedslots-api" => Box::new(vue::NoDeprecatedDollarScopedslotsApi),
        "vue/no-deprecated-filter" => Box::new(vue::NoDeprecatedFilter),
        "vue/no-dupe-v-else-if" => Box::new(vue::NoDupeVElseIf),
        "vue/no-duplicate-attributes" => {
            Box::new(object_options::<vue::NoDuplicateAttributes>(options)?)
        }
        "vue/no-multiple-template-root" => Box::new(vue::NoMultipleTemplateRoot),
        "vue/no-template-key" => Box::new(vue::NoTemplateKey),
        "vue/no-textarea-mustache" => Box::new(vue::NoTextareaMustache),
        "vue/no-use-v-if-with-v-for" => Box::new(object_options::<vue::NoUseVIfWithVFor>(options)?),
        "vue/require-component-is" => Box::new(vue::RequireComponentIs),
        "vue/require-v-for-key" => Box::new(vue::RequireVForKey),
        "vue/use-v-on-exact" => Box::new(vue::UseVOnExact),
        "vue/valid-template-root" => Box::new(vue::ValidTemplateRoot),
        "vue/valid-v-else" => Box::new(vue::ValidVElse),
        "vue/valid-v-else-if" => Box::new(vue::ValidVElseIf),
        "vue/valid-v-for" => Box::new(vue::ValidVFor),
        "vue/valid-v-if" => Box::new(vue::ValidVIf),
        "vue/valid-v-on" => Box::new(object_options::<vue::ValidVOn>(options)?),
        "vue/attribute-hyphenation" => Box::new(vue::AttributeHyphenation::from_options(options)?),
        "vue/component-name-in-template-casing" => {
            Box::new(vue::ComponentNameInTemplateCasing::from_options(options)?)
        }
        "vue/this-in-template" => Box::new(vue::ThisInTemplate::from_options(options)?),
        _ => return Ok(None),
    };
    Ok(Some(rule))
}
