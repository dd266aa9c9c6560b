//! Cache settings with precedence and validation
//!
//! Precedence, lowest first: built-in defaults, the JSON settings file named by
//! `MEMO_CACHE_CONFIG`, then the individual `MEMO_CACHE_*` variables.

use crate::backing::BackingKind;
use crate::hooks::KeyPolicy;
use memo_core::constants::{
    DEFAULT_CACHE_NAME, MEMO_CACHE_BACKING_VAR, MEMO_CACHE_CONFIG_VAR,
    MEMO_CACHE_INITIAL_CAPACITY_VAR, MEMO_CACHE_KEY_POLICY_VAR, MEMO_CACHE_NAME_VAR,
    MEMO_CACHE_STATISTICS_VAR, SETTINGS_SECTION,
};
use memo_core::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Settings for a string-keyed cache built with `from_settings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Name reported in tracing output
    pub name: String,
    /// Entries to reserve room for up front (ignored by ordered maps)
    pub initial_capacity: usize,
    /// Which map stores the entries
    pub backing: BackingKind,
    /// How keys are canonicalized
    pub key_policy: KeyPolicy,
    /// Whether statistics counters are recorded
    pub statistics: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_CACHE_NAME.to_string(),
            initial_capacity: 0,
            backing: BackingKind::default(),
            key_policy: KeyPolicy::default(),
            statistics: true,
        }
    }
}

impl CacheSettings {
    pub fn builder() -> CacheSettingsBuilder {
        CacheSettingsBuilder::new()
    }

    /// Reject settings no cache can be built from
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::configuration("cache name must not be empty"));
        }
        Ok(())
    }
}

/// Where the effective settings came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Built-in defaults only
    Default,
    /// Settings file
    ConfigFile(PathBuf),
    /// Environment variables, listed by name
    EnvironmentVariable(String),
}

/// Effective settings plus the highest-precedence source that contributed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfiguration {
    pub settings: CacheSettings,
    pub source: ConfigSource,
}

impl Default for CacheConfiguration {
    fn default() -> Self {
        Self {
            settings: CacheSettings::default(),
            source: ConfigSource::Default,
        }
    }
}

/// Builder for cache settings
#[derive(Debug, Clone, Default)]
pub struct CacheSettingsBuilder {
    settings: CacheSettings,
}

impl CacheSettingsBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.settings.name = name.into();
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.settings.initial_capacity = capacity;
        self
    }

    pub fn with_backing(mut self, backing: BackingKind) -> Self {
        self.settings.backing = backing;
        self
    }

    pub fn with_key_policy(mut self, policy: KeyPolicy) -> Self {
        self.settings.key_policy = policy;
        self
    }

    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.settings.statistics = enabled;
        self
    }

    pub fn build(self) -> CacheSettings {
        self.settings
    }
}

/// The `cache` section of a settings file; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsOverrides {
    name: Option<String>,
    initial_capacity: Option<usize>,
    backing: Option<BackingKind>,
    key_policy: Option<KeyPolicy>,
    statistics: Option<bool>,
}

impl SettingsOverrides {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.initial_capacity.is_none()
            && self.backing.is_none()
            && self.key_policy.is_none()
            && self.statistics.is_none()
    }

    fn apply(self, settings: &mut CacheSettings) {
        if let Some(name) = self.name {
            settings.name = name;
        }
        if let Some(capacity) = self.initial_capacity {
            settings.initial_capacity = capacity;
        }
        if let Some(backing) = self.backing {
            settings.backing = backing;
        }
        if let Some(policy) = self.key_policy {
            settings.key_policy = policy;
        }
        if let Some(statistics) = self.statistics {
            settings.statistics = statistics;
        }
    }
}

/// Settings loader that handles precedence
pub struct CacheSettingsLoader;

impl CacheSettingsLoader {
    /// Load settings from defaults, the settings file and the environment
    ///
    /// A settings file that does not exist is skipped; one that exists but
    /// cannot be read or parsed is an error.
    pub fn load() -> Result<CacheConfiguration> {
        let mut config = CacheConfiguration::default();

        if let Some(path) = Self::config_file_path()? {
            if path.exists() {
                config = Self::load_from_path(&path)?;
            } else {
                debug!(path = %path.display(), "settings file not found, using defaults");
            }
        }

        Self::apply_env(config)
    }

    /// Load defaults overlaid with the `cache` section of the JSON file at `path`
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<CacheConfiguration> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system(path, "read settings file", e))?;

        let document: serde_json::Value = serde_json::from_str(&content)?;
        let overrides = match document.get(SETTINGS_SECTION) {
            Some(section) => SettingsOverrides::deserialize(section).with_context(|| {
                format!("invalid '{SETTINGS_SECTION}' section in {}", path.display())
            })?,
            None => {
                debug!(path = %path.display(), "settings file has no cache section");
                SettingsOverrides::default()
            }
        };

        let mut settings = CacheSettings::default();
        overrides.apply(&mut settings);
        settings.validate()?;

        debug!(path = %path.display(), ?settings, "loaded cache settings file");
        Ok(CacheConfiguration {
            settings,
            source: ConfigSource::ConfigFile(path.to_path_buf()),
        })
    }

    /// Overlay the `MEMO_CACHE_*` environment variables on `config`
    ///
    /// Empty variables are ignored with a warning. Values that do not parse
    /// are errors.
    pub fn apply_env(mut config: CacheConfiguration) -> Result<CacheConfiguration> {
        let defaults = CacheSettings::default();
        let mut overrides = SettingsOverrides::default();
        let mut applied = Vec::new();

        if let Some(name) = Self::env_value(MEMO_CACHE_NAME_VAR)? {
            overrides.name = Some(name);
            applied.push(MEMO_CACHE_NAME_VAR);
        }

        if let Some(raw) = Self::env_value(MEMO_CACHE_INITIAL_CAPACITY_VAR)? {
            let capacity = raw.trim().parse::<usize>().map_err(|_| {
                Error::environment(
                    MEMO_CACHE_INITIAL_CAPACITY_VAR,
                    format!("expected a non-negative integer, got '{raw}'"),
                    defaults.initial_capacity.to_string(),
                )
            })?;
            overrides.initial_capacity = Some(capacity);
            applied.push(MEMO_CACHE_INITIAL_CAPACITY_VAR);
        }

        if let Some(raw) = Self::env_value(MEMO_CACHE_BACKING_VAR)? {
            let backing = raw.parse::<BackingKind>().map_err(|message| {
                Error::environment(MEMO_CACHE_BACKING_VAR, message, defaults.backing.as_str())
            })?;
            overrides.backing = Some(backing);
            applied.push(MEMO_CACHE_BACKING_VAR);
        }

        if let Some(raw) = Self::env_value(MEMO_CACHE_KEY_POLICY_VAR)? {
            let policy = raw.parse::<KeyPolicy>().map_err(|message| {
                Error::environment(
                    MEMO_CACHE_KEY_POLICY_VAR,
                    message,
                    defaults.key_policy.as_str(),
                )
            })?;
            overrides.key_policy = Some(policy);
            applied.push(MEMO_CACHE_KEY_POLICY_VAR);
        }

        if let Some(raw) = Self::env_value(MEMO_CACHE_STATISTICS_VAR)? {
            let enabled = parse_flag(&raw).ok_or_else(|| {
                Error::environment(
                    MEMO_CACHE_STATISTICS_VAR,
                    format!("expected true or false, got '{raw}'"),
                    defaults.statistics.to_string(),
                )
            })?;
            overrides.statistics = Some(enabled);
            applied.push(MEMO_CACHE_STATISTICS_VAR);
        }

        if overrides.is_empty() {
            return Ok(config);
        }

        overrides.apply(&mut config.settings);
        config.settings.validate()?;
        config.source = ConfigSource::EnvironmentVariable(applied.join(","));

        debug!(variables = ?applied, "applied cache settings from environment");
        Ok(config)
    }

    /// Settings file path from `MEMO_CACHE_CONFIG`, if set
    fn config_file_path() -> Result<Option<PathBuf>> {
        Ok(Self::env_value(MEMO_CACHE_CONFIG_VAR)?.map(PathBuf::from))
    }

    fn env_value(variable: &str) -> Result<Option<String>> {
        match env::var(variable) {
            Ok(value) if value.trim().is_empty() => {
                warn!(variable, "ignoring empty environment override");
                Ok(None)
            }
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(Error::environment(
                variable,
                "value is not valid unicode",
                "unset",
            )),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
