//! Configuration options container and typed views over it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Section holding the default credentials and tool settings.
pub const DEFAULTS_SECTION: &str = "hpilo";
/// Sections that are never treated as host profiles.
pub const RESERVED_SECTIONS: &[&str] = &[DEFAULTS_SECTION, "logging"];

pub const DEFAULT_CLI_PATH: &str = "hpilo_cli";

/// Raw configuration options as loaded from `config.json`.
///
/// Read-only once built. Profiles are top-level objects keyed by name,
/// everything else is addressed with dotted keys such as `hpilo.login`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigOptions(Map<String, Value>);

impl ConfigOptions {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Look up an option. A literal top-level key wins over a dotted path,
    /// so profile names containing dots still resolve.
    pub fn option(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.0.get(key) {
            return Some(value);
        }

        let mut parts = key.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.option(key).and_then(Value::as_str)
    }

    /// Names of all configured host profiles.
    pub fn profile_names(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(key, value)| {
                value.is_object() && !RESERVED_SECTIONS.contains(&key.as_str())
            })
            .map(|(key, _)| key.as_str())
            .collect()
    }

    pub fn tool_settings(&self) -> ToolSettings {
        self.option(DEFAULTS_SECTION)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    pub fn logging(&self) -> LoggingSettings {
        self.option("logging")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Copy of the options with every `password` value replaced, for display.
    pub fn masked(&self) -> Value {
        fn mask(value: &mut Value) {
            if let Some(obj) = value.as_object_mut() {
                for (key, v) in obj.iter_mut() {
                    if key == "password" && v.is_string() {
                        *v = Value::String("********".to_string());
                    } else {
                        mask(v);
                    }
                }
            }
        }

        let mut value = Value::Object(self.0.clone());
        mask(&mut value);
        value
    }
}

/// How `hpilo_cli` is invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    #[serde(default = "default_cli_path")]
    pub cli_path: String,
    /// Seconds, passed to the tool as `-t`
    #[serde(default)]
    pub timeout: Option<u64>,
}

pub fn default_cli_path() -> String { DEFAULT_CLI_PATH.to_string() }

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            cli_path: default_cli_path(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

pub fn default_log_level() -> String { "INFO".to_string() }

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { log_level: default_log_level() }
    }
}
