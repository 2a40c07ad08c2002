//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Runtime settings of one engine instance.
///
/// Every field has a default, so a partial document deserializes:
///
/// ```
/// use hfsm::engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "debug_logging": true }"#).unwrap();
/// assert!(config.debug_logging);
/// assert_eq!(config.path_separator, "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Emit a `debug` record for every state change.
    #[serde(default)]
    pub debug_logging: bool,

    /// Separator used by `current_state_path()`.
    #[serde(default = "default_path_separator")]
    pub path_separator: String,

    /// Number of state changes kept in the history. Zero disables it.
    #[serde(default)]
    pub history_capacity: usize,
}

fn default_path_separator() -> String {
    "/".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debug_logging: false,
            path_separator: default_path_separator(),
            history_capacity: 0,
        }
    }
}

impl EngineConfig {
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }

    pub fn with_path_separator(mut self, separator: impl Into<String>) -> Self {
        self.path_separator = separator.into();
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}
