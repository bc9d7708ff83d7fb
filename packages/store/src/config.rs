//! # Client configuration (`polls.toml`)
//!
//! Settings the poll board reads at startup. The web app embeds the file at
//! build time; a missing or empty file is equivalent to the defaults.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = ""        # empty = same origin as the page
//! user_id = 3          # stands in for a logged-in user
//!
//! [ui]
//! fade_ms = 300        # removal animation before a deleted block disappears
//! notice_ms = 3000     # how long a notice stays on screen
//! min_options = 2
//! max_options = 4
//! guard_submissions = true
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with TOML (de)serialisation and builder helpers. |
//! | [`ApiConfig`] | Where the backend lives and which user id to send. |
//! | [`UiConfig`] | Timings and form limits. |

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `polls.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend. Empty means the page origin.
    #[serde(default)]
    pub base_url: String,
    /// User id sent with new polls until sessions exist.
    #[serde(default = "default_user_id")]
    pub user_id: u32,
}

fn default_user_id() -> u32 {
    3
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            user_id: default_user_id(),
        }
    }
}

/// UI timings and form limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
    #[serde(default = "default_notice_ms")]
    pub notice_ms: u64,
    #[serde(default = "default_min_options")]
    pub min_options: usize,
    #[serde(default = "default_max_options")]
    pub max_options: usize,
    /// Refuse a second submit while a create request is in flight.
    #[serde(default = "default_guard_submissions")]
    pub guard_submissions: bool,
}

fn default_fade_ms() -> u64 {
    300
}

fn default_notice_ms() -> u64 {
    3000
}

fn default_min_options() -> usize {
    2
}

fn default_max_options() -> usize {
    4
}

fn default_guard_submissions() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            fade_ms: default_fade_ms(),
            notice_ms: default_notice_ms(),
            min_options: default_min_options(),
            max_options: default_max_options(),
            guard_submissions: default_guard_submissions(),
        }
    }
}

impl UiConfig {
    pub fn fade_delay(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }
}

impl ClientConfig {
    /// Builder method to point the client at a backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Builder method to toggle the double-submit guard.
    pub fn with_submission_guard(mut self, enabled: bool) -> Self {
        self.ui.guard_submissions = enabled;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "polls.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(s)?;
        if config.ui.max_options < config.ui.min_options {
            tracing::warn!(
                min = config.ui.min_options,
                max = config.ui.max_options,
                "max_options is below min_options, polls cannot be created"
            );
        }
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api.user_id, 3);
        assert_eq!(config.ui.fade_delay(), Duration::from_millis(300));
        assert_eq!(config.ui.notice_duration(), Duration::from_secs(3));
        assert!(config.ui.guard_submissions);
    }

    #[test]
    fn test_partial_sections() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "http://localhost:9000"

            [ui]
            max_options = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.user_id, 3);
        assert_eq!(config.ui.max_options, 6);
        assert_eq!(config.ui.min_options, 2);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ClientConfig::default()
            .with_base_url("https://polls.example.com")
            .with_submission_guard(false);
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(ClientConfig::from_toml("[ui]\nfade_ms = \"slow\"").is_err());
    }
}
