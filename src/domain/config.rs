use std::path::Path;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Configuration for a portal session.
///
/// Controls the timing of deferred UI effects and the defaults applied to
/// request forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// How long a notification stays on screen, in milliseconds.
    snackbar_duration_ms: u64,

    /// Delay before the chat assistant replies, in milliseconds.
    chat_reply_delay_ms: u64,

    /// Category recorded when a request form leaves it unset.
    default_category: String,

    /// Purpose recorded when a request form leaves it unset.
    default_purpose: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snackbar_duration_ms: default_snackbar_duration_ms(),
            chat_reply_delay_ms: default_chat_reply_delay_ms(),
            default_category: default_category(),
            default_purpose: default_purpose(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// How long a notification stays visible.
    #[must_use]
    pub fn snackbar_duration(&self) -> TimeDelta {
        millis(self.snackbar_duration_ms)
    }

    /// Delay before the chat assistant replies.
    #[must_use]
    pub fn chat_reply_delay(&self) -> TimeDelta {
        millis(self.chat_reply_delay_ms)
    }

    /// Category applied when a form leaves it unset.
    #[must_use]
    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Purpose applied when a form leaves it unset.
    #[must_use]
    pub fn default_purpose(&self) -> &str {
        &self.default_purpose
    }

    /// Sets the notification duration.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` exceeds [`MAX_DURATION_MS`].
    pub fn set_snackbar_duration_ms(&mut self, value: u64) -> Result<(), DurationError> {
        self.snackbar_duration_ms = check_duration("snackbar_duration_ms", value)?;
        Ok(())
    }

    /// Sets the chat reply delay.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` exceeds [`MAX_DURATION_MS`].
    pub fn set_chat_reply_delay_ms(&mut self, value: u64) -> Result<(), DurationError> {
        self.chat_reply_delay_ms = check_duration("chat_reply_delay_ms", value)?;
        Ok(())
    }
}

/// The longest configurable delay, one day in milliseconds.
pub const MAX_DURATION_MS: u64 = 24 * 60 * 60 * 1000;

/// A configured duration is longer than [`MAX_DURATION_MS`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} must be at most {MAX_DURATION_MS} ms, got {value}")]
pub struct DurationError {
    field: &'static str,
    value: u64,
}

const fn check_duration(field: &'static str, value: u64) -> Result<u64, DurationError> {
    if value > MAX_DURATION_MS {
        return Err(DurationError { field, value });
    }
    Ok(value)
}

fn millis(value: u64) -> TimeDelta {
    // Bounded by `MAX_DURATION_MS`, so the conversion cannot fail.
    i64::try_from(value.min(MAX_DURATION_MS))
        .ok()
        .and_then(TimeDelta::try_milliseconds)
        .unwrap_or(TimeDelta::zero())
}

const fn default_snackbar_duration_ms() -> u64 {
    3000
}

const fn default_chat_reply_delay_ms() -> u64 {
    500
}

fn default_category() -> String {
    "General".to_string()
}

fn default_purpose() -> String {
    "Lainnya".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_snackbar_duration_ms")]
        snackbar_duration_ms: u64,

        #[serde(default = "default_chat_reply_delay_ms")]
        chat_reply_delay_ms: u64,

        #[serde(default = "default_category")]
        default_category: String,

        #[serde(default = "default_purpose")]
        default_purpose: String,
    },
}

impl TryFrom<Versions> for Config {
    type Error = DurationError;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 {
                snackbar_duration_ms,
                chat_reply_delay_ms,
                default_category,
                default_purpose,
            } => Ok(Self {
                snackbar_duration_ms: check_duration("snackbar_duration_ms", snackbar_duration_ms)?,
                chat_reply_delay_ms: check_duration("chat_reply_delay_ms", chat_reply_delay_ms)?,
                default_category,
                default_purpose,
            }),
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            snackbar_duration_ms: config.snackbar_duration_ms,
            chat_reply_delay_ms: config.chat_reply_delay_ms,
            default_category: config.default_category,
            default_purpose: config.default_purpose,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nsnackbar_duration_ms = 1500\nchat_reply_delay_ms = 0\ndefault_category = \"Umum\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.snackbar_duration(), TimeDelta::milliseconds(1500));
        assert_eq!(config.chat_reply_delay(), TimeDelta::zero());
        assert_eq!(config.default_category(), "Umum");
        assert_eq!(config.default_purpose(), "Lainnya");
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nchat_reply_delay_ms = \"soon\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("portal.toml");

        let mut config = Config::default();
        config.set_chat_reply_delay_ms(250).unwrap();
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn load_rejects_durations_longer_than_a_day() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nsnackbar_duration_ms = 9000000000000000\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
        assert!(error.contains("snackbar_duration_ms must be at most 86400000 ms"));
    }

    #[test]
    fn longest_allowed_duration_loads() {
        let config: Config =
            toml::from_str("_version = \"1\"\nchat_reply_delay_ms = 86400000").unwrap();
        assert_eq!(config.chat_reply_delay(), TimeDelta::days(1));
    }

    #[test]
    fn setters_reject_out_of_range_durations() {
        let mut config = Config::default();
        assert!(config.set_snackbar_duration_ms(u64::MAX).is_err());
        assert!(config.set_chat_reply_delay_ms(MAX_DURATION_MS + 1).is_err());
        assert_eq!(config, Config::default());
    }
}
