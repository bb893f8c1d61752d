use std::path::PathBuf;
use std::time::Duration;

use getset::{CopyGetters, Getters, Setters};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_PROFILE_DIR: Lazy<PathBuf> = Lazy::new(|| {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("cfdriver")
        .join("profile")
});

/// Judge-wait policy: one check per `interval`, at most `max_attempts`
/// checks before the submission flow gives up.
#[derive(Serialize, Deserialize, CopyGetters, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
#[get_copy = "pub"]
pub struct PollPolicy {
    #[serde(with = "humantime_serde")]
    interval: Duration,
    max_attempts: usize,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_attempts: usize) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 60,
        }
    }
}

/// Engine configuration.
///
/// Every field has a default, so hosts can start from `Config::default()`
/// and override per user settings, or deserialize the whole struct from
/// their settings storage.
#[derive(
    Serialize, Deserialize, Getters, CopyGetters, Setters, Debug, Clone, PartialEq, Eq, Hash,
)]
#[serde(default)]
pub struct Config {
    /// Browser profile directory. Cookies persisted here carry the login
    /// session across restarts.
    #[get = "pub"]
    #[set = "pub"]
    profile_dir: PathBuf,
    /// Explicit browser executable; autodetected when `None`.
    #[get = "pub"]
    #[set = "pub"]
    browser_exe: Option<PathBuf>,
    /// Upper bound for navigations and fragment waits.
    #[serde(with = "humantime_serde")]
    #[get_copy = "pub"]
    #[set = "pub"]
    navigation_timeout: Duration,
    #[get_copy = "pub"]
    #[set = "pub"]
    poll: PollPolicy,
    /// Submit-form language used when a submission names none and the host
    /// stored no default.
    #[get_copy = "pub"]
    #[set = "pub"]
    default_language: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile_dir: DEFAULT_PROFILE_DIR.clone(),
            browser_exe: None,
            navigation_timeout: Duration::from_secs(30),
            poll: PollPolicy::default(),
            default_language: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_poll_policy_is_one_second_sixty_times() {
        let poll = PollPolicy::default();
        assert_eq!(poll.interval(), Duration::from_secs(1));
        assert_eq!(poll.max_attempts(), 60);
    }

    #[test]
    fn default_profile_dir_is_namespaced() {
        let conf = Config::default();
        assert!(conf.profile_dir().ends_with("cfdriver/profile"));
    }

    #[test]
    fn deserializes_humantime_durations() {
        let conf: Config = serde_json::from_str(
            r#"{
                "navigation_timeout": "10s",
                "poll": { "interval": "250ms", "max_attempts": 8 }
            }"#,
        )
        .unwrap();
        assert_eq!(conf.navigation_timeout(), Duration::from_secs(10));
        assert_eq!(conf.poll().interval(), Duration::from_millis(250));
        assert_eq!(conf.poll().max_attempts(), 8);
        assert_eq!(conf.default_language(), None);
    }

    #[test]
    fn roundtrips_through_serde() {
        let mut conf = Config::default();
        conf.set_default_language(Some(54));
        let json = serde_json::to_string(&conf).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, conf);
    }
}
