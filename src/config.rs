use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LEADERBOARD_PATH: &str = "leaderboard.json";
pub const DEFAULT_JOKES_PATH: &str = "randomJokes.txt";
const DEFAULT_TYPEWRITER_MS: u64 = 25;

/// Settings shared by both programs. Everything comes from the environment
/// (optionally seeded by a `.env` file); there are no command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub leaderboard_path: PathBuf,
    pub jokes_path: PathBuf,
    pub sound_dir: PathBuf,
    pub sound_enabled: bool,
    pub typewriter_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            leaderboard_path: PathBuf::from(DEFAULT_LEADERBOARD_PATH),
            jokes_path: PathBuf::from(DEFAULT_JOKES_PATH),
            sound_dir: PathBuf::from("."),
            sound_enabled: true,
            typewriter_delay: Duration::from_millis(DEFAULT_TYPEWRITER_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        // A missing .env is the normal case
        if let Err(err) = dotenv::dotenv() {
            log::debug!("no .env loaded: {}", err);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let typewriter_delay = match lookup("TYPEWRITER_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    log::warn!("TYPEWRITER_MS={:?} is not a number, using default", raw);
                    defaults.typewriter_delay
                }
            },
            None => defaults.typewriter_delay,
        };

        Self {
            leaderboard_path: lookup("LEADERBOARD_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.leaderboard_path),
            jokes_path: lookup("JOKES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.jokes_path),
            sound_dir: lookup("SOUND_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.sound_dir),
            sound_enabled: lookup("SOUND")
                .map(|value| !is_off(&value))
                .unwrap_or(defaults.sound_enabled),
            typewriter_delay,
        }
    }
}

fn is_off(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "off" | "0" | "false" | "no"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("LEADERBOARD_PATH", "/tmp/scores.json"),
            ("JOKES_PATH", "jokes.txt"),
            ("SOUND", "Off"),
            ("TYPEWRITER_MS", "0"),
        ]));
        assert_eq!(config.leaderboard_path, PathBuf::from("/tmp/scores.json"));
        assert_eq!(config.jokes_path, PathBuf::from("jokes.txt"));
        assert!(!config.sound_enabled);
        assert_eq!(config.typewriter_delay, Duration::ZERO);
    }

    #[test]
    fn bad_typewriter_value_falls_back() {
        let config = Config::from_lookup(lookup_from(&[("TYPEWRITER_MS", "fast")]));
        assert_eq!(config.typewriter_delay, Duration::from_millis(25));
    }
}
