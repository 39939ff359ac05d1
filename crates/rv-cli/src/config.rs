//! Game configuration from the environment.

use std::path::PathBuf;

/// Where the world lives and where logs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// World JSON file. `None` plays the bundled world in memory.
    pub world: Option<PathBuf>,
    /// `tracing` filter directive.
    pub log_filter: String,
    /// Log file. `None` logs to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: None,
            log_filter: "warn".to_string(),
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Read `RAGVENTURE_WORLD`, `RAGVENTURE_LOG` and `RAGVENTURE_LOG_FILE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();
        Self {
            world: get("RAGVENTURE_WORLD").map(PathBuf::from),
            log_filter: get("RAGVENTURE_LOG").unwrap_or(defaults.log_filter),
            log_file: get("RAGVENTURE_LOG_FILE").map(PathBuf::from),
        }
    }

    /// Override the world file if one was given on the command line.
    pub fn with_world(mut self, world: Option<PathBuf>) -> Self {
        if world.is_some() {
            self.world = world;
        }
        self
    }

    /// Override the log file if one was given on the command line.
    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        if log_file.is_some() {
            self.log_file = log_file;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(GameConfig::from_lookup(lookup(&[])), GameConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let cfg = GameConfig::from_lookup(lookup(&[
            ("RAGVENTURE_WORLD", "worlds/town.json"),
            ("RAGVENTURE_LOG", "rv_interpret=debug"),
            ("RAGVENTURE_LOG_FILE", "rv.log"),
        ]));
        assert_eq!(cfg.world, Some(PathBuf::from("worlds/town.json")));
        assert_eq!(cfg.log_filter, "rv_interpret=debug");
        assert_eq!(cfg.log_file, Some(PathBuf::from("rv.log")));
    }

    #[test]
    fn blank_values_are_unset() {
        let cfg = GameConfig::from_lookup(lookup(&[("RAGVENTURE_WORLD", "  "), ("RAGVENTURE_LOG", "")]));
        assert_eq!(cfg.world, None);
        assert_eq!(cfg.log_filter, "warn");
    }

    #[test]
    fn flags_override_environment() {
        let cfg = GameConfig::from_lookup(lookup(&[("RAGVENTURE_WORLD", "env.json")]))
            .with_world(Some("flag.json".into()))
            .with_log_file(None);
        assert_eq!(cfg.world, Some(PathBuf::from("flag.json")));
        assert_eq!(cfg.log_file, None);
    }
}
