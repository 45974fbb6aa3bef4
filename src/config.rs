//! Runner configuration: environment first, then command line flags.
//!
//! | Variable              | Flag          | Default             |
//! |-----------------------|---------------|---------------------|
//! | `WORDSEARCH_DATA_DIR` | `--data-dir`  | `word-search-data`  |
//! | `WORDSEARCH_TICK_MS`  | `--tick-ms`   | `TICK_MS` (100)     |
//! | `WORDSEARCH_SEED`     | `--seed`      | derived from time   |

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::types::TICK_MS;

pub const DEFAULT_DATA_DIR: &str = "word-search-data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub tick_ms: u64,
    /// Fixed seed for reproducible boards
    pub seed: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            tick_ms: TICK_MS,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any variable source. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("WORDSEARCH_DATA_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let tick_ms = lookup("WORDSEARCH_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(defaults.tick_ms);

        let seed = lookup("WORDSEARCH_SEED").and_then(|s| s.trim().parse().ok());

        Self {
            data_dir,
            tick_ms,
            seed,
        }
    }

    /// Apply command line flags on top of `self`
    pub fn with_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--data-dir" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --data-dir"))?;
                    self.data_dir = PathBuf::from(v);
                }
                "--seed" => {
                    i += 1;
                    let v = args.get(i).ok_or_else(|| anyhow!("missing value for --seed"))?;
                    self.seed = Some(
                        v.parse::<u32>()
                            .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                    );
                }
                "--tick-ms" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --tick-ms"))?;
                    self.tick_ms = v
                        .parse::<u64>()
                        .ok()
                        .filter(|&ms| ms > 0)
                        .ok_or_else(|| anyhow!("invalid --tick-ms value: {}", v))?;
                }
                other => {
                    return Err(anyhow!("unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn from_lookup_uses_defaults() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn from_lookup_reads_values() {
        let env: HashMap<&str, &str> = [
            ("WORDSEARCH_DATA_DIR", "/tmp/ws"),
            ("WORDSEARCH_TICK_MS", "250"),
            ("WORDSEARCH_SEED", "42"),
        ]
        .into_iter()
        .collect();
        let cfg = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/ws"));
        assert_eq!(cfg.tick_ms, 250);
        assert_eq!(cfg.seed, Some(42));
    }

    #[test]
    fn from_lookup_ignores_bad_values() {
        let cfg = AppConfig::from_lookup(|k| match k {
            "WORDSEARCH_TICK_MS" => Some("0".to_string()),
            "WORDSEARCH_SEED" => Some("lots".to_string()),
            "WORDSEARCH_DATA_DIR" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn args_override_env() {
        let base = AppConfig::from_lookup(|k| (k == "WORDSEARCH_SEED").then(|| "1".to_string()));
        let cfg = base
            .with_args(&args(&["--seed", "9", "--data-dir", "saves", "--tick-ms", "50"]))
            .unwrap();
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.data_dir, PathBuf::from("saves"));
        assert_eq!(cfg.tick_ms, 50);
    }

    #[test]
    fn args_reject_unknown_and_missing() {
        assert!(AppConfig::default().with_args(&args(&["--verbose"])).is_err());
        assert!(AppConfig::default().with_args(&args(&["--seed"])).is_err());
        assert!(AppConfig::default().with_args(&args(&["--seed", "x"])).is_err());
        assert!(AppConfig::default().with_args(&args(&["--tick-ms", "0"])).is_err());
    }
}
