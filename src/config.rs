//! Startup settings read from the command line and the process environment.
//!
//! `courtside [DATA_FILE]`; without an argument `COURTSIDE_DATA` is used, and
//! without either the dashboard starts empty and the file is opened from the UI.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const DATA_ENV: &str = "COURTSIDE_DATA";
pub const MAX_PICK_ENV: &str = "COURTSIDE_MAX_PICK";
pub const COUNTRY_ENV: &str = "COURTSIDE_USA_LABEL";

/// Snapshot of the settings the dashboard starts with.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub data_path: Option<PathBuf>,
    /// Upper bound of the draft-pick sliders.
    pub max_draft_pick: i64,
    /// Country counted by the birthplace charts.
    pub home_country: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            max_draft_pick: 60,
            home_country: "USA".to_string(),
        }
    }
}

impl Config {
    /// Read the real command line and environment.
    pub fn load() -> Result<Self> {
        Self::from_sources(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Build a config from explicit arguments (program name excluded) and an
    /// environment lookup.
    pub fn from_sources<I, E>(args: I, env: E) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        let mut args = args.into_iter();

        cfg.data_path = args
            .next()
            .or_else(|| env(DATA_ENV))
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        if let Some(extra) = args.next() {
            bail!("unexpected argument `{extra}` (usage: courtside [DATA_FILE])");
        }

        if let Some(raw) = env(MAX_PICK_ENV) {
            let max: i64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{MAX_PICK_ENV}={raw:?} is not an integer"))?;
            if max < 1 {
                bail!("{MAX_PICK_ENV} must be at least 1, got {max}");
            }
            cfg.max_draft_pick = max;
        }

        if let Some(country) = env(COUNTRY_ENV).filter(|c| !c.trim().is_empty()) {
            cfg.home_country = country.trim().to_string();
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_sources(args(&[]), env_of(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.max_draft_pick, 60);
        assert_eq!(cfg.home_country, "USA");
    }

    #[test]
    fn test_argument_beats_environment() {
        let env = env_of(&[(DATA_ENV, "/env/all_seasons.csv")]);
        let cfg = Config::from_sources(args(&["cli.csv"]), &env).unwrap();
        assert_eq!(cfg.data_path, Some(PathBuf::from("cli.csv")));

        let cfg = Config::from_sources(args(&[]), &env).unwrap();
        assert_eq!(cfg.data_path, Some(PathBuf::from("/env/all_seasons.csv")));
    }

    #[test]
    fn test_extra_argument_rejected() {
        assert!(Config::from_sources(args(&["a.csv", "b.csv"]), env_of(&[])).is_err());
    }

    #[test]
    fn test_max_pick_validation() {
        let cfg = Config::from_sources(args(&[]), env_of(&[(MAX_PICK_ENV, " 30 ")])).unwrap();
        assert_eq!(cfg.max_draft_pick, 30);
        assert!(Config::from_sources(args(&[]), env_of(&[(MAX_PICK_ENV, "0")])).is_err());
        assert!(Config::from_sources(args(&[]), env_of(&[(MAX_PICK_ENV, "lots")])).is_err());
    }

    #[test]
    fn test_home_country_override() {
        let cfg = Config::from_sources(args(&[]), env_of(&[(COUNTRY_ENV, "Canada")])).unwrap();
        assert_eq!(cfg.home_country, "Canada");
        let cfg = Config::from_sources(args(&[]), env_of(&[(COUNTRY_ENV, "  ")])).unwrap();
        assert_eq!(cfg.home_country, "USA");
    }
}
