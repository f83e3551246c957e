//! Run configuration read from `PACKHUNT_*` environment variables.

use std::env;
use std::str::FromStr;

use crate::comm::CommMode;
use crate::episode::EpisodeSettings;
use crate::error::ConfigError;
use crate::sim::GridConfig;

/// Which batch comparison to run instead of plain episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepKind {
    KSync,
    Modes,
}

impl FromStr for SweepKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "k" | "k_sync" => Ok(SweepKind::KSync),
            "modes" => Ok(SweepKind::Modes),
            _ => Err(ConfigError::InvalidValue {
                key: "PACKHUNT_SWEEP".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub grid: GridConfig,
    pub episode: EpisodeSettings,
    pub episodes: usize,
    pub seed: u64,
    pub sweep: Option<SweepKind>,
    pub sweep_k: Vec<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        let grid = GridConfig::default();
        Self {
            episode: EpisodeSettings {
                time_horizon: grid.max_steps as u64,
                ..EpisodeSettings::default()
            },
            grid,
            episodes: 1,
            seed: 42,
            sweep: None,
            sweep_k: vec![1, 2, 5, 10, 20],
        }
    }
}

fn parse<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
    }
}

impl RunConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = RunConfig::default();

        let horizon: usize = parse(
            "PACKHUNT_HORIZON",
            get("PACKHUNT_HORIZON"),
            defaults.grid.max_steps,
        )?;
        let grid = GridConfig {
            width: parse("PACKHUNT_GRID_WIDTH", get("PACKHUNT_GRID_WIDTH"), defaults.grid.width)?,
            height: parse("PACKHUNT_GRID_HEIGHT", get("PACKHUNT_GRID_HEIGHT"), defaults.grid.height)?,
            num_predators: parse(
                "PACKHUNT_PREDATORS",
                get("PACKHUNT_PREDATORS"),
                defaults.grid.num_predators,
            )?,
            num_prey: parse("PACKHUNT_PREY", get("PACKHUNT_PREY"), defaults.grid.num_prey)?,
            prey_strength: parse(
                "PACKHUNT_PREY_STRENGTH",
                get("PACKHUNT_PREY_STRENGTH"),
                defaults.grid.prey_strength,
            )?,
            obs_radius: parse(
                "PACKHUNT_OBS_RADIUS",
                get("PACKHUNT_OBS_RADIUS"),
                defaults.grid.obs_radius,
            )?,
            max_steps: horizon,
        };

        let comm_mode = match get("PACKHUNT_COMM_MODE") {
            Some(name) => name.parse::<CommMode>()?,
            None => defaults.episode.comm_mode,
        };
        let k_sync = parse("PACKHUNT_K_SYNC", get("PACKHUNT_K_SYNC"), defaults.episode.k_sync)?;
        if k_sync == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        let episode = EpisodeSettings {
            comm_mode,
            k_sync,
            keep_prev_action: parse(
                "PACKHUNT_KEEP_PREV_ACTION",
                get("PACKHUNT_KEEP_PREV_ACTION"),
                defaults.episode.keep_prev_action,
            )?,
            time_horizon: horizon as u64,
            debug: parse("PACKHUNT_DEBUG", get("PACKHUNT_DEBUG"), defaults.episode.debug)?,
        };

        let sweep = get("PACKHUNT_SWEEP")
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.parse::<SweepKind>())
            .transpose()?;
        let sweep_k = match get("PACKHUNT_SWEEP_K") {
            Some(list) => parse_k_list(&list)?,
            None => defaults.sweep_k,
        };

        Ok(Self {
            grid,
            episode,
            episodes: parse("PACKHUNT_EPISODES", get("PACKHUNT_EPISODES"), defaults.episodes)?,
            seed: parse("PACKHUNT_SEED", get("PACKHUNT_SEED"), defaults.seed)?,
            sweep,
            sweep_k,
        })
    }
}

fn parse_k_list(list: &str) -> Result<Vec<u64>, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: "PACKHUNT_SWEEP_K".to_string(),
        value: list.to_string(),
    };
    let values = list
        .split(',')
        .map(|item| item.trim().parse::<u64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;
    if values.is_empty() {
        return Err(invalid());
    }
    if values.contains(&0) {
        return Err(ConfigError::ZeroPeriod);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<RunConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RunConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.seed, 42);
        assert_eq!(config.episode.comm_mode, CommMode::Full);
        assert_eq!(config.episode.k_sync, 5);
        assert!(config.episode.keep_prev_action);
        assert_eq!(config.sweep, None);
    }

    #[test]
    fn test_reads_overrides() {
        let config = config(&[
            ("PACKHUNT_GRID_WIDTH", "15"),
            ("PACKHUNT_PREDATORS", "4"),
            ("PACKHUNT_HORIZON", "80"),
            ("PACKHUNT_COMM_MODE", " Periodic "),
            ("PACKHUNT_K_SYNC", "10"),
            ("PACKHUNT_KEEP_PREV_ACTION", "false"),
            ("PACKHUNT_SWEEP", "modes"),
            ("PACKHUNT_SWEEP_K", "1, 3,7"),
        ])
        .unwrap();
        assert_eq!(config.grid.width, 15);
        assert_eq!(config.grid.height, 10);
        assert_eq!(config.grid.num_predators, 4);
        assert_eq!(config.grid.max_steps, 80);
        assert_eq!(config.episode.time_horizon, 80);
        assert_eq!(config.episode.comm_mode, CommMode::Periodic);
        assert_eq!(config.episode.k_sync, 10);
        assert!(!config.episode.keep_prev_action);
        assert_eq!(config.sweep, Some(SweepKind::Modes));
        assert_eq!(config.sweep_k, vec![1, 3, 7]);
    }

    #[test]
    fn test_rejects_malformed_values() {
        assert_eq!(
            config(&[("PACKHUNT_SEED", "abc")]).unwrap_err(),
            ConfigError::InvalidValue {
                key: "PACKHUNT_SEED".to_string(),
                value: "abc".to_string()
            }
        );
        assert_eq!(
            config(&[("PACKHUNT_COMM_MODE", "gossip")]).unwrap_err(),
            ConfigError::UnknownMode("gossip".to_string())
        );
        assert_eq!(
            config(&[("PACKHUNT_K_SYNC", "0")]).unwrap_err(),
            ConfigError::ZeroPeriod
        );
        assert_eq!(
            config(&[("PACKHUNT_SWEEP_K", "1,0")]).unwrap_err(),
            ConfigError::ZeroPeriod
        );
        assert!(config(&[("PACKHUNT_SWEEP", "grid")]).is_err());
        assert!(config(&[("PACKHUNT_SWEEP_K", "1,,2")]).is_err());
    }
}
