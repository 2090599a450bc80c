//! Runner configuration structures and loaders.
use std::env;
use std::path::{Path, PathBuf};

use gym_core::{CharacterClass, EnvConfig};
use sim_lite::LiteRules;

use crate::policy::PolicyKind;

/// Errors raised while loading configuration files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Configuration for a batch of rollouts.
#[derive(Clone, Debug, PartialEq)]
pub struct RunnerConfig {
    pub episodes: u32,
    /// Driver-side cap on steps per episode. The environment itself never truncates.
    pub max_steps: u64,
    /// Emit a progress log every this many steps; 0 logs only episode ends.
    pub log_every: u64,
    pub policy: PolicyKind,
    pub policy_seed: Option<u64>,
    /// Seed of the first episode; episode `i` uses `seed + i`, wrapping at `u64::MAX`.
    pub seed: Option<u64>,
    pub final_floor: Option<i32>,
    pub env: EnvConfig,
    pub report_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl RunnerConfig {
    pub const DEFAULT_EPISODES: u32 = 1;
    pub const DEFAULT_MAX_STEPS: u64 = 10_000;
    pub const DEFAULT_LOG_EVERY: u64 = 1_000;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SPIRE_GYM_EPISODES` - Number of episodes to run (default: 1)
    /// - `SPIRE_GYM_MAX_STEPS` - Steps per episode before the driver stops (default: 10000)
    /// - `SPIRE_GYM_LOG_EVERY` - Progress log interval in steps (default: 1000)
    /// - `SPIRE_GYM_POLICY` - `random`, `first` or `uniform-index` (default: random)
    /// - `SPIRE_GYM_POLICY_SEED` - Seed for sampling policies (default: entropy)
    /// - `SPIRE_GYM_SEED` - Seed of the first episode (default: drawn by the environment)
    /// - `SPIRE_GYM_SEED_STREAM` - Seed for the environment's session-seed generator
    /// - `SPIRE_GYM_CHARACTER` - Character class (default: ironclad)
    /// - `SPIRE_GYM_ASCENSION` - Ascension level, clamped to 20 (default: 0)
    /// - `SPIRE_GYM_FINAL_FLOOR` - Boss floor of the reference simulator
    /// - `SPIRE_GYM_REPORT` - Path of the JSON-lines episode report
    /// - `SPIRE_GYM_LOG_DIR` - Directory for `runner.log`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RunnerConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(episodes) = parse::<u32>(lookup("SPIRE_GYM_EPISODES")) {
            config.episodes = episodes.max(1);
        }
        if let Some(max_steps) = parse::<u64>(lookup("SPIRE_GYM_MAX_STEPS")) {
            config.max_steps = max_steps.max(1);
        }
        if let Some(log_every) = parse(lookup("SPIRE_GYM_LOG_EVERY")) {
            config.log_every = log_every;
        }
        if let Some(policy) = parse(lookup("SPIRE_GYM_POLICY")) {
            config.policy = policy;
        }
        config.policy_seed = parse(lookup("SPIRE_GYM_POLICY_SEED"));
        config.seed = parse(lookup("SPIRE_GYM_SEED"));
        config.final_floor = parse(lookup("SPIRE_GYM_FINAL_FLOOR"));

        if let Some(character) = parse::<CharacterClass>(lookup("SPIRE_GYM_CHARACTER")) {
            config.env.character = character;
        }
        if let Some(ascension) = parse::<u8>(lookup("SPIRE_GYM_ASCENSION")) {
            config.env.ascension = ascension.min(EnvConfig::MAX_ASCENSION);
        }
        config.env.seed_stream = parse(lookup("SPIRE_GYM_SEED_STREAM"));

        config.report_path = lookup("SPIRE_GYM_REPORT").map(PathBuf::from);
        config.log_dir = lookup("SPIRE_GYM_LOG_DIR").map(PathBuf::from);

        config
    }

    pub fn rules(&self) -> LiteRules {
        let mut rules = LiteRules::default();
        if let Some(final_floor) = self.final_floor {
            rules.final_floor = final_floor;
        }
        rules
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            episodes: Self::DEFAULT_EPISODES,
            max_steps: Self::DEFAULT_MAX_STEPS,
            log_every: Self::DEFAULT_LOG_EVERY,
            policy: PolicyKind::default(),
            policy_seed: None,
            seed: None,
            final_floor: None,
            env: EnvConfig::default(),
            report_path: None,
            log_dir: None,
        }
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

/// Loader for environment configuration from TOML files.
pub struct EnvConfigLoader;

impl EnvConfigLoader {
    /// Load an [`EnvConfig`] from a TOML file. Missing fields keep their defaults
    /// and the ascension is clamped to [`EnvConfig::MAX_ASCENSION`].
    pub fn load(path: &Path) -> Result<EnvConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: EnvConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.ascension = config.ascension.min(EnvConfig::MAX_ASCENSION);

        Ok(config)
    }
}
