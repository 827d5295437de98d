use core::str::FromStr;

use thiserror::Error;

use crate::difficulty::Difficulty;

#[cfg(not(target_arch = "wasm32"))]
const DIFFICULTY_VAR: &str = "WATER_GRAB_DIFFICULTY";
#[cfg(not(target_arch = "wasm32"))]
const SEED_VAR: &str = "WATER_GRAB_SEED";

const DIFFICULTY_KEY: &str = "difficulty";
const SEED_KEY: &str = "seed";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown difficulty {0:?}, expected one of easy, normal, hard")]
    UnknownDifficulty(String),

    #[error("Invalid RNG seed {0:?}, expected an unsigned integer")]
    InvalidSeed(String),
}

/// Startup settings, validated before the app is built.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    /// Fixed seed for item placement and message picks. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Builds a config from `key=value` pairs. Unrelated keys are ignored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, ConfigError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref().trim();
            match key.as_ref() {
                DIFFICULTY_KEY => {
                    config.difficulty = Difficulty::from_str(value)
                        .map_err(|_parse| ConfigError::UnknownDifficulty(value.to_owned()))?;
                }
                SEED_KEY => {
                    config.seed = Some(
                        value
                            .parse()
                            .map_err(|_parse| ConfigError::InvalidSeed(value.to_owned()))?,
                    );
                }
                _ => (),
            }
        }
        Ok(config)
    }

    /// Reads `WATER_GRAB_DIFFICULTY` and `WATER_GRAB_SEED`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        let mut pairs = Vec::new();
        for (key, var) in [(DIFFICULTY_KEY, DIFFICULTY_VAR), (SEED_KEY, SEED_VAR)] {
            if let Some(value) = env_value(key, std::env::var(var))? {
                pairs.push((key, value));
            }
        }
        Self::from_pairs(pairs)
    }

    /// Reads `?difficulty=..&seed=..` from the page URL.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, ConfigError> {
        let Some(search) = web_sys::window().and_then(|window| window.location().search().ok())
        else {
            return Ok(Self::default());
        };
        let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
            return Ok(Self::default());
        };
        let pairs = [DIFFICULTY_KEY, SEED_KEY]
            .into_iter()
            .filter_map(|key| params.get(key).map(|value| (key, value)));
        Self::from_pairs(pairs)
    }
}

/// Unset is fine; set but not UTF-8 is rejected like any other bad value.
#[cfg(not(target_arch = "wasm32"))]
fn env_value(
    key: &str,
    value: Result<String, std::env::VarError>,
) -> Result<Option<String>, ConfigError> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(raw)) => {
            let raw = raw.to_string_lossy().into_owned();
            Err(if key == SEED_KEY {
                ConfigError::InvalidSeed(raw)
            } else {
                ConfigError::UnknownDifficulty(raw)
            })
        }
    }
}
