use serde::{Deserialize, Serialize};

use crate::{PieceSeed, core::PREVIEW_SIZE};

/// Construction parameters of a [`BoardEngine`](crate::BoardEngine).
///
/// Missing fields fall back to their defaults when deserializing, so a
/// config file only needs the values it changes.
///
/// # Example
///
/// ```
/// use stackfall_engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "width": 12 }"#).unwrap();
/// assert_eq!(config.width, 12);
/// assert_eq!(config.height, EngineConfig::DEFAULT_HEIGHT);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Number of grid columns.
    pub width: usize,
    /// Number of grid rows.
    pub height: usize,
    /// Seed for shapes and spawn columns. A random seed is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<PieceSeed>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            seed: None,
        }
    }
}

/// Error returned by [`EngineConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("grid width {width} is smaller than the minimum of {min}", min = PREVIEW_SIZE)]
    TooNarrow { width: usize },
    #[display("grid height {height} is smaller than the minimum of {min}", min = PREVIEW_SIZE)]
    TooShort { height: usize },
}

impl EngineConfig {
    pub const DEFAULT_WIDTH: usize = 20;
    pub const DEFAULT_HEIGHT: usize = 34;

    /// Checks that every shape fits the grid in every rotation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < PREVIEW_SIZE {
            return Err(ConfigError::TooNarrow { width: self.width });
        }
        if self.height < PREVIEW_SIZE {
            return Err(ConfigError::TooShort {
                height: self.height,
            });
        }
        Ok(())
    }
}
