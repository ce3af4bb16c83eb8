//! Game configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// When a game that is still playable is declared drawn.
///
/// Stalemate always draws; these rules add to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawRules {
    /// Draw when both sides alternate between the same two moves over their last five.
    pub repetition: bool,
    /// Half-moves without a capture after which the game is drawn. Off unless set.
    pub fifty_move_limit: Option<u32>,
}

impl Default for DrawRules {
    fn default() -> Self {
        Self {
            repetition: true,
            fifty_move_limit: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub draw: DrawRules,
}

impl GameConfig {
    /// Reads a JSON configuration file. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.draw.fifty_move_limit == Some(0) {
            return Err(Error::Config(
                "draw.fifty_move_limit must be positive (leave it out to disable)".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert!(config.draw.repetition);
        assert_eq!(config.draw.fifty_move_limit, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "draw": { "repetition": false } }"#).unwrap();
        assert!(!config.draw.repetition);
        assert_eq!(config.draw.fifty_move_limit, None);

        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_enable_fifty_move_rule() {
        let config = GameConfig::from_json(r#"{ "draw": { "fifty_move_limit": 100 } }"#).unwrap();
        assert_eq!(config.draw.fifty_move_limit, Some(100));
        assert!(config.draw.repetition);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "draw": { "fifty_move_limit": 0 } }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            GameConfig::load("/nonexistent/echecs.json"),
            Err(Error::Io(_))
        ));
    }
}
