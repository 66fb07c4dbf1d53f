use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_BOARD_SIZE: u8 = 8;
pub const MIN_BOARD_SIZE: u8 = 4;
pub const MAX_BOARD_SIZE: u8 = 16;

/// Game setup. Deserializable so a host can pass it in as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: u8,
}

impl GameConfig {
    pub fn with_board_size(board_size: u8) -> Self {
        Self { board_size }
    }

    /// The board must be even so the four starting pieces sit in the exact center.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_board_size(self.board_size as usize)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
        }
    }
}

pub(crate) fn validate_board_size(size: usize) -> Result<(), ConfigError> {
    if size % 2 != 0 || !(MIN_BOARD_SIZE as usize..=MAX_BOARD_SIZE as usize).contains(&size) {
        return Err(ConfigError::InvalidBoardSize {
            size,
            min: MIN_BOARD_SIZE,
            max: MAX_BOARD_SIZE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_standard_board() {
        let config = GameConfig::default();

        assert_eq!(config.board_size, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn odd_and_out_of_range_sizes_are_rejected() {
        for size in [0, 2, 5, 7, 18, 255] {
            let err = GameConfig::with_board_size(size).validate().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidBoardSize { .. }), "size {size}");
        }
        for size in [4, 6, 10, 16] {
            assert!(GameConfig::with_board_size(size).validate().is_ok(), "size {size}");
        }
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());

        let config: GameConfig = serde_json::from_str(r#"{"board_size": 6}"#).unwrap();
        assert_eq!(config.board_size, 6);
    }
}
