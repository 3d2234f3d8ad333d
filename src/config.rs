//! Tunable game constants. Defaults reproduce the classic 800×600 board with
//! five lives and a spawn interval ramping from 1s down to 200ms.

use crate::error::{GameError, Result};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Logical surface width.
    pub width: f64,
    /// Logical surface height.
    pub height: f64,
    /// Radius shared by every token; also the half-width of its hit box.
    pub token_radius: f64,
    pub starting_lives: u32,
    pub initial_spawn_interval_ms: u32,
    pub min_spawn_interval_ms: u32,
    pub spawn_interval_step_ms: u32,
    /// Candidates tried per spawn before the game gives up.
    pub max_placement_attempts: u32,
    pub token_image_url: String,
    pub menu_url: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            token_radius: 20.0,
            starting_lives: 5,
            initial_spawn_interval_ms: 1000,
            min_spawn_interval_ms: 200,
            spawn_interval_step_ms: 5,
            max_placement_attempts: 1000,
            token_image_url: "assets/logo.png".to_string(),
            menu_url: "index.html".to_string(),
        }
    }
}

impl GameConfig {
    /// Minimum center-to-center distance between two live tokens.
    pub fn min_separation(&self) -> f64 {
        self.token_radius * 2.0
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.token_radius > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "token_radius must be positive, got {}",
                self.token_radius
            )));
        }
        if !(self.width > self.min_separation()) || !(self.height > self.min_separation()) {
            return Err(GameError::InvalidConfig(format!(
                "surface {}x{} cannot fit a token of radius {}",
                self.width, self.height, self.token_radius
            )));
        }
        if self.starting_lives == 0 {
            return Err(GameError::InvalidConfig("starting_lives must be at least 1".into()));
        }
        if self.max_placement_attempts == 0 {
            return Err(GameError::InvalidConfig(
                "max_placement_attempts must be at least 1".into(),
            ));
        }
        if self.min_spawn_interval_ms > self.initial_spawn_interval_ms {
            return Err(GameError::InvalidConfig(format!(
                "min_spawn_interval_ms ({}) exceeds initial_spawn_interval_ms ({})",
                self.min_spawn_interval_ms, self.initial_spawn_interval_ms
            )));
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.min_separation(), 40.0);
    }

    #[test]
    fn rejects_floor_above_initial_interval() {
        let cfg = GameConfig {
            min_spawn_interval_ms: 2000,
            ..GameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_surface_smaller_than_a_token() {
        let cfg = GameConfig {
            width: 30.0,
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = GameConfig {
            token_radius: 0.0,
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_lives_and_attempts() {
        let no_lives = GameConfig {
            starting_lives: 0,
            ..GameConfig::default()
        };
        assert!(no_lives.validate().is_err());
        let no_attempts = GameConfig {
            max_placement_attempts: 0,
            ..GameConfig::default()
        };
        assert!(no_attempts.validate().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn from_json_fills_missing_fields_with_defaults() {
        let cfg = GameConfig::from_json(r#"{ "starting_lives": 3 }"#).unwrap();
        assert_eq!(cfg.starting_lives, 3);
        assert_eq!(cfg.width, 800.0);
        assert!(GameConfig::from_json("{ not json").is_err());
    }
}
