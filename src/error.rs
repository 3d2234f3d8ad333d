//! Error type shared by the core and the browser layer.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Rejection sampling could not find a free spot for a new token.
    #[error("no free position for a new token after {attempts} attempts")]
    PlacementExhausted { attempts: u32 },

    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    #[error("malformed game config: {0}")]
    Config(String),

    /// Missing window / document / canvas pieces in the browser layer.
    #[error("dom error: {0}")]
    Dom(String),
}

/// Convenience Result type with GameError
pub type Result<T> = std::result::Result<T, GameError>;

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(feature = "serde_json")]
impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Config(err.to_string())
    }
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_error_mentions_attempts() {
        let err = GameError::PlacementExhausted { attempts: 1000 };
        assert_eq!(
            err.to_string(),
            "no free position for a new token after 1000 attempts"
        );
    }
}
