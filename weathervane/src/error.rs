//! Failure taxonomy for a weather lookup
//!
//! Every variant ends up in state as its `Display` text only; the variant
//! itself is used for logging.

use thiserror::Error;

/// Message shown when submitting without a city
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a city name";

/// Message shown for any non-success HTTP status
pub const NOT_FOUND_MESSAGE: &str = "City not found";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Please enter a city name")]
    EmptyInput,

    /// Any non-2xx response, whatever the status or body
    #[error("City not found")]
    NotFound,

    /// Connection, TLS or body transfer failure
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// Body was not the expected JSON document
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

impl WeatherError {
    /// Short tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::EmptyInput => "empty_input",
            WeatherError::NotFound => "not_found",
            WeatherError::Network(_) => "network",
            WeatherError::Parse(_) => "parse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_constants() {
        assert_eq!(WeatherError::EmptyInput.to_string(), EMPTY_INPUT_MESSAGE);
        assert_eq!(WeatherError::NotFound.to_string(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_parse_error_keeps_serde_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let expected = source.to_string();
        let err = WeatherError::from(source);

        assert_eq!(err.kind(), "parse");
        assert_eq!(err.to_string(), expected);
    }
}
