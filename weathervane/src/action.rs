//! Actions
//!
//! Naming follows the intent/result split: `WeatherFetch` is the intent,
//! `WeatherDidLoad` / `WeatherDidError` carry the outcome back. Result actions
//! are stamped with the generation of the fetch that produced them.

use weathervane_core::{Action as ActionTrait, ActionSummary};

use crate::state::WeatherResult;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Query =====
    /// City text edited
    CityChange(String),

    /// Submit: validate the city and start a fetch
    WeatherFetch,

    /// Fetch `request_id` succeeded
    WeatherDidLoad {
        request_id: u64,
        result: WeatherResult,
    },

    /// Fetch `request_id` failed
    WeatherDidError { request_id: u64, message: String },

    // ===== Lifecycle =====
    /// Start-up warm-up elapsed
    WarmupDidFinish,

    /// The active backdrop advanced one animation frame
    BackdropFrame,

    /// Spinner tick
    Tick,

    /// Exit the application
    Quit,
}

impl ActionTrait for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::CityChange(_) => "CityChange",
            Action::WeatherFetch => "WeatherFetch",
            Action::WeatherDidLoad { .. } => "WeatherDidLoad",
            Action::WeatherDidError { .. } => "WeatherDidError",
            Action::WarmupDidFinish => "WarmupDidFinish",
            Action::BackdropFrame => "BackdropFrame",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }
}

impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::WeatherDidLoad { request_id, result } => format!(
                "WeatherDidLoad {{ request: {}, city: {:?}, temp: {}°C, {:?} }}",
                request_id, result.city, result.temperature_celsius, result.description
            ),
            Action::WeatherDidError {
                request_id,
                message,
            } => {
                let msg = if message.chars().count() > 40 {
                    format!("{}...", message.chars().take(37).collect::<String>())
                } else {
                    message.clone()
                };
                format!("WeatherDidError {{ request: {}, {:?} }}", request_id, msg)
            }
            _ => format!("{:?}", self),
        }
    }
}
