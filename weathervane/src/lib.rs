//! weathervane - terminal weather client
//!
//! A city field, one HTTP lookup per submit, and an animated backdrop picked
//! from the weather description. State flows through a single reducer; the
//! HTTP call and the backdrop animation run as tasks that report back with
//! actions.

pub mod action;
pub mod api;
pub mod backdrop;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod reducer;
pub mod scene;
pub mod state;
pub mod telemetry;

pub use action::Action;
pub use api::WeatherApi;
pub use effect::Effect;
pub use error::WeatherError;
pub use reducer::reducer;
pub use state::{AppState, WeatherResult};
