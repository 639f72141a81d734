//! Application state - single source of truth
//!
//! Components read `&AppState` through props; only the reducer mutates it.

/// Offset between the Kelvin and Celsius scales
pub const KELVIN_OFFSET: f64 = 273.15;

/// Spinner animation period
pub const LOADING_ANIM_TICK_MS: u64 = 100;

/// Convert a Kelvin reading to whole degrees Celsius.
///
/// Halves round towards positive infinity, so -0.5 °C reads as 0 and 0.5 °C
/// as 1.
pub fn kelvin_to_celsius(kelvin: f64) -> i64 {
    (kelvin - KELVIN_OFFSET + 0.5).floor() as i64
}

/// A successfully fetched and normalised weather report
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeatherResult {
    pub city: String,
    pub temperature_celsius: i64,
    pub description: String,
    /// Relative humidity in percent, exactly as reported
    pub humidity: f64,
    /// Observation time, milliseconds since the Unix epoch
    pub timestamp_millis: i64,
}

/// Everything the UI needs to render
#[derive(Clone, Debug)]
pub struct AppState {
    /// Free-form city text; empty means unset
    pub city: String,

    /// True strictly while a fetch is in flight
    pub is_loading: bool,

    /// True during the start-up warm-up, then false for good
    pub initial_loading: bool,

    /// Last successful result (None = nothing fetched, or last fetch failed)
    pub weather: Option<WeatherResult>,

    /// Message of the last failure
    pub error: Option<String>,

    /// Generation of the most recent fetch; results from older ones are dropped
    pub request_id: u64,

    /// Bumped whenever `weather` is replaced or cleared
    pub result_revision: u64,

    /// Spinner frame counter
    pub tick_count: u32,
}

impl AppState {
    /// Fresh state, with the warm-up flag raised.
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            is_loading: false,
            initial_loading: true,
            weather: None,
            error: None,
            request_id: 0,
            result_revision: 0,
            tick_count: 0,
        }
    }

    /// Whether the submit control accepts input.
    pub fn can_submit(&self) -> bool {
        !self.is_loading
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("")
    }
}
