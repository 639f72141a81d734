//! Effects - side effects declared by the reducer

/// Work the reducer asks the runtime to perform
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Look up `city`; the outcome is reported under `request_id`
    FetchWeather { request_id: u64, city: String },
}
