//! Reducer - (state, action) -> state + effects
//!
//! All state transitions live here. The only side effect, the HTTP lookup, is
//! requested as [`Effect::FetchWeather`] and performed by the runtime.

use weathervane_core::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::error::WeatherError;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Query =====
        Action::CityChange(city) => {
            if state.city == city {
                return DispatchResult::unchanged();
            }
            state.city = city;
            DispatchResult::changed()
        }

        Action::WeatherFetch => {
            if state.city.is_empty() {
                state.error = Some(WeatherError::EmptyInput.to_string());
                return DispatchResult::changed();
            }

            // A newer request supersedes whatever is still in flight
            state.request_id += 1;
            state.is_loading = true;
            state.error = None;
            DispatchResult::changed_with(Effect::FetchWeather {
                request_id: state.request_id,
                city: state.city.clone(),
            })
        }

        Action::WeatherDidLoad { request_id, result } => {
            if request_id != state.request_id {
                tracing::debug!(request_id, current = state.request_id, "dropping stale result");
                return DispatchResult::unchanged();
            }
            state.weather = Some(result);
            state.result_revision += 1;
            state.error = None;
            state.is_loading = false;
            DispatchResult::changed()
        }

        Action::WeatherDidError {
            request_id,
            message,
        } => {
            if request_id != state.request_id {
                tracing::debug!(request_id, current = state.request_id, "dropping stale error");
                return DispatchResult::unchanged();
            }
            if state.weather.take().is_some() {
                state.result_revision += 1;
            }
            state.error = Some(message);
            state.is_loading = false;
            DispatchResult::changed()
        }

        // ===== Lifecycle =====
        Action::WarmupDidFinish => {
            if !state.initial_loading {
                return DispatchResult::unchanged();
            }
            state.initial_loading = false;
            DispatchResult::changed()
        }

        Action::BackdropFrame => {
            // Only a live backdrop animates
            if state.weather.is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            if state.is_loading || state.initial_loading {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // Handled by the runtime's quit predicate
        Action::Quit => DispatchResult::unchanged(),
    }
}
