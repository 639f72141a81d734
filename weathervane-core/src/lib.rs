//! Dispatch plumbing for the weathervane terminal client
//!
//! The application is organised around a single state container and a pure
//! reducer, following a Redux/Elm-inspired layout:
//!
//! - **Action**: describes something that happened (a key press, a finished request)
//! - **EffectStore**: owns the state and routes actions through the reducer
//! - **DispatchResult**: what the reducer reports back - whether state changed,
//!   plus declarative effects for the runtime to carry out
//! - **TaskManager**: keyed one-shot async work; a new task under an existing key
//!   replaces the old one
//! - **Subscriptions**: long-lived action sources (timers)
//! - **Component**: pure UI pieces that render from props and emit actions
//!
//! # Intent / result actions
//!
//! Async work is split into two actions. The intent (`WeatherFetch`) makes the
//! reducer emit an effect; the effect handler spawns a task; the task resolves
//! into a result action (`WeatherDidLoad`, `WeatherDidError`) that goes back
//! through the reducer like any other action.
//!
//! ```ignore
//! fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::WeatherFetch => {
//!             state.is_loading = true;
//!             DispatchResult::changed_with(Effect::FetchWeather { city: state.city.clone() })
//!         }
//!         Action::WeatherDidLoad(result) => {
//!             state.is_loading = false;
//!             state.weather = Some(result);
//!             DispatchResult::changed()
//!         }
//!     }
//! }
//! ```

pub mod action;
pub mod component;
pub mod effect;
pub mod event;
pub mod middleware;
pub mod runtime;
pub mod subscriptions;
pub mod tasks;
pub mod testing;

pub use action::{Action, ActionSummary};
pub use component::Component;
pub use effect::{DispatchResult, EffectReducer, EffectStore};
pub use event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
pub use middleware::{Middleware, NoopMiddleware, TracingMiddleware};
pub use runtime::{EffectContext, EffectRuntime, EventOutcome};
pub use subscriptions::{SubKey, Subscriptions};
pub use tasks::{TaskKey, TaskManager};

// Re-export ratatui types for convenience
pub use ratatui::{layout::Rect, Frame};
