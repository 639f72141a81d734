//! Action traits

use std::fmt::Debug;

/// Something that can be dispatched to a store
///
/// Actions are cloned into middleware and sent across task boundaries, hence
/// the `Clone + Send + 'static` bounds.
pub trait Action: Clone + Debug + Send + 'static {
    /// Stable name used for logging and filtering
    fn name(&self) -> &'static str;
}

/// Short, log-friendly rendering of an action
///
/// The default falls back to `Debug`. Override it for actions that carry
/// bulky payloads.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
