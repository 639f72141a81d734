//! Dispatch middleware

use crate::action::{Action, ActionSummary};

/// Hooks around every dispatch
///
/// Middleware sees actions by reference and never touches state, so it is
/// limited to cross-cutting concerns like logging and counting.
pub trait Middleware<A: Action> {
    /// Called before the reducer runs
    fn before(&mut self, action: &A);

    /// Called after the reducer ran, with its change flag
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that reports actions through `tracing`
///
/// High-frequency actions (animation frames, spinner ticks) can be muted by
/// name so they don't flood the log.
#[derive(Debug, Clone, Default)]
pub struct TracingMiddleware {
    muted: Vec<&'static str>,
    dispatched: u64,
}

impl TracingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip logging for actions with the given name
    pub fn mute(mut self, name: &'static str) -> Self {
        self.muted.push(name);
        self
    }

    /// Number of actions seen so far, muted ones included
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    fn is_muted(&self, name: &str) -> bool {
        self.muted.iter().any(|muted| *muted == name)
    }
}

impl<A: ActionSummary> Middleware<A> for TracingMiddleware {
    fn before(&mut self, action: &A) {
        self.dispatched += 1;
        if !self.is_muted(action.name()) {
            tracing::trace!(action = action.name(), "dispatching");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if !self.is_muted(action.name()) {
            tracing::debug!(
                action = %action.summary(),
                state_changed,
                "action processed"
            );
        }
    }
}
