//! Event/action/render loop

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::effect::EffectStore;
use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
use crate::middleware::Middleware;
use crate::subscriptions::Subscriptions;
use crate::tasks::TaskManager;
use crate::Action;

/// Timeout passed to each `crossterm::event::poll` call
const POLL_TIMEOUT: Duration = Duration::from_millis(10);
/// Sleep between polling rounds
const LOOP_SLEEP: Duration = Duration::from_millis(16);

/// Actions produced by an event, plus an optional render request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Collect the output of `Component::handle_event`.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<Option<A>> for EventOutcome<A> {
    fn from(action: Option<A>) -> Self {
        match action {
            Some(action) => Self::action(action),
            None => Self::ignored(),
        }
    }
}

impl<A> From<Vec<A>> for EventOutcome<A> {
    fn from(actions: Vec<A>) -> Self {
        Self::from_actions(actions)
    }
}

/// What an effect handler may touch
pub struct EffectContext<'a, A: Action> {
    tasks: &'a mut TaskManager<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Runtime for an [`EffectStore`]
///
/// Owns the store, the action channel, the task manager and the timer
/// subscriptions. [`EffectRuntime::run`] drives everything until the quit
/// predicate matches, then tears down tasks and timers.
pub struct EffectRuntime<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    store: EffectStore<S, A, E, M>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    should_render: bool,
    tasks: TaskManager<A>,
    subscriptions: Subscriptions<A>,
}

impl<S, A, E, M> EffectRuntime<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    pub fn from_store(store: EffectStore<S, A, E, M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());
        let subscriptions = Subscriptions::new(action_tx.clone());

        Self {
            store,
            action_tx,
            action_rx,
            should_render: true,
            tasks,
            subscriptions,
        }
    }

    /// Queue an action for the first loop iteration.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn action_tx(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions<A> {
        &mut self.subscriptions
    }

    /// Run until `should_quit` matches an action or every source closes.
    ///
    /// Each iteration renders if the last dispatch changed state, then waits
    /// for either a terminal event (mapped to actions by `map_event`) or an
    /// action (reduced, with resulting effects passed to `handle_effect`).
    pub async fn run<B, FRender, FEvent, FQuit, FEffect, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(
            event_tx,
            POLL_TIMEOUT,
            LOOP_SLEEP,
            cancel_token.clone(),
        );

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                })?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let Some(event) = process_raw_event(raw_event) else {
                        continue;
                    };
                    let outcome: EventOutcome<A> = map_event(&event, self.store.state()).into();
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }

                    let result = self.store.dispatch(action);
                    if result.has_effects() {
                        let mut ctx = EffectContext {
                            tasks: &mut self.tasks,
                        };
                        for effect in result.effects {
                            handle_effect(effect, &mut ctx);
                        }
                    }
                    self.should_render |= result.changed;
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.subscriptions.cancel_all();
        self.tasks.cancel_all();
        tracing::info!(tasks_spawned = self.tasks.spawned(), "runtime stopped");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::DispatchResult;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Go,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Go"
        }
    }

    fn reducer(state: &mut u32, _action: TestAction) -> DispatchResult<()> {
        *state += 1;
        DispatchResult::changed()
    }

    #[test]
    fn test_event_outcome_conversions() {
        let outcome: EventOutcome<TestAction> = Some(TestAction::Go).into();
        assert_eq!(outcome.actions, vec![TestAction::Go]);
        assert!(!outcome.needs_render);

        let outcome: EventOutcome<TestAction> = None.into();
        assert!(outcome.actions.is_empty());

        let outcome = EventOutcome::from_actions(vec![TestAction::Go, TestAction::Go]).with_render();
        assert_eq!(outcome.actions.len(), 2);
        assert!(outcome.needs_render);
    }

    #[tokio::test]
    async fn test_runtime_exposes_state_and_queue() {
        let mut runtime = EffectRuntime::from_store(EffectStore::new(0u32, reducer));
        runtime.enqueue(TestAction::Go);

        assert_eq!(*runtime.state(), 0);
        assert!(runtime.tasks().is_empty());
        assert!(runtime.subscriptions().is_empty());
        assert!(runtime.action_rx.try_recv().is_ok());
    }
}
