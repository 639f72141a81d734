//! Component trait for UI pieces

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and reports input as actions
///
/// - Props carry everything the component needs, borrowed from state
/// - `handle_event` returns actions and never touches application state
/// - `render` depends only on props plus purely visual internals (cursor
///   position, animation handles)
///
/// Focus, enabled/disabled and similar context travel through props.
///
/// ```ignore
/// struct QuitHint;
///
/// impl Component<Action> for QuitHint {
///     type Props<'a> = ();
///
///     fn handle_event(&mut self, event: &EventKind, _: ()) -> impl IntoIterator<Item = Action> {
///         match event {
///             EventKind::Key(key) if key.code == KeyCode::Esc => Some(Action::Quit),
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, _: ()) {
///         frame.render_widget(Paragraph::new("esc quit"), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Read-only data required for rendering
    type Props<'a>;

    /// Map an event to actions. Render-only components keep the default.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
