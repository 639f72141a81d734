//! Component wrapper around the backdrop scope
//!
//! The layer's render area is the drawing surface. Unmounting the layer
//! (dropping it) releases the live backdrop through the scope.

use ratatui::{layout::Rect, Frame};

use super::Component;
use crate::backdrop::{BackdropRenderer, BackdropScope};
use crate::scene::SceneKind;
use crate::state::WeatherResult;

pub struct BackdropLayerProps<'a> {
    pub weather: Option<&'a WeatherResult>,
    pub revision: u64,
}

pub struct BackdropLayer {
    scope: BackdropScope,
    /// `None` disables backdrops entirely
    renderer: Option<Box<dyn BackdropRenderer>>,
}

impl BackdropLayer {
    pub fn new(renderer: Box<dyn BackdropRenderer>) -> Self {
        Self {
            scope: BackdropScope::new(),
            renderer: Some(renderer),
        }
    }

    pub fn disabled() -> Self {
        Self {
            scope: BackdropScope::new(),
            renderer: None,
        }
    }

    pub fn scope(&self) -> &BackdropScope {
        &self.scope
    }

    pub fn scene(&self) -> Option<SceneKind> {
        self.scope.scene()
    }
}

impl<A> Component<A> for BackdropLayer {
    type Props<'a> = BackdropLayerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(renderer) = self.renderer.as_deref() else {
            return;
        };
        self.scope
            .sync(props.weather, props.revision, Some(area), renderer);
        if let Some(backdrop) = self.scope.current() {
            backdrop.render(frame, area);
        }
    }
}
