use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;

pub struct HelpBar;

pub struct HelpBarProps {
    /// Shown when a backdrop scene is live
    pub scene: Option<&'static str>,
}

impl<A> Component<A> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let key = Style::default().fg(Color::Cyan).bold();
        let text = Style::default().fg(Color::DarkGray);

        let mut spans = vec![
            Span::styled(" enter", key),
            Span::styled(" fetch  ", text),
            Span::styled("ctrl+u", key),
            Span::styled(" clear  ", text),
            Span::styled("esc", key),
            Span::styled(" quit ", text),
        ];
        if let Some(scene) = props.scene {
            spans.push(Span::styled(format!(" · {scene}"), text.italic()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weathervane_core::testing::RenderHarness;

    #[test]
    fn test_render_keys_and_scene() {
        let mut harness = RenderHarness::new(60, 1);
        let output = harness.render_to_string_plain(|frame| {
            Component::<()>::render(
                &mut HelpBar,
                frame,
                frame.area(),
                HelpBarProps { scene: Some("rain") },
            );
        });
        assert!(output.contains("enter fetch"));
        assert!(output.contains("esc quit"));
        assert!(output.contains("rain"));
    }
}
