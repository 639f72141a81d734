use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn spinner(tick_count: u32) -> &'static str {
    SPINNERS[tick_count as usize % SPINNERS.len()]
}

pub struct SubmitButtonProps<'a> {
    pub label: &'a str,
    /// Disabled while a fetch is in flight
    pub is_enabled: bool,
    pub tick_count: u32,
}

/// Render-only; Enter in the city field is the trigger.
pub struct SubmitButton;

impl<A> Component<A> for SubmitButton {
    type Props<'a> = SubmitButtonProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let line = if props.is_enabled {
            Line::from(vec![
                Span::styled(
                    format!(" {} ", props.label),
                    Style::default().fg(Color::White).bg(Color::Blue).bold(),
                ),
                Span::styled("  ⏎", Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![
                Span::styled(
                    format!(" {} ", props.label),
                    Style::default().fg(Color::Gray).bg(Color::DarkGray),
                ),
                Span::styled(
                    format!("  {} fetching", spinner(props.tick_count)),
                    Style::default().fg(Color::Yellow),
                ),
            ])
        };
        frame.render_widget(Paragraph::new(line.centered()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weathervane_core::testing::RenderHarness;

    fn draw(is_enabled: bool, tick_count: u32) -> String {
        let mut harness = RenderHarness::new(40, 1);
        harness.render_to_string_plain(|frame| {
            let props = SubmitButtonProps {
                label: "Get Weather",
                is_enabled,
                tick_count,
            };
            Component::<()>::render(&mut SubmitButton, frame, frame.area(), props);
        })
    }

    #[test]
    fn test_enabled() {
        let output = draw(true, 0);
        assert!(output.contains("Get Weather"));
        assert!(!output.contains("fetching"));
    }

    #[test]
    fn test_disabled_shows_spinner() {
        let output = draw(false, 1);
        assert!(output.contains("Get Weather"));
        assert!(output.contains("◓ fetching"));
    }

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner(0), spinner(4));
        assert_ne!(spinner(0), spinner(1));
    }
}
