use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::Component;

pub const ERROR_ICON: &str = "⚠";

pub struct ErrorPanelProps<'a> {
    pub message: &'a str,
}

pub struct ErrorPanel;

impl<A> Component<A> for ErrorPanel {
    type Props<'a> = ErrorPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let line = Line::from(vec![
            Span::styled(format!("{ERROR_ICON} "), Style::default().fg(Color::Red).bold()),
            Span::styled(props.message, Style::default().fg(Color::Red)),
        ]);
        frame.render_widget(
            Paragraph::new(line).centered().wrap(Wrap { trim: true }),
            area,
        );
    }
}
