use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::submit_button::spinner;
use super::Component;

pub const APP_TITLE: &str = "Weather App";

pub struct SplashProps {
    pub tick_count: u32,
}

/// Placeholder shown during the start-up warm-up
pub struct Splash;

impl<A> Component<A> for Splash {
    type Props<'a> = SplashProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [_, title, status, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(APP_TITLE).centered())
                .style(Style::default().fg(Color::Cyan).bold()),
            title,
        );
        frame.render_widget(
            Paragraph::new(
                Line::from(format!("{} warming up", spinner(props.tick_count))).centered(),
            )
            .style(Style::default().fg(Color::DarkGray)),
            status,
        );
    }
}
