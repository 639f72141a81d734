//! Weather result card

use std::fmt::Display;

use chrono::{Local, TimeZone};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::state::WeatherResult;

/// Shown when a timestamp is outside chrono's range
const UNKNOWN_TIME: &str = "--:--:--";

/// Wall-clock time of `millis` in the local zone.
pub fn format_local_time(millis: i64) -> String {
    format_time_in(millis, &Local)
}

pub fn format_time_in<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%H:%M:%S").to_string(),
        None => UNKNOWN_TIME.to_string(),
    }
}

/// Pick a temperature colour on a cold to hot scale
fn temperature_color(celsius: i64) -> Color {
    match celsius {
        ..=0 => Color::Rgb(120, 170, 255),
        1..=12 => Color::Rgb(120, 210, 230),
        13..=24 => Color::Rgb(150, 220, 140),
        25..=32 => Color::Rgb(255, 200, 90),
        _ => Color::Rgb(255, 120, 90),
    }
}

pub struct ResultPanelProps<'a> {
    pub weather: &'a WeatherResult,
    /// Formats `timestamp_millis`; local time outside tests
    pub format_time: fn(i64) -> String,
}

pub struct ResultPanel;

impl<A> Component<A> for ResultPanel {
    type Props<'a> = ResultPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let weather = props.weather;
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White);

        let lines = vec![
            Line::from(Span::styled(
                weather.city.as_str(),
                Style::default().fg(Color::Cyan).bold(),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Temperature: ", label),
                Span::styled(
                    format!("{}°C", weather.temperature_celsius),
                    Style::default()
                        .fg(temperature_color(weather.temperature_celsius))
                        .bold(),
                ),
            ]),
            Line::from(vec![
                Span::styled("Description: ", label),
                Span::styled(weather.description.as_str(), value),
            ]),
            Line::from(vec![
                Span::styled("Humidity: ", label),
                Span::styled(format!("{}%", weather.humidity), value),
            ]),
            Line::from(vec![
                Span::styled("Last Updated: ", label),
                Span::styled((props.format_time)(weather.timestamp_millis), value),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).centered(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use weathervane_core::testing::RenderHarness;

    fn utc(millis: i64) -> String {
        format_time_in(millis, &Utc)
    }

    #[test]
    fn test_format_time_in_zone() {
        // 2023-11-14T22:13:20Z
        assert_eq!(utc(1_700_000_000_000), "22:13:20");

        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_time_in(1_700_000_000_000, &tz), "00:13:20");
    }

    #[test]
    fn test_format_time_out_of_range() {
        assert_eq!(utc(i64::MAX), UNKNOWN_TIME);
    }

    #[test]
    fn test_render_fields() {
        let weather = WeatherResult {
            city: "Cairo".into(),
            temperature_celsius: 27,
            description: "clear sky".into(),
            humidity: 34.0,
            timestamp_millis: 1_700_000_000_000,
        };
        let mut harness = RenderHarness::new(40, 6);
        let output = harness.render_to_string_plain(|frame| {
            let props = ResultPanelProps {
                weather: &weather,
                format_time: utc,
            };
            Component::<()>::render(&mut ResultPanel, frame, frame.area(), props);
        });

        assert!(output.contains("Cairo"));
        assert!(output.contains("Temperature: 27°C"));
        assert!(output.contains("Description: clear sky"));
        assert!(output.contains("Humidity: 34%"));
        assert!(output.contains("Last Updated: 22:13:20"));
    }

    #[test]
    fn test_fractional_humidity_shown_as_reported() {
        let weather = WeatherResult {
            city: "Lima".into(),
            humidity: 57.5,
            ..Default::default()
        };
        let mut harness = RenderHarness::new(40, 6);
        let output = harness.render_to_string_plain(|frame| {
            let props = ResultPanelProps {
                weather: &weather,
                format_time: utc,
            };
            Component::<()>::render(&mut ResultPanel, frame, frame.area(), props);
        });
        assert!(output.contains("Humidity: 57.5%"));
    }

    #[test]
    fn test_negative_temperature() {
        let weather = WeatherResult {
            city: "Yakutsk".into(),
            temperature_celsius: -38,
            ..Default::default()
        };
        let mut harness = RenderHarness::new(40, 6);
        let output = harness.render_to_string_plain(|frame| {
            let props = ResultPanelProps {
                weather: &weather,
                format_time: utc,
            };
            Component::<()>::render(&mut ResultPanel, frame, frame.area(), props);
        });
        assert!(output.contains("-38°C"));
    }
}
