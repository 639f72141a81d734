//! Whole-screen render tests using RenderHarness

use chrono::Utc;
use ratatui::layout::Rect;
use weathervane::backdrop::{Backdrop, BackdropRenderer, ParticleBackdrop};
use weathervane::components::{
    format_time_in, BackdropLayer, Component, WeatherScreen, WeatherScreenProps, PLACEHOLDER,
    SUBMIT_LABEL,
};
use weathervane::scene::{SceneConfig, SceneKind};
use weathervane::state::{AppState, WeatherResult};
use weathervane_core::testing::*;

struct StillRenderer;

impl BackdropRenderer for StillRenderer {
    fn create(&self, config: &'static SceneConfig, surface: Rect) -> Box<dyn Backdrop> {
        Box::new(ParticleBackdrop::new(config, surface))
    }
}

fn utc(millis: i64) -> String {
    format_time_in(millis, &Utc)
}

fn ready(city: &str) -> AppState {
    let mut state = AppState::new(city);
    state.initial_loading = false;
    state
}

fn draw(screen: &mut WeatherScreen, state: &AppState) -> String {
    let mut render = RenderHarness::new(70, 24);
    render.render_to_string_plain(|frame| {
        let props = WeatherScreenProps {
            state,
            format_time: utc,
        };
        screen.render(frame, frame.area(), props);
    })
}

fn rainy_paris() -> WeatherResult {
    WeatherResult {
        city: "Paris".into(),
        temperature_celsius: 12,
        description: "light rain".into(),
        humidity: 81.0,
        timestamp_millis: 1_700_000_000_000,
    }
}

#[test]
fn test_render_empty_form() {
    let mut screen = WeatherScreen::new(BackdropLayer::disabled());
    let output = draw(&mut screen, &ready(""));

    assert!(output.contains("Weather App"));
    assert!(output.contains(PLACEHOLDER));
    assert!(output.contains(SUBMIT_LABEL));
    assert!(!output.contains("Temperature"));
}

#[test]
fn test_render_loading() {
    let mut screen = WeatherScreen::new(BackdropLayer::disabled());
    let mut state = ready("Paris");
    state.is_loading = true;

    let output = draw(&mut screen, &state);
    assert!(output.contains("fetching"), "should show loading state");
}

#[test]
fn test_render_result() {
    let mut screen = WeatherScreen::new(BackdropLayer::disabled());
    let mut state = ready("Paris");
    state.weather = Some(rainy_paris());
    state.result_revision = 1;

    let output = draw(&mut screen, &state);
    assert!(output.contains("Paris"));
    assert!(output.contains("Temperature: 12°C"));
    assert!(output.contains("Description: light rain"));
    assert!(output.contains("Humidity: 81%"));
    assert!(output.contains("Last Updated: 22:13:20"));
}

#[test]
fn test_render_error() {
    let mut screen = WeatherScreen::new(BackdropLayer::disabled());
    let mut state = ready("");
    state.error = Some("Please enter a city name".into());

    let output = draw(&mut screen, &state);
    assert!(output.contains("Please enter a city name"));
}

#[test]
fn test_backdrop_follows_result() {
    let mut screen = WeatherScreen::new(BackdropLayer::new(Box::new(StillRenderer)));
    let mut state = ready("Paris");
    state.weather = Some(rainy_paris());
    state.result_revision = 1;

    let output = draw(&mut screen, &state);
    assert_eq!(screen.backdrop().scene(), Some(SceneKind::Rain));
    // Card is drawn over the backdrop
    assert!(output.contains("Temperature: 12°C"));
    assert!(output.contains("rain"));

    // Failed lookup: result cleared, backdrop released, nothing replaces it
    state.weather = None;
    state.error = Some("City not found".into());
    state.result_revision = 2;
    draw(&mut screen, &state);

    assert_eq!(screen.backdrop().scene(), None);
    assert_eq!(screen.backdrop().scope().created(), 1);
    assert_eq!(screen.backdrop().scope().released(), 1);
}

#[test]
fn test_rerender_keeps_backdrop() {
    let mut screen = WeatherScreen::new(BackdropLayer::new(Box::new(StillRenderer)));
    let mut state = ready("Paris");
    state.weather = Some(rainy_paris());
    state.result_revision = 1;

    draw(&mut screen, &state);
    state.tick_count += 5;
    draw(&mut screen, &state);

    assert_eq!(screen.backdrop().scope().created(), 1);
    assert_eq!(screen.backdrop().scope().released(), 0);
}
