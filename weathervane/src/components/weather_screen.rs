//! Top-level screen
//!
//! Layout, back to front: the ambient backdrop over the whole terminal, a
//! centred card with the city field, submit button and either the error or
//! the result, and a help bar on the last row. During warm-up only the splash
//! is drawn.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};
use weathervane_core::EventKind;

use super::{
    BackdropLayer, BackdropLayerProps, CityInput, CityInputProps, Component, ErrorPanel,
    ErrorPanelProps, HelpBar, HelpBarProps, ResultPanel, ResultPanelProps, Splash, SplashProps,
    SubmitButton, SubmitButtonProps, APP_TITLE, format_local_time,
};
use crate::action::Action;
use crate::state::AppState;

pub const PLACEHOLDER: &str = "Enter city name";
pub const SUBMIT_LABEL: &str = "Get Weather";

const CARD_WIDTH: u16 = 48;
const CARD_HEIGHT: u16 = 16;

pub struct WeatherScreenProps<'a> {
    pub state: &'a AppState,
    /// Formats the result timestamp
    pub format_time: fn(i64) -> String,
}

impl<'a> WeatherScreenProps<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            format_time: format_local_time,
        }
    }
}

pub struct WeatherScreen {
    input: CityInput,
    backdrop: BackdropLayer,
}

impl WeatherScreen {
    pub fn new(backdrop: BackdropLayer) -> Self {
        Self {
            input: CityInput::new(),
            backdrop,
        }
    }

    /// Screen whose city field starts with the cursor after `city`.
    pub fn with_city(backdrop: BackdropLayer, city: &str) -> Self {
        Self {
            input: CityInput::at_end_of(city),
            backdrop,
        }
    }

    pub fn backdrop(&self) -> &BackdropLayer {
        &self.backdrop
    }

    fn input_props<'a>(state: &'a AppState) -> CityInputProps<'a, Action> {
        CityInputProps {
            value: &state.city,
            placeholder: PLACEHOLDER,
            is_focused: true,
            can_submit: state.can_submit(),
            on_change: Action::CityChange,
            on_submit: |_| Action::WeatherFetch,
        }
    }
}

fn is_quit(event: &EventKind) -> bool {
    match event {
        EventKind::Key(key) => match key.code {
            KeyCode::Esc => true,
            KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        },
        _ => false,
    }
}

impl Component<Action> for WeatherScreen {
    type Props<'a> = WeatherScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if is_quit(event) {
            return vec![Action::Quit];
        }
        if props.state.initial_loading {
            return vec![];
        }
        self.input
            .handle_event(event, Self::input_props(props.state))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        if state.initial_loading {
            Component::<Action>::render(
                &mut Splash,
                frame,
                area,
                SplashProps {
                    tick_count: state.tick_count,
                },
            );
            return;
        }

        let [body, help] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        Component::<Action>::render(
            &mut self.backdrop,
            frame,
            body,
            BackdropLayerProps {
                weather: state.weather.as_ref(),
                revision: state.result_revision,
            },
        );

        let [card] = Layout::horizontal([Constraint::Length(CARD_WIDTH)])
            .flex(Flex::Center)
            .areas(body);
        let [card] = Layout::vertical([Constraint::Length(CARD_HEIGHT)])
            .flex(Flex::Center)
            .areas(card);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(Span::styled(
                format!(" {APP_TITLE} "),
                Style::default().fg(Color::Cyan).bold(),
            ))
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(card);
        frame.render_widget(Clear, card);
        frame.render_widget(block, card);

        let [input, button, _, detail] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .horizontal_margin(1)
        .areas(inner);

        self.input.render(frame, input, Self::input_props(state));

        Component::<Action>::render(
            &mut SubmitButton,
            frame,
            button,
            SubmitButtonProps {
                label: SUBMIT_LABEL,
                is_enabled: state.can_submit(),
                tick_count: state.tick_count,
            },
        );

        // Error and result never show together
        if let Some(message) = state.error.as_deref() {
            Component::<Action>::render(
                &mut ErrorPanel,
                frame,
                detail,
                ErrorPanelProps { message },
            );
        } else if let Some(weather) = state.weather.as_ref() {
            Component::<Action>::render(
                &mut ResultPanel,
                frame,
                detail,
                ResultPanelProps {
                    weather,
                    format_time: props.format_time,
                },
            );
        }

        Component::<Action>::render(
            &mut HelpBar,
            frame,
            help,
            HelpBarProps {
                scene: self.backdrop.scene().map(|scene| scene.label()),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WeatherResult;
    use crossterm::event::KeyEvent;
    use weathervane_core::testing::{ctrl_key, key, ActionAssertions, RenderHarness};

    fn ready(city: &str) -> AppState {
        let mut state = AppState::new(city);
        state.initial_loading = false;
        state
    }

    fn events(screen: &mut WeatherScreen, state: &AppState, k: &str) -> Vec<Action> {
        events_for(screen, state, key(k))
    }

    fn events_for(screen: &mut WeatherScreen, state: &AppState, k: KeyEvent) -> Vec<Action> {
        screen
            .handle_event(&EventKind::Key(k), WeatherScreenProps::new(state))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_typing_changes_city() {
        let mut screen = WeatherScreen::with_city(BackdropLayer::disabled(), "Ber");
        let actions = events(&mut screen, &ready("Ber"), "n");
        actions.assert_first(Action::CityChange("Bern".into()));
    }

    #[test]
    fn test_enter_fetches() {
        let mut screen = WeatherScreen::new(BackdropLayer::disabled());
        let actions = events(&mut screen, &ready("Bern"), "enter");
        actions.assert_count(1);
        actions.assert_first(Action::WeatherFetch);
    }

    #[test]
    fn test_enter_blocked_while_loading() {
        let mut screen = WeatherScreen::new(BackdropLayer::disabled());
        let mut state = ready("Bern");
        state.is_loading = true;
        events(&mut screen, &state, "enter").assert_empty();
    }

    #[test]
    fn test_quit_keys() {
        let mut screen = WeatherScreen::new(BackdropLayer::disabled());
        let state = ready("");
        events(&mut screen, &state, "esc").assert_first(Action::Quit);
        events_for(&mut screen, &state, ctrl_key('c')).assert_first(Action::Quit);
        // Plain 'q' is text
        events(&mut screen, &state, "q").assert_first(Action::CityChange("q".into()));
    }

    #[test]
    fn test_warmup_only_accepts_quit() {
        let mut screen = WeatherScreen::new(BackdropLayer::disabled());
        let state = AppState::new("");
        events(&mut screen, &state, "a").assert_empty();
        events(&mut screen, &state, "esc").assert_first(Action::Quit);
    }

    #[test]
    fn test_render_splash_during_warmup() {
        let mut screen = WeatherScreen::new(BackdropLayer::disabled());
        let state = AppState::new("");
        let mut harness = RenderHarness::new(60, 20);
        let output = harness.render_to_string_plain(|frame| {
            screen.render(frame, frame.area(), WeatherScreenProps::new(&state));
        });
        assert!(output.contains("warming up"));
        assert!(!output.contains(SUBMIT_LABEL));
    }

    #[test]
    fn test_error_hides_result() {
        let mut screen = WeatherScreen::new(BackdropLayer::disabled());
        let mut state = ready("Atlantis");
        state.weather = Some(WeatherResult {
            city: "Paris".into(),
            ..Default::default()
        });
        state.error = Some("City not found".into());

        let mut harness = RenderHarness::new(60, 20);
        let output = harness.render_to_string_plain(|frame| {
            screen.render(frame, frame.area(), WeatherScreenProps::new(&state));
        });
        assert!(output.contains("City not found"));
        assert!(!output.contains("Temperature"));
    }
}
