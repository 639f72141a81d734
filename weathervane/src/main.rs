//! weathervane - terminal weather client
//!
//! Data flow:
//! 1. Key press -> `WeatherScreen::handle_event` -> actions
//! 2. Actions go through the `EffectStore` and its reducer
//! 3. `Effect::FetchWeather` is run as a keyed task; a newer fetch aborts the
//!    older one, and the reducer drops any result that still slips through
//! 4. The task resolves into `WeatherDidLoad` / `WeatherDidError`
//! 5. On render the backdrop layer recreates the ambient scene whenever the
//!    result revision moved
//!
//! # Usage
//!
//! ```sh
//! weathervane
//! weathervane --city "New York" --log-file /tmp/weathervane.log
//! ```

use std::cell::RefCell;
use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use weathervane::action::Action;
use weathervane::backdrop::AnimatedRenderer;
use weathervane::components::{BackdropLayer, Component, WeatherScreen, WeatherScreenProps};
use weathervane::config::Config;
use weathervane::effect::Effect;
use weathervane::reducer::reducer;
use weathervane::state::{AppState, LOADING_ANIM_TICK_MS};
use weathervane::{telemetry, WeatherApi};
use weathervane_core::{
    EffectContext, EffectRuntime, EffectStore, EventKind, EventOutcome, TracingMiddleware,
};

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = Config::parse();

    if let Err(e) = telemetry::init(config.log_file.as_deref()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal failure");
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: Config,
) -> io::Result<()> {
    let api = WeatherApi::new(config.api_base.as_str());
    tracing::info!(api = api.base_url(), city = config.initial_city(), "starting");

    let store = EffectStore::with_middleware(
        AppState::new(config.initial_city()),
        reducer,
        TracingMiddleware::new().mute("Tick").mute("BackdropFrame"),
    );
    let mut runtime = EffectRuntime::from_store(store);

    // Spinner
    runtime
        .subscriptions()
        .interval("tick", Duration::from_millis(LOADING_ANIM_TICK_MS), || {
            Action::Tick
        });

    // One-shot warm-up splash
    runtime
        .subscriptions()
        .after("warmup", config.warmup(), || Action::WarmupDidFinish);

    if !config.initial_city().is_empty() {
        runtime.enqueue(Action::WeatherFetch);
    }

    let backdrop = if config.no_backdrop {
        BackdropLayer::disabled()
    } else {
        BackdropLayer::new(Box::new(AnimatedRenderer::new(runtime.action_tx())))
    };
    let screen = RefCell::new(WeatherScreen::with_city(backdrop, config.initial_city()));

    runtime
        .run(
            terminal,
            |frame, area, state| {
                screen
                    .borrow_mut()
                    .render(frame, area, WeatherScreenProps::new(state));
            },
            |event, state| map_event(&mut screen.borrow_mut(), event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| handle_effect(&api, effect, ctx),
        )
        .await
}

fn map_event(
    screen: &mut WeatherScreen,
    event: &EventKind,
    state: &AppState,
) -> EventOutcome<Action> {
    if let EventKind::Resize(..) = event {
        return EventOutcome::ignored().with_render();
    }
    EventOutcome::from_actions(screen.handle_event(event, WeatherScreenProps::new(state)))
}

/// Run effects as tasks
fn handle_effect(api: &WeatherApi, effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchWeather { request_id, city } => {
            let api = api.clone();
            // Same key: spawning aborts the previous lookup if still running
            ctx.tasks().spawn("weather", async move {
                match api.fetch(&city).await {
                    Ok(result) => {
                        tracing::info!(request_id, city = %result.city, "weather loaded");
                        Action::WeatherDidLoad { request_id, result }
                    }
                    Err(e) => {
                        tracing::warn!(
                            request_id,
                            kind = e.kind(),
                            error = %e,
                            "weather lookup failed"
                        );
                        Action::WeatherDidError {
                            request_id,
                            message: e.to_string(),
                        }
                    }
                }
            });
        }
    }
}
