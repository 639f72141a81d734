//! Ambient backdrop lifecycle
//!
//! A [`BackdropScope`] holds at most one live [`Backdrop`]. Whenever the active
//! weather result changes (tracked by `AppState::result_revision`) the scope
//! destroys the previous instance before creating the next, so two animation
//! loops never run at once. Dropping the scope destroys whatever is left.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ratatui::{layout::Rect, style::Style, Frame};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::action::Action;
use crate::scene::{SceneConfig, SceneKind};
use crate::state::WeatherResult;

/// Sub-cell resolution of particle positions
const SUBCELL: i64 = 16;

/// A running visual effect bound to a drawing surface
pub trait Backdrop: Send {
    fn scene(&self) -> SceneKind;

    /// Surface the effect currently covers
    fn surface(&self) -> Rect;

    fn resize(&mut self, surface: Rect);

    fn render(&self, frame: &mut Frame, area: Rect);

    /// Stop the effect and free what it holds. Safe to call more than once.
    fn destroy(&mut self);
}

/// Factory for backdrop instances
pub trait BackdropRenderer {
    fn create(&self, config: &'static SceneConfig, surface: Rect) -> Box<dyn Backdrop>;
}

#[derive(Clone, Copy, Debug)]
struct Particle {
    /// Start position in sub-cells
    x: i64,
    y: i64,
    glyph: usize,
    bright: bool,
}

/// Deterministic particle field
///
/// Particle positions are a function of the frame counter only, so rendering
/// the same frame twice gives the same picture.
pub struct ParticleBackdrop {
    config: &'static SceneConfig,
    surface: Rect,
    particles: Vec<Particle>,
    frame: Arc<AtomicU64>,
    animation: Option<AbortHandle>,
    destroyed: bool,
}

impl ParticleBackdrop {
    /// A still backdrop; nothing advances the frame counter.
    pub fn new(config: &'static SceneConfig, surface: Rect) -> Self {
        Self {
            config,
            surface,
            particles: scatter(config, surface),
            frame: Arc::new(AtomicU64::new(0)),
            animation: None,
            destroyed: false,
        }
    }

    /// Start the animation loop.
    ///
    /// Each tick advances the frame counter and sends [`Action::BackdropFrame`].
    /// The loop ends on [`Backdrop::destroy`] or when the receiver goes away.
    /// Must be called from within a tokio runtime.
    pub fn animate(mut self, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        if let Some(handle) = self.animation.take() {
            handle.abort();
        }

        let frame = Arc::clone(&self.frame);
        let period = self.config.frame_interval;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                frame.fetch_add(1, Ordering::Relaxed);
                if action_tx.send(Action::BackdropFrame).is_err() {
                    break;
                }
            }
        });
        self.animation = Some(handle.abort_handle());
        self
    }

    pub fn frame(&self) -> u64 {
        self.frame.load(Ordering::Relaxed)
    }

    pub fn is_animating(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Cell of particle `p` at `frame`, relative to the surface origin.
    fn position(&self, p: &Particle, frame: u64, width: u16, height: u16) -> (u16, u16) {
        let (vx, vy) = self.config.velocity;
        let frame = frame as i64;
        let span_x = width as i64 * SUBCELL;
        let span_y = height as i64 * SUBCELL;
        let x = (p.x + vx as i64 * frame).rem_euclid(span_x) / SUBCELL;
        let y = (p.y + vy as i64 * frame).rem_euclid(span_y) / SUBCELL;
        (x as u16, y as u16)
    }
}

impl Backdrop for ParticleBackdrop {
    fn scene(&self) -> SceneKind {
        self.config.kind
    }

    fn surface(&self) -> Rect {
        self.surface
    }

    fn resize(&mut self, surface: Rect) {
        if surface == self.surface {
            return;
        }
        self.surface = surface;
        self.particles = scatter(self.config, surface);
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let area = area.intersection(frame.area());
        if self.destroyed || area.is_empty() {
            return;
        }

        let buf = frame.buffer_mut();
        buf.set_style(area, Style::default().bg(self.config.background));

        let tick = self.frame();
        for particle in &self.particles {
            let (dx, dy) = self.position(particle, tick, area.width, area.height);
            let fg = if particle.bright {
                self.config.primary
            } else {
                self.config.secondary
            };
            let glyph = self.config.glyphs[particle.glyph % self.config.glyphs.len()];
            buf[(area.x + dx, area.y + dy)].set_symbol(glyph).set_fg(fg);
        }
    }

    fn destroy(&mut self) {
        if let Some(handle) = self.animation.take() {
            handle.abort();
        }
        self.destroyed = true;
    }
}

impl Drop for ParticleBackdrop {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Lay out particles for `surface` from a fixed seed.
fn scatter(config: &SceneConfig, surface: Rect) -> Vec<Particle> {
    if surface.is_empty() {
        return Vec::new();
    }
    let span_x = surface.width as u64 * SUBCELL as u64;
    let span_y = surface.height as u64 * SUBCELL as u64;
    (0..config.particle_count(surface.width, surface.height))
        .map(|i| {
            let seed = mix(i as u64 ^ (config.kind as u64) << 32);
            Particle {
                x: (seed % span_x) as i64,
                y: ((seed >> 20) % span_y) as i64,
                glyph: (seed >> 40) as usize,
                bright: seed >> 63 == 0,
            }
        })
        .collect()
}

/// splitmix64 finaliser
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Creates animated particle backdrops that report frames to the store
#[derive(Clone)]
pub struct AnimatedRenderer {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl AnimatedRenderer {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }
}

impl BackdropRenderer for AnimatedRenderer {
    fn create(&self, config: &'static SceneConfig, surface: Rect) -> Box<dyn Backdrop> {
        Box::new(ParticleBackdrop::new(config, surface).animate(self.action_tx.clone()))
    }
}

/// Owner of the single live backdrop
#[derive(Default)]
pub struct BackdropScope {
    current: Option<Box<dyn Backdrop>>,
    /// Revision the current instance (or its absence) was built for
    revision: Option<u64>,
    created: u64,
    released: u64,
}

impl BackdropScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the live backdrop in line with the current result.
    ///
    /// Nothing happens until a non-empty `surface` is bound. With an unchanged
    /// `revision` the existing instance is only resized. Otherwise the old
    /// instance is released first and a new one is created if `weather` is
    /// present.
    pub fn sync(
        &mut self,
        weather: Option<&WeatherResult>,
        revision: u64,
        surface: Option<Rect>,
        renderer: &dyn BackdropRenderer,
    ) {
        let Some(surface) = surface.filter(|s| !s.is_empty()) else {
            return;
        };

        if self.revision == Some(revision) {
            if let Some(current) = self.current.as_mut() {
                if current.surface() != surface {
                    current.resize(surface);
                }
            }
            return;
        }

        self.release();
        self.revision = Some(revision);

        if let Some(weather) = weather {
            let scene = SceneKind::classify(&weather.description);
            tracing::debug!(
                scene = scene.label(),
                revision,
                width = surface.width,
                height = surface.height,
                "creating backdrop"
            );
            self.current = Some(renderer.create(scene.config(), surface));
            self.created += 1;
        }
    }

    /// Destroy the live instance, if any.
    pub fn release(&mut self) {
        if let Some(mut backdrop) = self.current.take() {
            tracing::debug!(scene = backdrop.scene().label(), "destroying backdrop");
            backdrop.destroy();
            self.released += 1;
        }
    }

    pub fn current(&self) -> Option<&dyn Backdrop> {
        self.current.as_deref()
    }

    pub fn scene(&self) -> Option<SceneKind> {
        self.current.as_ref().map(|b| b.scene())
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Instances created over the scope's lifetime
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Instances destroyed over the scope's lifetime
    pub fn released(&self) -> u64 {
        self.released
    }
}

impl Drop for BackdropScope {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;
    use weathervane_core::testing::RenderHarness;

    use crate::scene::{CLEAR, RAIN};

    type Log = Arc<Mutex<Vec<String>>>;

    struct FakeBackdrop {
        scene: SceneKind,
        surface: Rect,
        log: Log,
    }

    impl Backdrop for FakeBackdrop {
        fn scene(&self) -> SceneKind {
            self.scene
        }

        fn surface(&self) -> Rect {
            self.surface
        }

        fn resize(&mut self, surface: Rect) {
            self.surface = surface;
            self.log
                .lock()
                .unwrap()
                .push(format!("resize {}x{}", surface.width, surface.height));
        }

        fn render(&self, _frame: &mut Frame, _area: Rect) {}

        fn destroy(&mut self) {
            self.log
                .lock()
                .unwrap()
                .push(format!("destroy {}", self.scene.label()));
        }
    }

    #[derive(Default)]
    struct FakeRenderer {
        log: Log,
    }

    impl FakeRenderer {
        fn events(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    impl BackdropRenderer for FakeRenderer {
        fn create(&self, config: &'static SceneConfig, surface: Rect) -> Box<dyn Backdrop> {
            self.log
                .lock()
                .unwrap()
                .push(format!("create {}", config.name));
            Box::new(FakeBackdrop {
                scene: config.kind,
                surface,
                log: Arc::clone(&self.log),
            })
        }
    }

    fn weather(description: &str) -> WeatherResult {
        WeatherResult {
            city: "Paris".into(),
            description: description.into(),
            ..Default::default()
        }
    }

    const SURFACE: Rect = Rect {
        x: 0,
        y: 0,
        width: 40,
        height: 12,
    };

    #[test]
    fn test_nothing_without_result() {
        let renderer = FakeRenderer::default();
        let mut scope = BackdropScope::new();

        scope.sync(None, 0, Some(SURFACE), &renderer);

        assert!(!scope.is_active());
        assert!(renderer.events().is_empty());
    }

    #[test]
    fn test_waits_for_surface() {
        let renderer = FakeRenderer::default();
        let mut scope = BackdropScope::new();
        let rain = weather("light rain");

        scope.sync(Some(&rain), 1, None, &renderer);
        scope.sync(Some(&rain), 1, Some(Rect::new(0, 0, 0, 5)), &renderer);
        assert!(renderer.events().is_empty());

        scope.sync(Some(&rain), 1, Some(SURFACE), &renderer);
        assert_eq!(renderer.events(), vec!["create rain"]);
        assert_eq!(scope.scene(), Some(SceneKind::Rain));
    }

    #[test]
    fn test_previous_destroyed_before_next_created() {
        let renderer = FakeRenderer::default();
        let mut scope = BackdropScope::new();

        scope.sync(Some(&weather("rain")), 1, Some(SURFACE), &renderer);
        scope.sync(Some(&weather("few clouds")), 2, Some(SURFACE), &renderer);

        assert_eq!(
            renderer.events(),
            vec!["create rain", "destroy rain", "create clouds"]
        );
        assert_eq!(scope.created(), 2);
        assert_eq!(scope.released(), 1);
    }

    #[test]
    fn test_same_revision_is_not_recreated() {
        let renderer = FakeRenderer::default();
        let mut scope = BackdropScope::new();
        let clear = weather("clear sky");

        scope.sync(Some(&clear), 3, Some(SURFACE), &renderer);
        scope.sync(Some(&clear), 3, Some(SURFACE), &renderer);
        scope.sync(Some(&clear), 3, Some(Rect::new(0, 0, 20, 6)), &renderer);

        assert_eq!(renderer.events(), vec!["create clear", "resize 20x6"]);
    }

    #[test]
    fn test_new_result_with_same_scene_is_recreated() {
        let renderer = FakeRenderer::default();
        let mut scope = BackdropScope::new();

        scope.sync(Some(&weather("rain")), 1, Some(SURFACE), &renderer);
        scope.sync(Some(&weather("rain")), 2, Some(SURFACE), &renderer);

        assert_eq!(
            renderer.events(),
            vec!["create rain", "destroy rain", "create rain"]
        );
    }

    #[test]
    fn test_cleared_result_releases_without_replacement() {
        let renderer = FakeRenderer::default();
        let mut scope = BackdropScope::new();

        scope.sync(Some(&weather("mist")), 1, Some(SURFACE), &renderer);
        scope.sync(None, 2, Some(SURFACE), &renderer);

        assert_eq!(renderer.events(), vec!["create ambient", "destroy ambient"]);
        assert!(!scope.is_active());
    }

    #[test]
    fn test_drop_releases_once() {
        let renderer = FakeRenderer::default();
        {
            let mut scope = BackdropScope::new();
            scope.sync(Some(&weather("rain")), 1, Some(SURFACE), &renderer);
            scope.release();
        }
        assert_eq!(renderer.events(), vec!["create rain", "destroy rain"]);

        {
            let mut scope = BackdropScope::new();
            scope.sync(Some(&weather("sunny")), 1, Some(SURFACE), &renderer);
        }
        assert_eq!(
            renderer.events(),
            vec!["create rain", "destroy rain", "create clear", "destroy clear"]
        );
    }

    #[test]
    fn test_still_backdrop_renders_inside_area() {
        let backdrop = ParticleBackdrop::new(&RAIN, Rect::new(0, 0, 30, 10));
        let mut harness = RenderHarness::new(40, 12);
        let area = Rect::new(5, 1, 30, 10);

        let buf = harness.render(|frame| backdrop.render(frame, area)).clone();

        let mut drawn = 0;
        for y in 0..12 {
            for x in 0..40 {
                let cell = &buf[(x, y)];
                if cell.symbol() != " " {
                    assert!(area.contains((x, y).into()), "glyph outside area at {x},{y}");
                    drawn += 1;
                }
            }
        }
        assert!(drawn > 0);
        assert!(drawn <= backdrop.particle_count());
        assert_eq!(buf[(5, 1)].bg, RAIN.background);
    }

    #[test]
    fn test_still_backdrop_is_deterministic() {
        let a = ParticleBackdrop::new(&CLEAR, SURFACE);
        let b = ParticleBackdrop::new(&CLEAR, SURFACE);
        let mut harness = RenderHarness::new(40, 12);

        let first = harness.render(|frame| a.render(frame, SURFACE)).clone();
        let second = harness.render(|frame| b.render(frame, SURFACE)).clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut backdrop = ParticleBackdrop::new(&RAIN, SURFACE);
        backdrop.destroy();
        backdrop.destroy();
        assert!(!backdrop.is_animating());

        let mut harness = RenderHarness::new(40, 12);
        let output = harness.render_to_string_plain(|frame| backdrop.render(frame, SURFACE));
        assert!(output.trim().is_empty());
    }

    #[tokio::test]
    async fn test_animation_emits_frames_until_destroyed() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let renderer = AnimatedRenderer::new(tx);
        let mut backdrop = renderer.create(&RAIN, SURFACE);

        let first = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert_eq!(first.ok().flatten(), Some(Action::BackdropFrame));

        backdrop.destroy();
        tokio::time::sleep(RAIN.frame_interval * 2).await;
        while rx.try_recv().is_ok() {}

        tokio::time::sleep(RAIN.frame_interval * 3).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_animation_advances_frame_counter() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let backdrop = ParticleBackdrop::new(&RAIN, SURFACE).animate(tx);
        assert!(backdrop.is_animating());

        rx.recv().await;
        rx.recv().await;
        assert!(backdrop.frame() >= 2);
    }
}
