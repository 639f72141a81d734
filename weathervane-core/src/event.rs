//! Terminal events and the crossterm polling task

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Event as read from crossterm, before filtering
#[derive(Debug)]
pub enum RawEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Event handed to components
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Key press (releases and repeats are filtered out)
    Key(KeyEvent),
    /// Terminal resized to (columns, rows)
    Resize(u16, u16),
}

/// Spawn a task that polls crossterm and forwards events until cancelled
///
/// `poll_timeout` bounds each `crossterm::event::poll` call, `loop_sleep` is the
/// pause between polling rounds.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("event poller cancelled");
                    // Leave nothing behind for the shell
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut processed = 0;
                    while processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        processed += 1;
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) => RawEvent::Key(key),
                            Ok(event::Event::Resize(w, h)) => RawEvent::Resize(w, h),
                            _ => continue,
                        };
                        if tx.send(raw).is_err() {
                            debug!("event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Turn a raw event into something components handle
///
/// Returns `None` for key releases and repeats, which some terminals report
/// alongside the press.
pub fn process_raw_event(raw: RawEvent) -> Option<EventKind> {
    match raw {
        RawEvent::Key(key) if key.kind == KeyEventKind::Press => Some(EventKind::Key(key)),
        RawEvent::Key(_) => None,
        RawEvent::Resize(w, h) => Some(EventKind::Resize(w, h)),
    }
}
