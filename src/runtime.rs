use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent};

/// Sampling interval for elapsed-time updates.
pub const TICK_RATE_MS: u64 = 500;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Map a crossterm key code to the key identifier string the session
/// consumes: the character itself for printable keys (space included),
/// a name for everything else. Named keys other than the cancellation
/// key end up ignored by the engine.
pub fn key_descriptor(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(c) => Some(c.to_string()),
        KeyCode::Esc => Some("Escape".to_string()),
        KeyCode::Backspace => Some("Backspace".to_string()),
        KeyCode::Enter => Some("Enter".to_string()),
        KeyCode::Tab => Some("Tab".to_string()),
        KeyCode::Left => Some("ArrowLeft".to_string()),
        KeyCode::Right => Some("ArrowRight".to_string()),
        KeyCode::Up => Some("ArrowUp".to_string()),
        KeyCode::Down => Some("ArrowDown".to_string()),
        _ => None,
    }
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait InputEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError>;
}

/// Production event source backed by a crossterm reader thread plus a tick
/// thread feeding the same channel, so ticks keep arriving at the sampling
/// cadence even while keystrokes come in faster than the interval.
pub struct CrosstermEventSource {
    rx: Receiver<InputEvent>,
}

impl CrosstermEventSource {
    pub fn new(tick_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let tick_tx = tx.clone();
        std::thread::spawn(move || loop {
            if tick_tx.send(InputEvent::Tick).is_err() {
                break;
            }
            std::thread::sleep(tick_interval);
        });

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(InputEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(InputEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl InputEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for headless tests
pub struct TestEventSource {
    rx: Receiver<InputEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<InputEvent>) -> Self {
        Self { rx }
    }
}

impl InputEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

/// Advances the application one event at a time, synthesizing a `Tick`
/// whenever the tick interval passes without input.
pub struct Runner<E: InputEventSource> {
    event_source: E,
    ticker: FixedTicker,
}

impl<E: InputEventSource> Runner<E> {
    pub fn new(event_source: E, ticker: FixedTicker) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    pub fn step(&self) -> InputEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                InputEvent::Tick
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(1)));

        match runner.step() {
            InputEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(InputEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(10)));

        match runner.step() {
            InputEvent::Resize => {}
            _ => panic!("expected Resize event"),
        }
    }

    #[test]
    fn descriptor_for_printable_keys() {
        assert_eq!(key_descriptor(KeyCode::Char('a')), Some("a".to_string()));
        assert_eq!(key_descriptor(KeyCode::Char(' ')), Some(" ".to_string()));
        assert_eq!(key_descriptor(KeyCode::Char('ñ')), Some("ñ".to_string()));
    }

    #[test]
    fn descriptor_for_named_keys() {
        assert_eq!(key_descriptor(KeyCode::Esc), Some("Escape".to_string()));
        assert_eq!(
            key_descriptor(KeyCode::Backspace),
            Some("Backspace".to_string())
        );
        assert_eq!(key_descriptor(KeyCode::F(1)), None);
    }
}
