//! sources of ticks and terminal input.

use {
    crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    futures::StreamExt,
    std::{io, time::Duration},
    tokio::time::{self, Instant, Interval, MissedTickBehavior},
};

/// a terminal input event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Input {
    /// a character key was pressed.
    Char(char),
    /// the interrupt chord (ctrl-c) was pressed.
    Interrupt,
    /// anything else: other keys, mouse events, resizes, focus changes.
    Other,
}

/// a repeating timer.
pub trait Ticker {
    /// waits for the next tick.
    ///
    /// this must be cancel-safe.
    fn tick(&mut self) -> impl Future<Output = ()>;
}

/// a stream of terminal input.
pub trait Events {
    /// waits for the next input event, or `None` if input has ended.
    ///
    /// this must be cancel-safe.
    fn next(&mut self) -> impl Future<Output = Option<io::Result<Input>>>;
}

/// ticks at a fixed period, independent of how long each tick's work takes.
///
/// ticks that fall due while the previous tick is still being handled are skipped, rather than
/// delivered in a burst.
pub struct IntervalTicker {
    interval: Interval,
}

/// input read from the terminal.
pub struct TerminalEvents {
    stream: EventStream,
}

// === impl Input ===

impl Input {
    /// returns true if this input should quit the application.
    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Char('q') | Self::Interrupt)
    }
}

impl From<Event> for Input {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Self::Interrupt,
                KeyCode::Char(c) if modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
                    Self::Char(c)
                }
                _ => Self::Other,
            },
            _ => Self::Other,
        }
    }
}

// === impl IntervalTicker ===

impl IntervalTicker {
    /// the refresh period.
    pub const PERIOD: Duration = Duration::from_secs(1);

    /// returns a ticker whose first tick is one period from now.
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(Self::PERIOD)
    }
}

impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

// === impl TerminalEvents ===

impl TerminalEvents {
    pub fn new() -> Self {
        Self {
            stream: EventStream::new(),
        }
    }
}

impl Default for TerminalEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl Events for TerminalEvents {
    async fn next(&mut self) -> Option<io::Result<Input>> {
        let Self { stream } = self;
        stream.next().await.map(|event| event.map(Input::from))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn q_quits() {
        let input = Input::from(key(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(input, Input::Char('q'));
        assert!(input.is_quit());
    }

    #[test]
    fn ctrl_c_interrupts() {
        let input = Input::from(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(input, Input::Interrupt);
        assert!(input.is_quit());
    }

    #[test]
    fn other_keys_do_not_quit() {
        for event in [
            key(KeyCode::Char('c'), KeyModifiers::NONE),
            key(KeyCode::Char('Q'), KeyModifiers::SHIFT),
            key(KeyCode::Char('q'), KeyModifiers::CONTROL),
            key(KeyCode::Char('q'), KeyModifiers::ALT),
            key(KeyCode::Char('q'), KeyModifiers::SUPER),
            key(KeyCode::Char('q'), KeyModifiers::META),
            key(KeyCode::Esc, KeyModifiers::NONE),
            Event::Resize(80, 24),
            Event::FocusGained,
        ] {
            assert!(!Input::from(event).is_quit());
        }
    }

    #[test]
    fn modified_chars_are_other_input() {
        let alt_q = Input::from(key(KeyCode::Char('q'), KeyModifiers::ALT));
        assert_eq!(alt_q, Input::Other);

        let shifted = Input::from(key(KeyCode::Char('Q'), KeyModifiers::SHIFT));
        assert_eq!(shifted, Input::Char('Q'));
    }

    #[test]
    fn key_releases_are_ignored() {
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(Input::from(Event::Key(release)), Input::Other);
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_is_one_period_away() {
        let start = Instant::now();
        let mut ticker = IntervalTicker::default();
        ticker.tick().await;
        assert_eq!(start.elapsed(), IntervalTicker::PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn late_ticks_are_skipped() {
        let mut ticker = IntervalTicker::new(Duration::from_secs(1));

        // simulate a slow draw, spanning several periods.
        time::advance(Duration::from_millis(3_500)).await;

        // the overdue tick fires at once...
        let start = Instant::now();
        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        // ...and the missed ones are dropped, resuming on the period boundary.
        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }
}
