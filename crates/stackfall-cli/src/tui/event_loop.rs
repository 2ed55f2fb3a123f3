use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Returns the next event via `next()`. The screen is redrawn after every
/// tick or terminal event; without a tick interval only terminal events are
/// waited for.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the tick interval. Pass `None` to stop ticking.
    ///
    /// When ticking resumes, the first tick fires a full interval later.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval.is_none() && interval.is_some() {
            self.last_tick = Instant::now();
        }
        self.tick_interval = interval;
    }

    pub(super) fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    /// Blocks until the tick interval elapses, a render is due or a
    /// crossterm event arrives.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.last_tick + self.tick_interval?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_timeout_without_ticks() {
        let events = EventLoop::new();
        assert_eq!(events.compute_timeout(Instant::now()), None);
    }

    #[test]
    fn test_resuming_ticks_restarts_interval() {
        let mut events = EventLoop::new();
        events.last_tick = Instant::now().checked_sub(Duration::from_secs(10)).unwrap();

        events.set_tick_interval(Some(Duration::from_secs(1)));
        let timeout = events.compute_timeout(Instant::now()).unwrap();
        assert!(timeout > Duration::from_millis(500));

        // Changing the interval while ticking keeps the tick phase.
        let last_tick = events.last_tick;
        events.set_tick_interval(Some(Duration::from_millis(400)));
        assert_eq!(events.last_tick, last_tick);
        assert_eq!(events.tick_interval(), Some(Duration::from_millis(400)));
    }

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new();
        assert!(events.next().unwrap().is_render());
    }
}
