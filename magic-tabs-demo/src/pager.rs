//! A stand-in for a horizontally paged view.
//!
//! It reports the same two events a real pager does: the page it is settling
//! on, and a `(position, offset)` pair for every frame of the scroll.

use std::time::{Duration, Instant};

use magic_tabs::{Easing, FrameTicker, animation::AnimatedValue};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PagerEvent {
    Selected(usize),
    Scrolled { position: usize, offset: f32 },
}

pub struct Pager {
    page_count: usize,
    current: usize,
    scroll: AnimatedValue,
    duration: Duration,
    ticker: FrameTicker,
}

impl Pager {
    pub fn new(page_count: usize, duration: Duration, ticker: FrameTicker) -> Self {
        Self {
            page_count,
            current: 0,
            scroll: AnimatedValue::new(0.0),
            duration,
            ticker,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Starts scrolling to `page`.
    pub fn set_current(&mut self, page: usize, now: Instant) -> Option<PagerEvent> {
        if page >= self.page_count || page == self.current {
            return None;
        }
        debug!(from = self.current, to = page, "pager scrolling");
        self.current = page;
        self.scroll.animate_to(
            page as f32,
            now,
            self.duration,
            Easing::EaseInOutCubic,
            &self.ticker,
        );
        Some(PagerEvent::Selected(page))
    }

    pub fn tick(&mut self, now: Instant) -> Option<PagerEvent> {
        if !self.scroll.is_running() {
            return None;
        }
        self.scroll.tick(now);
        let value = self.scroll.value().max(0.0);
        Some(PagerEvent::Scrolled {
            position: value.floor() as usize,
            offset: value.fract(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_reports_positions_until_settled() {
        let ticker = FrameTicker::new();
        let mut pager = Pager::new(4, Duration::from_millis(100), ticker.clone());
        let start = Instant::now();

        assert_eq!(pager.set_current(2, start), Some(PagerEvent::Selected(2)));
        assert_eq!(pager.set_current(2, start), None);
        assert_eq!(pager.set_current(9, start), None);

        // a quarter of the way in, ease-in-out cubic has covered 1/16
        match pager.tick(start + Duration::from_millis(25)) {
            Some(PagerEvent::Scrolled { position, offset }) => {
                assert_eq!(position, 0);
                assert!((offset - 0.125).abs() < 1e-3);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            pager.tick(start + Duration::from_millis(100)),
            Some(PagerEvent::Scrolled {
                position: 2,
                offset: 0.0
            })
        );
        assert_eq!(pager.tick(start + Duration::from_millis(120)), None);
        assert!(!ticker.is_active());
    }
}
