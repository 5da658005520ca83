use std::time::Instant;

use tracing::trace;

use super::{TabBar, TabBarLayout};

/// Maps a tap at `(x, y)` to the unselected tab under it.
///
/// Taps on the selected slot, in the padding or outside the bar hit nothing.
pub(super) fn hit_test(layout: &TabBarLayout, selected: usize, x: f32, y: f32) -> Option<usize> {
    if !(0.0..layout.height).contains(&y) {
        return None;
    }
    let x = x - layout.padding_start;
    if !(0.0..layout.valid_width).contains(&x) {
        return None;
    }

    let select_start = layout.cursor_offset_for(selected);
    let select_end = select_start + layout.select_width;
    let index = if x < select_start {
        (x / layout.normal_width) as usize
    } else if x >= select_end {
        ((x - layout.select_width) / layout.normal_width) as usize + 1
    } else {
        return None;
    };

    (index < layout.title_count && index != selected).then_some(index)
}

impl TabBar {
    /// The tab a tap at `(x, y)` would select, if any.
    pub fn resolve_tap(&self, x: f32, y: f32) -> Option<usize> {
        let layout = self.layout_metrics()?;
        hit_test(&layout, self.selected?, x, y)
    }

    /// Selects whatever tab sits under a tap at `(x, y)`.
    pub fn tap(&mut self, x: f32, y: f32) -> bool {
        self.tap_at(x, y, Instant::now())
    }

    pub fn tap_at(&mut self, x: f32, y: f32, now: Instant) -> bool {
        match self.resolve_tap(x, y) {
            Some(index) => self.select_at(index, now),
            None => {
                trace!(x, y, "tap hit no tab");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use crate::{Density, FrameTicker, Size, TabBar, TabBarArgs, Title, units::Dp};

    fn bar(padding: f32) -> TabBar {
        let args = TabBarArgs {
            padding_start: Dp(padding),
            padding_end: Dp(padding),
            ..Default::default()
        };
        let mut bar = TabBar::new(args, Density::IDENTITY, FrameTicker::new()).unwrap();
        let titles: Vec<_> = (0..5).map(|i| Title::new(format!("{i}"), format!("#{i}"))).collect();
        bar.set_titles(&titles);
        bar.layout(Size::new(500.0, 40.0));
        bar
    }

    #[test]
    fn test_tap_maps_to_slot() {
        let mut bar = bar(0.0);
        let now = Instant::now();
        assert!(bar.select_at(2, now));

        // normal 96.2, selected slot spans 192.4..307.6
        assert_eq!(bar.resolve_tap(10.0, 20.0), Some(0));
        assert_eq!(bar.resolve_tap(150.0, 20.0), Some(1));
        assert_eq!(bar.resolve_tap(250.0, 20.0), None);
        assert_eq!(bar.resolve_tap(310.0, 20.0), Some(3));
        assert_eq!(bar.resolve_tap(499.0, 39.0), Some(4));
    }

    #[test]
    fn test_tap_outside_the_bar_hits_nothing() {
        let bar = bar(10.0);
        assert_eq!(bar.resolve_tap(5.0, 20.0), None);
        assert_eq!(bar.resolve_tap(495.0, 20.0), None);
        assert_eq!(bar.resolve_tap(200.0, -1.0), None);
        assert_eq!(bar.resolve_tap(200.0, 40.0), None);
        assert_eq!(bar.resolve_tap(200.0, 20.0), Some(1));
    }

    #[test]
    fn test_tap_selects() {
        let mut bar = bar(0.0);
        let now = Instant::now();
        assert!(bar.tap_at(480.0, 10.0, now));
        assert_eq!(bar.selected_index(), Some(4));
        assert!(!bar.tap_at(480.0, 10.0, now));
    }
}
