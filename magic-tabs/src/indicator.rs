//! A row of dashes with a cursor that stretches between neighbours as a pager
//! scrolls.
//!
//! The indicator keeps no animation of its own: it is a pure function of the
//! last `(position, offset)` pair reported by [`PageIndicator::on_scroll`].
//! During the first half of a page transition the cursor grows towards the
//! next dash; during the second half its trailing edge catches up. Scrolling
//! past the last page wraps the cursor back to the first dash.

use derive_builder::Builder;
use tracing::{debug, trace, warn};

use crate::{
    color::Color,
    constraint::Constraint,
    error::{ConfigError, check_length, check_positive},
    geometry::{Rect, Size},
    surface::DrawSurface,
    units::{Density, Dp},
};

/// Arguments for [`PageIndicator`].
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(pattern = "owned")]
pub struct PageIndicatorArgs {
    /// Fill of the resting dashes.
    #[builder(default = "Color::from_argb_u8(50, 255, 255, 255)")]
    pub normal_color: Color,
    #[builder(default = "Color::WHITE")]
    pub cursor_color: Color,
    /// Space between two dashes.
    #[builder(default = "Dp(8.0)")]
    pub gap: Dp,
    #[builder(default = "Dp(20.0)")]
    pub dash_width: Dp,
    #[builder(default = "Dp(26.0)")]
    pub cursor_width: Dp,
    /// Height of dashes and cursor, also the wrap height.
    #[builder(default = "Dp(5.0)")]
    pub item_height: Dp,
}

impl Default for PageIndicatorArgs {
    fn default() -> Self {
        PageIndicatorArgsBuilder::default()
            .build()
            .expect("builder construction failed")
    }
}

impl PageIndicatorArgs {
    fn resolve(&self, density: Density) -> Result<ResolvedIndicatorStyle, ConfigError> {
        Ok(ResolvedIndicatorStyle {
            normal_color: self.normal_color,
            cursor_color: self.cursor_color,
            gap: check_length("gap", self.gap.to_px(density))?,
            dash_width: check_positive("dash_width", self.dash_width.to_px(density))?,
            cursor_width: check_positive("cursor_width", self.cursor_width.to_px(density))?,
            item_height: check_positive("item_height", self.item_height.to_px(density))?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ResolvedIndicatorStyle {
    normal_color: Color,
    cursor_color: Color,
    gap: f32,
    dash_width: f32,
    cursor_width: f32,
    item_height: f32,
}

/// Largest offset kept by [`PageIndicator::on_scroll`].
const MAX_OFFSET: f32 = 1.0 - f32::EPSILON;

/// Scroll-linked page indicator.
#[derive(Debug)]
pub struct PageIndicator {
    style: ResolvedIndicatorStyle,
    count: usize,
    current_page: usize,
    scroll_position: usize,
    scroll_offset: f32,
    size: Size,
    dirty: bool,
}

impl PageIndicator {
    pub fn new(args: PageIndicatorArgs, density: Density) -> Result<Self, ConfigError> {
        Ok(Self {
            style: args
                .resolve(density)
                .inspect_err(|err| warn!(%err, "rejected page indicator configuration"))?,
            count: 0,
            current_page: 0,
            scroll_position: 0,
            scroll_offset: 0.0,
            size: Size::ZERO,
            dirty: true,
        })
    }

    /// Sets how many dashes are drawn.
    pub fn set_count(&mut self, count: usize) {
        if self.count != count {
            debug!(count, "page indicator count set");
            self.count = count;
            self.dirty = true;
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Reports the pager's scroll state: `position` is the page at the left
    /// edge and `offset` how far the next page has scrolled in.
    ///
    /// Offsets that are not finite or negative count as zero; offsets of one
    /// or more are kept just below one. An offset of zero marks `position` as
    /// the settled page.
    pub fn on_scroll(&mut self, position: usize, offset: f32) {
        let offset = if offset.is_finite() && offset > 0.0 {
            offset.min(MAX_OFFSET)
        } else {
            0.0
        };

        self.scroll_position = position;
        self.scroll_offset = offset;
        if offset == 0.0 {
            self.current_page = position;
        }
        self.dirty = true;
        trace!(position, offset, "page scrolled");
    }

    /// The last page the pager settled on.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn scroll_position(&self) -> usize {
        self.scroll_position
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Whether the pager is between two pages.
    pub fn is_tracking(&self) -> bool {
        self.scroll_offset > 0.0
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// The width is taken as given; an `AtMost` height collapses to the item
    /// height.
    pub fn measure(&self, width: Constraint, height: Constraint) -> Size {
        Size::new(width.size(), height.resolve(self.style.item_height))
    }

    pub fn layout(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.dirty = true;
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Width of all dashes plus the gaps between them.
    pub fn items_width(&self) -> f32 {
        match self.count {
            0 => 0.0,
            n => n as f32 * self.style.dash_width + (n - 1) as f32 * self.style.gap,
        }
    }

    /// Left edge of the first dash, centring the row in the measured width.
    pub fn start_x(&self) -> f32 {
        self.size.width / 2.0 - self.items_width() / 2.0
    }

    /// Rectangle of dash `index`.
    pub fn dash_rect(&self, index: usize) -> Rect {
        let left = self.start_x() + (self.style.dash_width + self.style.gap) * index as f32;
        Rect::from_origin_size(left, 0.0, self.style.dash_width, self.style.item_height)
    }

    /// Where the cursor rests when the pager is settled on page `index`.
    pub fn cursor_slot(&self, index: usize) -> Rect {
        let dash = self.dash_rect(index);
        let inset = (self.style.cursor_width - self.style.dash_width) / 2.0;
        Rect::new(dash.left - inset, 0.0, dash.right + inset, self.style.item_height)
    }

    /// The cursor for the current scroll state, or `None` without dashes.
    pub fn cursor_rect(&self) -> Option<Rect> {
        let last = self.count.checked_sub(1)?;
        let position = self.scroll_position.min(last);
        let wraps = position >= last;

        let current = self.cursor_slot(position);
        let next = if wraps {
            self.cursor_slot(0)
        } else {
            self.cursor_slot(position + 1)
        };

        let offset = self.scroll_offset;
        let (left, right) = if offset <= 0.5 {
            let t = offset / 0.5;
            if wraps {
                (current.left - t * (current.left - next.left), current.right)
            } else {
                (current.left, current.right + t * (next.right - current.right))
            }
        } else {
            let t = (offset - 0.5) / 0.5;
            if wraps {
                (next.left, current.right - t * (current.right - next.right))
            } else {
                (current.left + t * (next.left - current.left), next.right)
            }
        };

        Some(Rect::new(left, 0.0, right, self.style.item_height))
    }

    /// Paints the dashes, then the cursor over them.
    pub fn render(&mut self, surface: &mut dyn DrawSurface) {
        self.dirty = false;
        let Some(cursor) = self.cursor_rect() else {
            return;
        };

        let radius = self.style.item_height / 2.0;
        for index in 0..self.count {
            surface.fill_round_rect(self.dash_rect(index), radius, self.style.normal_color);
        }
        surface.fill_round_rect(cursor, radius, self.style.cursor_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CommandRecorder;

    fn indicator(count: usize) -> PageIndicator {
        let mut indicator = PageIndicator::new(PageIndicatorArgs::default(), Density::IDENTITY).unwrap();
        indicator.set_count(count);
        indicator.layout(Size::new(400.0, 5.0));
        indicator
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_row_is_centered() {
        let indicator = indicator(5);
        // 5 * 20 + 4 * 8 = 132
        assert_eq!(indicator.items_width(), 132.0);
        assert_eq!(indicator.start_x(), 134.0);
        assert_eq!(indicator.dash_rect(0), Rect::new(134.0, 0.0, 154.0, 5.0));
        assert_eq!(indicator.dash_rect(4).right, 266.0);
    }

    #[test]
    fn test_settled_cursor_matches_slot() {
        let mut indicator = indicator(5);
        for page in 0..5 {
            indicator.on_scroll(page, 0.0);
            assert_eq!(indicator.cursor_rect(), Some(indicator.cursor_slot(page)));
            assert_eq!(indicator.current_page(), page);
        }
    }

    #[test]
    fn test_settled_cursor_equals_dash_when_widths_match() {
        let args = PageIndicatorArgs {
            cursor_width: Dp(20.0),
            ..Default::default()
        };
        let mut indicator = PageIndicator::new(args, Density::IDENTITY).unwrap();
        indicator.set_count(3);
        indicator.layout(Size::new(200.0, 5.0));
        indicator.on_scroll(1, 0.0);
        assert_eq!(indicator.cursor_rect(), Some(indicator.dash_rect(1)));
    }

    #[test]
    fn test_two_phase_stretch() {
        let mut indicator = indicator(5);
        let current = indicator.cursor_slot(2);
        let next = indicator.cursor_slot(3);

        indicator.on_scroll(2, 0.3);
        let cursor = indicator.cursor_rect().unwrap();
        assert_close(cursor.left, current.left);
        assert_close(cursor.right, current.right + 0.6 * (next.right - current.right));
        assert_eq!(indicator.current_page(), 0);
        assert!(indicator.is_tracking());

        indicator.on_scroll(2, 0.7);
        let cursor = indicator.cursor_rect().unwrap();
        assert_close(cursor.left, current.left + 0.4 * (next.left - current.left));
        assert_close(cursor.right, next.right);
    }

    #[test]
    fn test_last_page_wraps_to_first_dash() {
        let mut indicator = indicator(4);
        let first = indicator.cursor_slot(0);
        let last = indicator.cursor_slot(3);

        for offset in [0.0, 0.2, 0.5, 0.8, 0.999] {
            indicator.on_scroll(3, offset);
            let cursor = indicator.cursor_rect().unwrap();
            assert!(cursor.left >= first.left - 1e-3, "{offset}: {cursor:?}");
            assert!(cursor.right <= last.right + 1e-3, "{offset}: {cursor:?}");
        }

        indicator.on_scroll(3, 0.25);
        let cursor = indicator.cursor_rect().unwrap();
        assert_close(cursor.left, last.left - 0.5 * (last.left - first.left));
        assert_close(cursor.right, last.right);

        indicator.on_scroll(3, 0.75);
        let cursor = indicator.cursor_rect().unwrap();
        assert_close(cursor.left, first.left);
        assert_close(cursor.right, last.right - 0.5 * (last.right - first.right));
    }

    #[test]
    fn test_position_past_the_end_is_clamped() {
        let mut indicator = indicator(3);
        indicator.on_scroll(7, 0.0);
        assert_eq!(indicator.cursor_rect(), Some(indicator.cursor_slot(2)));
    }

    #[test]
    fn test_offsets_are_sanitized() {
        let mut indicator = indicator(3);
        indicator.on_scroll(1, f32::NAN);
        assert_eq!(indicator.scroll_offset(), 0.0);
        assert_eq!(indicator.current_page(), 1);

        indicator.on_scroll(0, -0.4);
        assert_eq!(indicator.scroll_offset(), 0.0);
        assert_eq!(indicator.current_page(), 0);

        indicator.on_scroll(0, 1.5);
        assert!(indicator.scroll_offset() < 1.0);
        assert!(indicator.scroll_offset() > 0.99);
        assert_eq!(indicator.current_page(), 0);
    }

    #[test]
    fn test_no_dashes_draws_nothing() {
        let mut indicator = indicator(0);
        indicator.on_scroll(0, 0.4);
        assert_eq!(indicator.items_width(), 0.0);
        assert_eq!(indicator.cursor_rect(), None);

        let mut recorder = CommandRecorder::new();
        indicator.render(&mut recorder);
        assert!(recorder.commands().is_empty());
        assert!(!indicator.needs_redraw());
    }

    #[test]
    fn test_single_dash_keeps_cursor_in_place() {
        let mut indicator = indicator(1);
        let slot = indicator.cursor_slot(0);
        for offset in [0.0, 0.3, 0.7] {
            indicator.on_scroll(0, offset);
            assert_eq!(indicator.cursor_rect(), Some(slot));
        }
    }

    #[test]
    fn test_render_draws_dashes_then_cursor() {
        let mut indicator = indicator(3);
        indicator.on_scroll(1, 0.0);
        let mut recorder = CommandRecorder::new();
        indicator.render(&mut recorder);

        let rects = recorder.round_rects();
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[1], (indicator.dash_rect(1), Color::from_argb_u8(50, 255, 255, 255)));
        assert_eq!(rects[3], (indicator.cursor_slot(1), Color::WHITE));
    }

    #[test]
    fn test_measure_wraps_to_item_height() {
        let indicator = PageIndicator::new(PageIndicatorArgs::default(), Density::new(3.0, 1.0)).unwrap();
        assert_eq!(
            indicator.measure(Constraint::Exactly(200.0), Constraint::AtMost(50.0)),
            Size::new(200.0, 15.0)
        );
    }

    #[test]
    fn test_zero_dash_width_is_rejected() {
        let args = PageIndicatorArgsBuilder::default()
            .dash_width(Dp(0.0))
            .build()
            .unwrap();
        assert!(matches!(
            PageIndicator::new(args, Density::IDENTITY),
            Err(ConfigError::ZeroDimension { field: "dash_width" })
        ));
    }
}
