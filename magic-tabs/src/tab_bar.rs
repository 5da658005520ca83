//! A tab bar whose selected tab is a notch cut out of the background.
//!
//! ## Usage
//!
//! Build a [`TabBar`] from [`TabBarArgs`], hand it titles, then drive it from
//! the host's frame loop: call [`TabBar::tick`] while
//! [`TabBar::is_animating`] is true and [`TabBar::render`] whenever
//! [`TabBar::needs_redraw`] reports a change.
//!
//! Selecting a tab slides the cutout to the new slot. A selection made while
//! the cursor is still moving retargets from wherever the cursor is, so the
//! motion never jumps.

mod interaction;
mod layout;
mod render;

use std::time::{Duration, Instant};

use derive_builder::Builder;
use tracing::{debug, trace, warn};

pub use layout::{CutoutOutline, TabBarLayout};

use crate::{
    animation::{AnimatedValue, Easing},
    bitmap::{Bitmap, RoundedBitmapCache},
    color::Color,
    constraint::Constraint,
    error::{ConfigError, check_length},
    frame::FrameTicker,
    geometry::Size,
    text::{ApproximateTextMeasure, TextMeasure},
    title::{LabelPlacement, LabelStyle, Title, place_normal_label, place_selected_label},
    units::{Density, Dp, Sp},
};

/// Arguments for [`TabBar`].
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(pattern = "owned")]
pub struct TabBarArgs {
    /// Fill of the bar around the cutout.
    #[builder(default = "Color::WHITE")]
    pub background_color: Color,
    /// Colour of unselected labels.
    #[builder(default = "Color::GRAY")]
    pub normal_text_color: Color,
    /// Colour of the selected label.
    #[builder(default = "Color::WHITE")]
    pub selected_text_color: Color,
    #[builder(default = "Sp(14.0)")]
    pub normal_text_size: Sp,
    #[builder(default = "Sp(14.0)")]
    pub selected_text_size: Sp,
    /// Inset of the selected-tab bitmap inside the cutout.
    #[builder(default = "Dp(2.0)")]
    pub gap: Dp,
    /// Radius of the two arcs at the top of the cutout.
    #[builder(default = "Dp(5.0)")]
    pub top_radius: Dp,
    /// Radius of the two arcs where the cutout meets the background edge.
    #[builder(default = "Dp(10.0)")]
    pub bottom_radius: Dp,
    /// Strip below the painted background, left uncovered.
    #[builder(default = "Dp(6.0)")]
    pub bottom_space: Dp,
    #[builder(default = "Dp(0.0)")]
    pub padding_start: Dp,
    #[builder(default = "Dp(0.0)")]
    pub padding_end: Dp,
    /// Space between the title icon and the selected label.
    #[builder(default = "Dp(2.0)")]
    pub icon_padding: Dp,
    /// Height used when the host leaves the height up to the bar.
    #[builder(default = "Dp(40.0)")]
    pub wrap_height: Dp,
    /// How long the cursor takes to reach a newly selected slot.
    #[builder(default = "Duration::from_millis(300)")]
    pub translate_duration: Duration,
    /// How long the selected label takes to grow in.
    #[builder(default = "Duration::from_millis(500)")]
    pub scale_duration: Duration,
    #[builder(default)]
    pub easing: Easing,
    /// Grow the selected label from nothing on every selection change.
    #[builder(default = "false")]
    pub scale_reveal: bool,
    /// Image drawn inside the cutout.
    #[builder(default, setter(strip_option))]
    pub select_bitmap: Option<Bitmap>,
    /// Icon drawn before the selected label.
    #[builder(default, setter(strip_option))]
    pub title_icon: Option<Bitmap>,
}

impl Default for TabBarArgs {
    fn default() -> Self {
        TabBarArgsBuilder::default()
            .build()
            .expect("builder construction failed")
    }
}

impl TabBarArgs {
    /// Converts every length to pixels and checks it.
    pub(crate) fn resolve(&self, density: Density) -> Result<ResolvedTabBarStyle, ConfigError> {
        Ok(ResolvedTabBarStyle {
            background_color: self.background_color,
            normal_text_color: self.normal_text_color,
            selected_text_color: self.selected_text_color,
            normal_text_size: check_length("normal_text_size", self.normal_text_size.to_px(density))?,
            selected_text_size: check_length(
                "selected_text_size",
                self.selected_text_size.to_px(density),
            )?,
            gap: check_length("gap", self.gap.to_px(density))?,
            top_radius: check_length("top_radius", self.top_radius.to_px(density))?,
            bottom_radius: check_length("bottom_radius", self.bottom_radius.to_px(density))?,
            bottom_space: check_length("bottom_space", self.bottom_space.to_px(density))?,
            padding_start: check_length("padding_start", self.padding_start.to_px(density))?,
            padding_end: check_length("padding_end", self.padding_end.to_px(density))?,
            icon_padding: check_length("icon_padding", self.icon_padding.to_px(density))?,
            wrap_height: check_length("wrap_height", self.wrap_height.to_px(density))?,
        })
    }
}

/// [`TabBarArgs`] lengths in pixels.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedTabBarStyle {
    pub background_color: Color,
    pub normal_text_color: Color,
    pub selected_text_color: Color,
    pub normal_text_size: f32,
    pub selected_text_size: f32,
    pub gap: f32,
    pub top_radius: f32,
    pub bottom_radius: f32,
    pub bottom_space: f32,
    pub padding_start: f32,
    pub padding_end: f32,
    pub icon_padding: f32,
    pub wrap_height: f32,
}

impl ResolvedTabBarStyle {
    pub fn background_height(&self, height: f32) -> f32 {
        (height - self.bottom_space).max(0.0)
    }
}

/// Cutout-cursor tab bar.
///
/// The cursor position is animated in slot units (`0.0` is the first tab,
/// `1.0` the second, ...), so a resize mid-animation keeps the cursor at the
/// same relative place.
pub struct TabBar {
    style: ResolvedTabBarStyle,
    translate_duration: Duration,
    scale_duration: Duration,
    easing: Easing,
    scale_reveal: bool,
    select_bitmap: Option<Bitmap>,
    title_icon: Option<Bitmap>,
    titles: Vec<Title>,
    selected: Option<usize>,
    cursor: AnimatedValue,
    reveal: AnimatedValue,
    size: Size,
    ticker: FrameTicker,
    rounded: RoundedBitmapCache,
    text_measure: Box<dyn TextMeasure>,
    on_select_change: Option<Box<dyn FnMut(usize)>>,
    dirty: bool,
}

impl TabBar {
    pub fn new(args: TabBarArgs, density: Density, ticker: FrameTicker) -> Result<Self, ConfigError> {
        let style = args
            .resolve(density)
            .inspect_err(|err| warn!(%err, "rejected tab bar configuration"))?;
        Ok(Self {
            style,
            translate_duration: args.translate_duration,
            scale_duration: args.scale_duration,
            easing: args.easing,
            scale_reveal: args.scale_reveal,
            select_bitmap: args.select_bitmap,
            title_icon: args.title_icon,
            titles: Vec::new(),
            selected: None,
            cursor: AnimatedValue::new(0.0),
            reveal: AnimatedValue::new(1.0),
            size: Size::ZERO,
            ticker,
            rounded: RoundedBitmapCache::new(),
            text_measure: Box::new(ApproximateTextMeasure::default()),
            on_select_change: None,
            dirty: true,
        })
    }

    /// Replaces the text measurement used for label placement.
    pub fn with_text_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.text_measure = Box::new(measure);
        self.dirty = true;
        self
    }

    /// Registers the listener told about every accepted selection change.
    pub fn set_on_select_change(&mut self, listener: impl FnMut(usize) + 'static) {
        self.on_select_change = Some(Box::new(listener));
    }

    /// Replaces the titles.
    ///
    /// The first title becomes selected if nothing was. A selection past the
    /// new end moves to the last title without animating, and an empty list
    /// clears the selection.
    pub fn set_titles(&mut self, titles: &[Title]) {
        self.titles = titles.to_vec();
        self.dirty = true;

        let Some(last) = self.titles.len().checked_sub(1) else {
            self.selected = None;
            self.cursor.snap_to(0.0);
            self.reveal.snap_to(1.0);
            debug!("tab titles cleared");
            return;
        };

        match self.selected {
            Some(index) if index <= last => {}
            Some(_) => {
                self.selected = Some(last);
                self.cursor.snap_to(last as f32);
                self.reveal.snap_to(1.0);
            }
            None => {
                self.selected = Some(0);
                self.cursor.snap_to(0.0);
            }
        }
        debug!(count = self.titles.len(), selected = ?self.selected, "tab titles set");
    }

    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Selects the tab at `index`. See [`select_at`](Self::select_at).
    pub fn select(&mut self, index: usize) -> bool {
        self.select_at(index, Instant::now())
    }

    /// Selects the tab at `index` as of `now`.
    ///
    /// Out-of-range indices and the already selected index are ignored and
    /// return `false`. Otherwise the cursor starts moving, the listener is
    /// called once and `true` is returned.
    pub fn select_at(&mut self, index: usize, now: Instant) -> bool {
        if index >= self.titles.len() || self.selected == Some(index) {
            debug!(index, selected = ?self.selected, "selection ignored");
            return false;
        }

        let previous = self.selected.replace(index);
        self.cursor.animate_to(
            index as f32,
            now,
            self.translate_duration,
            self.easing,
            &self.ticker,
        );
        if self.scale_reveal {
            self.reveal.animate(
                0.0,
                1.0,
                now,
                self.scale_duration,
                self.easing,
                &self.ticker,
            );
        }
        self.dirty = true;
        debug!(index, ?previous, "tab selected");

        if let Some(listener) = self.on_select_change.as_mut() {
            listener(index);
        }
        true
    }

    /// Advances the animations to `now`. Returns whether any is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_animating() {
            return false;
        }
        let moving = self.cursor.tick(now);
        let revealing = self.reveal.tick(now);
        self.dirty = true;
        trace!(cursor = self.cursor.value(), reveal = self.reveal.value(), "tab bar tick");
        moving || revealing
    }

    pub fn is_animating(&self) -> bool {
        self.cursor.is_running() || self.reveal.is_running()
    }

    /// Whether something changed since the last [`render`](Self::render).
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Horizontal offset of the cutout from the start padding, in pixels.
    pub fn cursor_offset(&self) -> f32 {
        self.layout_metrics()
            .map_or(0.0, |layout| layout.normal_width * self.cursor.value())
    }

    /// Scale applied to the selected label.
    pub fn cursor_scale(&self) -> f32 {
        self.reveal.value()
    }

    /// Size the bar wants under the given constraints. The width is taken as
    /// given; an `AtMost` height collapses to the wrap height.
    pub fn measure(&self, width: Constraint, height: Constraint) -> Size {
        Size::new(width.size(), height.resolve(self.style.wrap_height))
    }

    /// Records the final size and recomputes the geometry derived from it.
    pub fn layout(&mut self, size: Size) {
        if self.size != size {
            trace!(width = size.width, height = size.height, "tab bar laid out");
            self.size = size;
            self.dirty = true;
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Geometry for the current size and titles, or `None` with no titles.
    pub fn layout_metrics(&self) -> Option<TabBarLayout> {
        TabBarLayout::compute(self.size, &self.style, self.titles.len())
    }

    /// Where every label is painted for the current selection.
    pub fn label_placements(&self) -> Vec<LabelPlacement> {
        match (self.layout_metrics(), self.selected) {
            (Some(layout), Some(selected)) => self.place_labels(&layout, selected),
            _ => Vec::new(),
        }
    }

    fn label_style(&self) -> LabelStyle {
        LabelStyle {
            normal_size: self.style.normal_text_size,
            selected_size: self.style.selected_text_size,
            normal_color: self.style.normal_text_color,
            selected_color: self.style.selected_text_color,
            icon_size: self
                .title_icon
                .as_ref()
                .map(|icon| (icon.width() as f32, icon.height() as f32)),
            icon_padding: self.style.icon_padding,
        }
    }

    fn place_labels(&self, layout: &TabBarLayout, selected: usize) -> Vec<LabelPlacement> {
        let style = self.label_style();
        let measure = self.text_measure.as_ref();
        self.titles
            .iter()
            .enumerate()
            .map(|(index, title)| {
                let slot = layout.slot(index, selected, self.style.gap);
                if index == selected {
                    place_selected_label(index, title, slot, &style, measure)
                } else {
                    place_normal_label(index, title, slot, &style, measure)
                }
            })
            .collect()
    }

    /// Replaces the image drawn inside the cutout.
    pub fn set_select_bitmap(&mut self, bitmap: Option<Bitmap>) {
        self.select_bitmap = bitmap;
        self.rounded.invalidate();
        self.dirty = true;
    }

    pub fn set_title_icon(&mut self, icon: Option<Bitmap>) {
        self.title_icon = icon;
        self.dirty = true;
    }

    /// How many times the selected-tab bitmap has been rounded.
    pub fn bitmap_rounds(&self) -> usize {
        self.rounded.rounds()
    }

    /// Stops every animation and gives up the frame subscriptions. Also runs
    /// on drop.
    pub fn detach(&mut self) {
        self.cursor.release();
        self.reveal.release();
    }
}

impl Drop for TabBar {
    fn drop(&mut self) {
        self.detach();
    }
}
