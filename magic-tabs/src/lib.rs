//! Geometry and animation engines for a cutout-cursor tab bar and a
//! scroll-linked page indicator.
//!
//! Neither engine owns a window or a canvas. The host measures and lays them
//! out, forwards taps, scroll positions and frame ticks, and paints them by
//! passing a [`DrawSurface`] to their `render` methods.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use magic_tabs::{
//!     CommandRecorder, Constraint, Density, FrameTicker, PageIndicator, PageIndicatorArgs,
//!     TabBar, TabBarArgs, Title,
//! };
//!
//! let ticker = FrameTicker::new();
//! let mut tabs = TabBar::new(TabBarArgs::default(), Density::IDENTITY, ticker.clone()).unwrap();
//! tabs.set_titles(&[Title::new("Home", "Home feed"), Title::new("Saved", "Saved items")]);
//! let size = tabs.measure(Constraint::Exactly(360.0), Constraint::AtMost(200.0));
//! tabs.layout(size);
//!
//! let mut dots = PageIndicator::new(PageIndicatorArgs::default(), Density::IDENTITY).unwrap();
//! dots.set_count(2);
//! dots.layout(dots.measure(Constraint::Exactly(360.0), Constraint::AtMost(40.0)));
//!
//! let start = Instant::now();
//! tabs.select_at(1, start);
//! dots.on_scroll(0, 0.5);
//! while ticker.is_active() {
//!     tabs.tick(start + Duration::from_millis(400));
//! }
//!
//! let mut surface = CommandRecorder::new();
//! tabs.render(&mut surface);
//! dots.render(&mut surface);
//! assert_eq!(tabs.selected_index(), Some(1));
//! ```

pub mod animation;
pub mod bitmap;
pub mod color;
pub mod constraint;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod indicator;
pub mod surface;
pub mod tab_bar;
pub mod text;
pub mod title;
pub mod units;

pub use animation::Easing;
pub use bitmap::{Bitmap, RoundedBitmapCache, round_corners};
pub use color::Color;
pub use constraint::Constraint;
pub use error::{BitmapError, ConfigError};
pub use frame::{FrameSubscription, FrameTicker};
pub use geometry::{Rect, Size};
pub use indicator::{PageIndicator, PageIndicatorArgs, PageIndicatorArgsBuilder};
pub use surface::{BlendMode, CommandRecorder, DrawCommand, DrawSurface, TextAlign, TextRun};
pub use tab_bar::{CutoutOutline, TabBar, TabBarArgs, TabBarArgsBuilder, TabBarLayout};
pub use text::{ApproximateTextMeasure, FontMetrics, TextMeasure};
pub use title::{LabelPlacement, Title};
pub use units::{Density, Dp, Sp};
