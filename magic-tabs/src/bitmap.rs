//! Bitmaps drawn by the tab bar and the rounded-corner preparation of the
//! selected-tab image.
//!
//! The selected-tab image is scaled into the cutout and masked with a rounded
//! rectangle before drawing. That work is memoized in a
//! [`RoundedBitmapCache`], keyed by the source bitmap's identity and the
//! requested output size, so it runs once per bitmap and size rather than once
//! per frame.

use std::{
    fmt,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use image::{RgbaImage, imageops::FilterType};
use tracing::{debug, warn};

use crate::error::BitmapError;

static NEXT_BITMAP_ID: AtomicU64 = AtomicU64::new(1);

/// An immutable RGBA bitmap with a process-unique identity.
///
/// Cloning is cheap and keeps the identity; two bitmaps built from the same
/// pixels are still different bitmaps.
#[derive(Clone)]
pub struct Bitmap {
    id: u64,
    pixels: Arc<RgbaImage>,
}

impl Bitmap {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            id: NEXT_BITMAP_ID.fetch_add(1, Ordering::Relaxed),
            pixels: Arc::new(pixels),
        }
    }

    /// Decodes an image file (PNG or JPEG).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BitmapError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| BitmapError::Load {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(decoded.to_rgba8()))
    }

    /// A bitmap filled with a single RGBA value.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, image::Rgba(rgba)))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("id", &self.id)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Scales `source` to `width`×`height` and masks it with a rounded rectangle
/// of the given corner `radius`.
///
/// The radius is clamped to half the shorter side. Pixels straddling the
/// rounded edge get partial coverage.
pub fn round_corners(
    source: &Bitmap,
    width: u32,
    height: u32,
    radius: f32,
) -> Result<Bitmap, BitmapError> {
    if source.width() == 0 || source.height() == 0 {
        return Err(BitmapError::EmptySource {
            width: source.width(),
            height: source.height(),
        });
    }
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidTarget { width, height });
    }

    let mut scaled = image::imageops::resize(source.pixels(), width, height, FilterType::Triangle);

    let radius = radius.max(0.0).min(width.min(height) as f32 / 2.0);
    if radius > 0.0 {
        let (w, h) = (width as f32, height as f32);
        for (x, y, pixel) in scaled.enumerate_pixels_mut() {
            let coverage = rounded_rect_coverage(x as f32 + 0.5, y as f32 + 0.5, w, h, radius);
            if coverage < 1.0 {
                pixel.0[3] = (pixel.0[3] as f32 * coverage).round() as u8;
            }
        }
    }

    Ok(Bitmap::new(scaled))
}

fn rounded_rect_coverage(px: f32, py: f32, width: f32, height: f32, radius: f32) -> f32 {
    let nearest_x = px.clamp(radius, width - radius);
    let nearest_y = py.clamp(radius, height - radius);
    let dx = px - nearest_x;
    let dy = py - nearest_y;
    if dx == 0.0 && dy == 0.0 {
        return 1.0;
    }
    let distance = (dx * dx + dy * dy).sqrt();
    (radius + 0.5 - distance).clamp(0.0, 1.0)
}

#[derive(Debug)]
struct CacheEntry {
    source_id: u64,
    width: u32,
    height: u32,
    radius_bits: u32,
    /// `None` when rounding failed for this key.
    rounded: Option<Bitmap>,
}

impl CacheEntry {
    fn matches(&self, source: &Bitmap, width: u32, height: u32, radius_bits: u32) -> bool {
        self.source_id == source.id()
            && self.width == width
            && self.height == height
            && self.radius_bits == radius_bits
    }
}

/// Memoizes the output of [`round_corners`], failures included.
#[derive(Debug, Default)]
pub struct RoundedBitmapCache {
    entry: Option<CacheEntry>,
    rounds: usize,
}

impl RoundedBitmapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rounded bitmap for these parameters, running
    /// [`round_corners`] only if the source bitmap or the target changed since
    /// the last call. A failure is logged once and remembered for its key.
    pub fn get_or_round(
        &mut self,
        source: &Bitmap,
        width: u32,
        height: u32,
        radius: f32,
    ) -> Option<Bitmap> {
        let radius_bits = radius.to_bits();
        if let Some(entry) = &self.entry
            && entry.matches(source, width, height, radius_bits)
        {
            return entry.rounded.clone();
        }

        self.rounds += 1;
        let rounded = match round_corners(source, width, height, radius) {
            Ok(rounded) => {
                debug!(
                    source = source.id(),
                    width, height, radius, "rounded selected-tab bitmap"
                );
                Some(rounded)
            }
            Err(err) => {
                warn!(%err, source = source.id(), "skipping selected-tab bitmap");
                None
            }
        };
        self.entry = Some(CacheEntry {
            source_id: source.id(),
            width,
            height,
            radius_bits,
            rounded: rounded.clone(),
        });
        rounded
    }

    /// Drops the memoized bitmap.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// How many times [`round_corners`] actually ran.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}
