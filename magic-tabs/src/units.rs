//! # Density-Independent Units
//!
//! Sizes in [`TabBarArgs`](crate::TabBarArgs) and
//! [`PageIndicatorArgs`](crate::PageIndicatorArgs) are expressed in [`Dp`]
//! (layout lengths) and [`Sp`] (text sizes). The engines work in physical
//! pixels as `f32`, so every unit is resolved once at construction through an
//! explicit [`Density`].
//!
//! ## Usage
//!
//! ```
//! use magic_tabs::{Density, Dp, Sp};
//!
//! let density = Density::new(2.0, 1.5);
//! assert_eq!(Dp(16.0).to_px(density), 32.0);
//! assert_eq!(Sp(14.0).to_px(density), 42.0);
//! ```

/// Screen density used to resolve [`Dp`] and [`Sp`] values into physical
/// pixels.
///
/// - `scale` is the number of physical pixels per dp.
/// - `font_scale` is the user's text scaling preference, applied on top of
///   `scale` for [`Sp`] values only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    /// Physical pixels per dp.
    pub scale: f32,
    /// Additional multiplier for text sizes.
    pub font_scale: f32,
}

impl Density {
    /// One physical pixel per dp and no font scaling.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        font_scale: 1.0,
    };

    /// Creates a density. Non-finite or non-positive factors fall back to 1.0.
    pub fn new(scale: f32, font_scale: f32) -> Self {
        Self {
            scale: sanitize_factor(scale),
            font_scale: sanitize_factor(font_scale),
        }
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn sanitize_factor(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

/// Density-independent pixels.
///
/// `Dp(48.0)` is roughly the same physical size on every screen once resolved
/// with the screen's [`Density`].
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f32);

impl Dp {
    /// Converts this value to physical pixels.
    pub fn to_px(self, density: Density) -> f32 {
        self.0 * density.scale
    }
}

/// Scale-independent pixels, used for text sizes.
///
/// Resolves like [`Dp`] and is additionally multiplied by
/// [`Density::font_scale`].
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Sp(pub f32);

impl Sp {
    /// Converts this value to physical pixels.
    pub fn to_px(self, density: Density) -> f32 {
        self.0 * density.scale * density.font_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dp_scales_with_density() {
        let density = Density::new(2.625, 1.0);
        assert_eq!(Dp(40.0).to_px(density), 105.0);
    }

    #[test]
    fn test_sp_applies_font_scale() {
        let density = Density::new(2.0, 1.25);
        assert_eq!(Sp(16.0).to_px(density), 40.0);
        assert_eq!(Dp(16.0).to_px(density), 32.0);
    }

    #[test]
    fn test_invalid_density_falls_back_to_identity() {
        assert_eq!(Density::new(0.0, f32::NAN), Density::IDENTITY);
        assert_eq!(Density::new(-3.0, 1.0).scale, 1.0);
    }
}
