/// Straight-alpha RGBA colour with `f32` channels in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Android's `Color.GRAY` (`#888888`).
    pub const GRAY: Color = Color::new(0.533, 0.533, 0.533, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a colour from 8-bit channels.
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let channel = |v: u8| f32::from(v) / 255.0;
        Self::new(channel(r), channel(g), channel(b), channel(a))
    }

    /// Builds a colour from 8-bit channels given alpha first, the order
    /// packed `0xAARRGGBB` values use.
    pub fn from_argb_u8(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_channels_land_in_place() {
        let color = Color::from_argb_u8(51, 255, 0, 102);
        assert_eq!(color, Color::new(1.0, 0.0, 0.4, 0.2));
        assert_eq!(Color::from_rgba_u8(255, 255, 255, 255), Color::WHITE);
    }
}
