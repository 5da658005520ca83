//! The draw surface consumed by the render steps.
//!
//! Both engines describe a frame as a short sequence of calls on a
//! [`DrawSurface`]. The host maps those calls onto its canvas. The
//! [`CommandRecorder`] implementation keeps the calls as [`DrawCommand`]s,
//! which is what tests and the headless demo inspect.

use lyon_path::Path;

use crate::{
    bitmap::Bitmap,
    color::Color,
    geometry::{Point, Rect},
};

/// How a fill combines with what is already in the current layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Source-over compositing.
    #[default]
    Normal,
    /// Clears the destination wherever the shape covers it.
    Clear,
}

/// Horizontal anchor of a text run relative to its `x` coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// A single line of text to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
}

pub trait DrawSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color);

    fn fill_path(&mut self, path: &Path, color: Color, blend: BlendMode);

    /// Opens an offscreen layer bounded by `bounds`. Paired with
    /// [`restore`](Self::restore).
    fn save_layer(&mut self, bounds: Rect);

    /// Scales subsequent drawing in the current layer by `factor` around
    /// `pivot`.
    fn scale(&mut self, factor: f32, pivot: Point);

    /// Composites the most recent layer back and drops its transform.
    fn restore(&mut self);

    fn draw_image(&mut self, image: &Bitmap, dst: Rect);

    fn draw_text(&mut self, run: &TextRun);
}

/// One recorded [`DrawSurface`] call.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillRoundRect {
        rect: Rect,
        radius: f32,
        color: Color,
    },
    FillPath {
        path: Path,
        color: Color,
        blend: BlendMode,
    },
    SaveLayer {
        bounds: Rect,
    },
    Scale {
        factor: f32,
        pivot: Point,
    },
    Restore,
    DrawImage {
        image: Bitmap,
        dst: Rect,
    },
    DrawText(TextRun),
}

/// A [`DrawSurface`] that records every call.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> Vec<&TextRun> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::DrawText(run) => Some(run),
                _ => None,
            })
            .collect()
    }

    pub fn round_rects(&self) -> Vec<(Rect, Color)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRoundRect { rect, color, .. } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn images(&self) -> Vec<(&Bitmap, Rect)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::DrawImage { image, dst } => Some((image, *dst)),
                _ => None,
            })
            .collect()
    }

    pub fn paths(&self) -> Vec<(&Path, BlendMode)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillPath { path, blend, .. } => Some((path, *blend)),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for CommandRecorder {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillRoundRect {
            rect,
            radius,
            color,
        });
    }

    fn fill_path(&mut self, path: &Path, color: Color, blend: BlendMode) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
            blend,
        });
    }

    fn save_layer(&mut self, bounds: Rect) {
        self.commands.push(DrawCommand::SaveLayer { bounds });
    }

    fn scale(&mut self, factor: f32, pivot: Point) {
        self.commands.push(DrawCommand::Scale { factor, pivot });
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn draw_image(&mut self, image: &Bitmap, dst: Rect) {
        self.commands.push(DrawCommand::DrawImage {
            image: image.clone(),
            dst,
        });
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.commands.push(DrawCommand::DrawText(run.clone()));
    }
}
