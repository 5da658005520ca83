//! Measurement constraints handed to [`TabBar::measure`](crate::TabBar::measure)
//! and [`PageIndicator::measure`](crate::PageIndicator::measure) by the host
//! layout system.

/// How the parent constrains one dimension of a widget.
///
/// Every variant carries the size the parent suggested, mirroring the
/// size/mode pair most retained-mode layout systems pass to their children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// The widget must be exactly this size.
    Exactly(f32),
    /// The widget may pick its own size, up to this bound.
    AtMost(f32),
    /// The parent imposes no constraint; the value is only a hint.
    Unspecified(f32),
}

impl Constraint {
    /// The size carried by the constraint, whatever its mode.
    pub fn size(self) -> f32 {
        match self {
            Constraint::Exactly(v) | Constraint::AtMost(v) | Constraint::Unspecified(v) => {
                v.max(0.0)
            }
        }
    }

    /// Resolves the constraint, using `wrap` as the widget's preferred size
    /// when the parent lets it choose (`AtMost`).
    pub fn resolve(self, wrap: f32) -> f32 {
        match self {
            Constraint::Exactly(v) | Constraint::Unspecified(v) => v.max(0.0),
            Constraint::AtMost(_) => wrap.max(0.0),
        }
    }
}
