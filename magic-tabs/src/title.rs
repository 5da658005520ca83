//! Tab titles and the placement of their labels inside tab slots.

use crate::{
    color::Color,
    geometry::Rect,
    surface::{TextAlign, TextRun},
    text::TextMeasure,
};

/// One tab's text.
///
/// `short_label` is shown while the tab is unselected, `full_label` while it
/// is selected. `sub_label` is carried for hosts that show it elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Title {
    pub short_label: String,
    pub full_label: String,
    pub sub_label: String,
}

impl Title {
    pub fn new(short_label: impl Into<String>, full_label: impl Into<String>) -> Self {
        Self {
            short_label: short_label.into(),
            full_label: full_label.into(),
            sub_label: String::new(),
        }
    }

    pub fn with_sub_label(mut self, sub_label: impl Into<String>) -> Self {
        self.sub_label = sub_label.into();
        self
    }
}

/// Resolved text styling shared by every label of a tab bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub normal_size: f32,
    pub selected_size: f32,
    pub normal_color: Color,
    pub selected_color: Color,
    /// Size of the leading icon of the selected label, if any.
    pub icon_size: Option<(f32, f32)>,
    pub icon_padding: f32,
}

/// Where and how one label is painted.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub index: usize,
    pub selected: bool,
    /// The tab slot the label belongs to.
    pub slot: Rect,
    pub run: TextRun,
    /// Destination of the leading icon, only for the selected label.
    pub icon: Option<Rect>,
}

/// Centres `title.short_label` inside `slot`.
pub fn place_normal_label(
    index: usize,
    title: &Title,
    slot: Rect,
    style: &LabelStyle,
    measure: &dyn TextMeasure,
) -> LabelPlacement {
    let metrics = measure.metrics(style.normal_size);
    LabelPlacement {
        index,
        selected: false,
        slot,
        run: TextRun {
            text: title.short_label.clone(),
            x: slot.center_x(),
            baseline: metrics.centered_baseline(slot.center_y()),
            size: style.normal_size,
            color: style.normal_color,
            align: TextAlign::Center,
        },
        icon: None,
    }
}

/// Centres the optional icon plus `title.full_label` as one group inside
/// `slot`, icon first.
///
/// The baseline uses the normal-size font metrics, so selected and normal
/// labels share a baseline even when their sizes differ.
pub fn place_selected_label(
    index: usize,
    title: &Title,
    slot: Rect,
    style: &LabelStyle,
    measure: &dyn TextMeasure,
) -> LabelPlacement {
    let metrics = measure.metrics(style.normal_size);
    let text_width = measure.advance(&title.full_label, style.selected_size);
    let (icon_width, leading) = match style.icon_size {
        Some((width, _)) => (width, width + style.icon_padding),
        None => (0.0, 0.0),
    };
    let group_left = slot.center_x() - (leading + text_width) / 2.0;

    let icon = style.icon_size.map(|(_, height)| {
        Rect::from_origin_size(
            group_left,
            slot.center_y() - height / 2.0,
            icon_width,
            height,
        )
    });

    LabelPlacement {
        index,
        selected: true,
        slot,
        run: TextRun {
            text: title.full_label.clone(),
            x: group_left + leading,
            baseline: metrics.centered_baseline(slot.center_y()),
            size: style.selected_size,
            color: style.selected_color,
            align: TextAlign::Left,
        },
        icon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{FontMetrics, TextMeasure};

    struct FixedMeasure;

    impl TextMeasure for FixedMeasure {
        fn metrics(&self, size: f32) -> FontMetrics {
            FontMetrics {
                top: -size,
                bottom: size / 4.0,
            }
        }

        fn advance(&self, text: &str, size: f32) -> f32 {
            text.len() as f32 * size / 2.0
        }
    }

    fn style(icon_size: Option<(f32, f32)>) -> LabelStyle {
        LabelStyle {
            normal_size: 12.0,
            selected_size: 16.0,
            normal_color: Color::GRAY,
            selected_color: Color::WHITE,
            icon_size,
            icon_padding: 4.0,
        }
    }

    #[test]
    fn test_normal_label_is_centered_in_slot() {
        let title = Title::new("home", "Home page");
        let slot = Rect::new(0.0, 0.0, 100.0, 40.0);
        let placement = place_normal_label(2, &title, slot, &style(None), &FixedMeasure);

        assert!(!placement.selected);
        assert_eq!(placement.run.text, "home");
        assert_eq!(placement.run.align, TextAlign::Center);
        assert_eq!(placement.run.x, 50.0);
        // centre 20, top -12, bottom 3 -> 20 + 6 - 1.5
        assert_eq!(placement.run.baseline, 24.5);
        assert_eq!(placement.run.size, 12.0);
    }

    #[test]
    fn test_selected_label_groups_icon_and_text() {
        let title = Title::new("home", "Home");
        let slot = Rect::new(100.0, 2.0, 200.0, 42.0);
        let placement =
            place_selected_label(1, &title, slot, &style(Some((10.0, 8.0))), &FixedMeasure);

        // text width 4 * 8 = 32, group = 10 + 4 + 32 = 46, centred on 150
        let icon = placement.icon.unwrap();
        assert_eq!(icon, Rect::new(127.0, 18.0, 137.0, 26.0));
        assert_eq!(placement.run.x, 141.0);
        assert_eq!(placement.run.text, "Home");
        assert_eq!(placement.run.align, TextAlign::Left);
        assert_eq!(placement.run.color, Color::WHITE);
        assert_eq!(placement.run.size, 16.0);
    }

    #[test]
    fn test_selected_baseline_matches_normal_labels() {
        let title = Title::new("a", "A");
        let labels = style(None);
        let normal_slot = Rect::new(0.0, 0.0, 50.0, 40.0);
        let selected_slot = Rect::new(50.0, 0.0, 100.0, 40.0);
        let normal = place_normal_label(0, &title, normal_slot, &labels, &FixedMeasure);
        let selected = place_selected_label(1, &title, selected_slot, &labels, &FixedMeasure);
        // metrics at 12: top -12, bottom 3
        assert_eq!(selected.run.baseline, 24.5);
        assert_eq!(selected.run.baseline, normal.run.baseline);
    }

    #[test]
    fn test_selected_label_without_icon_is_centered() {
        let title = Title::new("a", "abcd");
        let slot = Rect::new(0.0, 0.0, 100.0, 40.0);
        let placement = place_selected_label(0, &title, slot, &style(None), &FixedMeasure);
        assert_eq!(placement.icon, None);
        assert_eq!(placement.run.x, 50.0 - 16.0);
    }
}
