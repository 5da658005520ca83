use lyon_geom::{Arc, CubicBezierSegment};
use lyon_path::{
    Path,
    math::{Angle, Point, point, vector},
};

use crate::geometry::{Rect, Size};

use super::ResolvedTabBarStyle;

/// Geometry of a tab bar for one measured size and title count.
///
/// Every value is derived from the size, the resolved style and the number of
/// titles; nothing here depends on the animation state. Positions that do are
/// taken as a `cursor_offset` argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabBarLayout {
    pub width: f32,
    pub height: f32,
    pub padding_start: f32,
    /// Width available to the tabs once horizontal padding is removed.
    pub valid_width: f32,
    /// Height of the painted background; the rest is bottom space.
    pub background_height: f32,
    pub top_radius: f32,
    pub bottom_radius: f32,
    /// Length of the flat top edge of the cutout.
    pub line_length: f32,
    pub select_width: f32,
    pub normal_width: f32,
    pub title_count: usize,
}

impl TabBarLayout {
    /// Returns `None` when there are no titles to lay out.
    pub(crate) fn compute(size: Size, style: &ResolvedTabBarStyle, title_count: usize) -> Option<Self> {
        if title_count == 0 {
            return None;
        }

        let valid_width = (size.width - style.padding_start - style.padding_end).max(0.0);
        let background_height = style.background_height(size.height);

        let mut top_radius = style.top_radius.min(background_height / 2.0);
        let mut bottom_radius = style.bottom_radius.min(background_height / 2.0);
        let radii_span = 2.0 * (top_radius + bottom_radius);
        if radii_span > valid_width && radii_span > 0.0 {
            let shrink = valid_width / radii_span;
            top_radius *= shrink;
            bottom_radius *= shrink;
        }
        let radii_span = 2.0 * (top_radius + bottom_radius);

        let (line_length, select_width, normal_width) = if title_count == 1 {
            ((valid_width - radii_span).max(0.0), valid_width, 0.0)
        } else {
            let line_length =
                ((valid_width - background_height - size.height) / title_count as f32).max(0.0);
            let select_width = radii_span + line_length;
            let normal_width = (valid_width - select_width) / (title_count - 1) as f32;
            (line_length, select_width, normal_width)
        };

        Some(Self {
            width: size.width,
            height: size.height,
            padding_start: style.padding_start,
            valid_width,
            background_height,
            top_radius,
            bottom_radius,
            line_length,
            select_width,
            normal_width,
            title_count,
        })
    }

    /// Settled cursor offset for the tab at `index`.
    pub fn cursor_offset_for(&self, index: usize) -> f32 {
        self.normal_width * index as f32
    }

    /// Total width covered by all slots.
    pub fn tiled_width(&self) -> f32 {
        self.normal_width * self.title_count.saturating_sub(1) as f32 + self.select_width
    }

    /// Slot occupied by tab `index` while tab `selected` is selected.
    pub fn slot(&self, index: usize, selected: usize, gap: f32) -> Rect {
        let nw = self.normal_width;
        let start = self.padding_start;
        if index < selected {
            Rect::new(
                start + nw * index as f32,
                0.0,
                start + nw * (index + 1) as f32,
                self.height,
            )
        } else if index > selected {
            Rect::new(
                start + nw * (index - 1) as f32 + self.select_width,
                0.0,
                start + nw * index as f32 + self.select_width,
                self.height,
            )
        } else {
            Rect::new(
                start + nw * index as f32,
                gap,
                start + nw * index as f32 + self.select_width,
                self.height,
            )
        }
    }

    pub fn cutout(&self, cursor_offset: f32) -> CutoutOutline {
        CutoutOutline {
            start_x: self.padding_start + cursor_offset,
            background_height: self.background_height,
            top_radius: self.top_radius,
            bottom_radius: self.bottom_radius,
            line_length: self.line_length,
        }
    }

    /// Width of the region between the two bottom arcs, which hosts the
    /// selected-tab bitmap.
    fn image_outer_width(&self) -> f32 {
        2.0 * self.top_radius + self.line_length
    }

    /// Pixel size the selected-tab bitmap is rounded to.
    pub fn selected_image_size(&self, gap: f32) -> (u32, u32) {
        let width = (self.image_outer_width() - 2.0 * gap).round().max(0.0);
        let height = (self.height - gap).round().max(0.0);
        (width as u32, height as u32)
    }

    /// Corner radius used when rounding the selected-tab bitmap.
    pub fn selected_image_radius(&self, gap: f32) -> f32 {
        (self.top_radius - gap).max(0.0)
    }

    /// Where the selected-tab bitmap is drawn for the given cursor offset.
    pub fn selected_image_rect(&self, cursor_offset: f32, gap: f32) -> Rect {
        let start_x = self.padding_start + cursor_offset + self.bottom_radius;
        Rect::new(
            start_x + gap,
            gap,
            start_x + self.image_outer_width() - gap,
            self.height,
        )
    }
}

/// The notch punched out of the background above the selected tab.
///
/// It rises from the background's bottom edge with an outward bottom arc,
/// turns inward with a top arc, runs flat for `line_length`, and mirrors the
/// two arcs on the trailing side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoutOutline {
    pub start_x: f32,
    pub background_height: f32,
    pub top_radius: f32,
    pub bottom_radius: f32,
    pub line_length: f32,
}

#[derive(Debug, Clone, Copy)]
enum Segment {
    Line(Point),
    Cubic(Point, Point, Point),
}

impl CutoutOutline {
    pub fn width(&self) -> f32 {
        2.0 * (self.top_radius + self.bottom_radius) + self.line_length
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.start_x,
            0.0,
            self.start_x + self.width(),
            self.background_height,
        )
    }

    pub fn to_path(&self) -> Path {
        let (segments, start) = self.segments();
        let mut builder = Path::builder().with_svg();
        builder.move_to(start);
        for segment in segments {
            match segment {
                Segment::Line(to) => {
                    builder.line_to(to);
                }
                Segment::Cubic(ctrl1, ctrl2, to) => {
                    builder.cubic_bezier_to(ctrl1, ctrl2, to);
                }
            }
        }
        builder.close();
        builder.build()
    }

    fn segments(&self) -> (Vec<Segment>, Point) {
        let x = self.start_x;
        let bottom = self.background_height;
        let tr = self.top_radius;
        let br = self.bottom_radius;
        let line = self.line_length;

        let start = point(x, bottom);
        let mut segments = Vec::with_capacity(16);
        // leading bottom arc, bulging out of the background
        push_arc(&mut segments, point(x, bottom - br), br, 90.0, -90.0);
        // leading top arc
        push_arc(&mut segments, point(x + br + tr, tr), tr, 180.0, 90.0);
        segments.push(Segment::Line(point(x + br + tr + line, 0.0)));
        // trailing top arc
        push_arc(&mut segments, point(x + br + tr + line, tr), tr, 270.0, 90.0);
        // trailing bottom arc
        push_arc(
            &mut segments,
            point(x + 2.0 * br + 2.0 * tr + line, bottom - br),
            br,
            180.0,
            -90.0,
        );
        (segments, start)
    }
}

fn angle_point(center: Point, radius: f32, degrees: f32) -> Point {
    // Exact at the quarter angles so consecutive arcs join without drift.
    let (sin, cos) = match degrees.rem_euclid(360.0) {
        d if d == 0.0 => (0.0, 1.0),
        d if d == 90.0 => (1.0, 0.0),
        d if d == 180.0 => (0.0, -1.0),
        d if d == 270.0 => (-1.0, 0.0),
        d => d.to_radians().sin_cos(),
    };
    point(center.x + radius * cos, center.y + radius * sin)
}

/// Appends a line to the arc's start followed by the arc itself.
fn push_arc(
    segments: &mut Vec<Segment>,
    center: Point,
    radius: f32,
    start_degrees: f32,
    sweep_degrees: f32,
) {
    let from = angle_point(center, radius, start_degrees);
    let to = angle_point(center, radius, start_degrees + sweep_degrees);
    segments.push(Segment::Line(from));
    if radius <= 0.0 {
        segments.push(Segment::Line(to));
        return;
    }

    let arc = Arc {
        center,
        radii: vector(radius, radius),
        start_angle: Angle::degrees(start_degrees),
        sweep_angle: Angle::degrees(sweep_degrees),
        x_rotation: Angle::zero(),
    };
    let first = segments.len();
    arc.for_each_cubic_bezier(&mut |segment: &CubicBezierSegment<f32>| {
        segments.push(Segment::Cubic(segment.ctrl1, segment.ctrl2, segment.to));
    });
    // Pin the final endpoint to the exact value.
    if segments.len() > first
        && let Some(Segment::Cubic(_, _, end)) = segments.last_mut()
    {
        *end = to;
    }
}

#[cfg(test)]
mod tests {
    use lyon_path::PathEvent;

    use super::*;
    use crate::{Density, TabBarArgs};

    fn style() -> ResolvedTabBarStyle {
        TabBarArgs::default()
            .resolve(Density::IDENTITY)
            .expect("default args resolve")
    }

    fn path_points(path: &Path) -> Vec<Point> {
        let mut points = Vec::new();
        for event in path.iter() {
            match event {
                PathEvent::Begin { at } => points.push(at),
                PathEvent::Line { to, .. } => points.push(to),
                PathEvent::Quadratic { ctrl, to, .. } => points.extend([ctrl, to]),
                PathEvent::Cubic {
                    ctrl1, ctrl2, to, ..
                } => points.extend([ctrl1, ctrl2, to]),
                PathEvent::End { .. } => {}
            }
        }
        points
    }

    #[test]
    fn test_slots_tile_the_valid_width() {
        let style = style();
        for count in 2..=8 {
            let layout = TabBarLayout::compute(Size::new(500.0, 40.0), &style, count).unwrap();
            assert!(
                (layout.tiled_width() - layout.valid_width).abs() < 1e-3,
                "count {count}: {} vs {}",
                layout.tiled_width(),
                layout.valid_width
            );
        }
    }

    #[test]
    fn test_reference_layout_values() {
        // 5 titles, 500 x 40, bottom space 6, radii 5 / 10.
        let layout = TabBarLayout::compute(Size::new(500.0, 40.0), &style(), 5).unwrap();
        assert_eq!(layout.background_height, 34.0);
        assert!((layout.line_length - 85.2).abs() < 1e-4);
        assert!((layout.select_width - 115.2).abs() < 1e-4);
        assert!((layout.normal_width - 96.2).abs() < 1e-4);
    }

    #[test]
    fn test_single_title_spans_full_width() {
        let layout = TabBarLayout::compute(Size::new(300.0, 40.0), &style(), 1).unwrap();
        assert_eq!(layout.select_width, 300.0);
        assert_eq!(layout.normal_width, 0.0);
        assert_eq!(layout.line_length, 300.0 - 30.0);
        assert_eq!(layout.cutout(0.0).bounds(), Rect::new(0.0, 0.0, 300.0, 34.0));
    }

    #[test]
    fn test_no_titles_has_no_layout() {
        assert_eq!(TabBarLayout::compute(Size::new(300.0, 40.0), &style(), 0), None);
    }

    #[test]
    fn test_slots_around_selection() {
        let layout = TabBarLayout::compute(Size::new(500.0, 40.0), &style(), 5).unwrap();
        let nw = layout.normal_width;
        let sw = layout.select_width;

        assert_eq!(layout.slot(0, 2, 2.0), Rect::new(0.0, 0.0, nw, 40.0));
        assert_eq!(layout.slot(2, 2, 2.0), Rect::new(2.0 * nw, 2.0, 2.0 * nw + sw, 40.0));
        assert_eq!(
            layout.slot(4, 2, 2.0),
            Rect::new(3.0 * nw + sw, 0.0, 4.0 * nw + sw, 40.0)
        );
    }

    #[test]
    fn test_cutout_path_stays_inside_its_slot() {
        let layout = TabBarLayout::compute(Size::new(500.0, 40.0), &style(), 5).unwrap();
        for index in [0, 4] {
            let offset = layout.cursor_offset_for(index);
            let outline = layout.cutout(offset);
            let slot = layout.slot(index, index, 0.0);
            let points = path_points(&outline.to_path());

            assert_eq!(points.first().copied(), Some(point(slot.left, 34.0)));
            for p in &points {
                assert!(p.x >= slot.left - 1e-3 && p.x <= slot.right + 1e-3, "{p:?}");
                assert!(p.y >= -1e-3 && p.y <= 34.0 + 1e-3, "{p:?}");
                assert!(p.x >= -1e-3 && p.x <= 500.0 + 1e-3, "{p:?}");
            }
            let last = points.last().copied().unwrap();
            assert!((last.x - slot.right).abs() < 1e-3);
            assert!((last.y - 34.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_cutout_passes_through_flat_top() {
        let layout = TabBarLayout::compute(Size::new(500.0, 40.0), &style(), 5).unwrap();
        let outline = layout.cutout(0.0);
        let points = path_points(&outline.to_path());
        assert!(points.contains(&point(15.0, 0.0)));
        assert!(points.contains(&point(15.0 + layout.line_length, 0.0)));
    }

    #[test]
    fn test_selected_image_placement() {
        let layout = TabBarLayout::compute(Size::new(500.0, 40.0), &style(), 5).unwrap();
        let rect = layout.selected_image_rect(layout.cursor_offset_for(1), 2.0);
        let left = layout.normal_width + 10.0 + 2.0;
        assert!((rect.left - left).abs() < 1e-4);
        assert_eq!(rect.top, 2.0);
        assert!((rect.width() - (10.0 + layout.line_length - 4.0)).abs() < 1e-4);
        assert_eq!(rect.bottom, 40.0);
        assert_eq!(layout.selected_image_size(2.0), (91, 38));
        assert_eq!(layout.selected_image_radius(2.0), 3.0);
    }

    #[test]
    fn test_oversized_radii_shrink_to_fit() {
        let style = ResolvedTabBarStyle {
            top_radius: 40.0,
            bottom_radius: 40.0,
            ..style()
        };
        let layout = TabBarLayout::compute(Size::new(50.0, 40.0), &style, 2).unwrap();
        assert!(layout.top_radius <= 17.0);
        assert!(2.0 * (layout.top_radius + layout.bottom_radius) <= layout.valid_width + 1e-4);
        assert!((layout.tiled_width() - layout.valid_width).abs() < 1e-4);
    }
}
