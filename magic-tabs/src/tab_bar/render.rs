use crate::{
    color::Color,
    geometry::Rect,
    surface::{BlendMode, DrawSurface},
};

use super::{TabBar, TabBarLayout};

impl TabBar {
    /// Paints the bar for the current state.
    ///
    /// The background is drawn into its own layer and the cutout cleared out
    /// of it, so whatever the host drew underneath shows through the notch.
    /// The selected-tab image and the labels follow on top.
    pub fn render(&mut self, surface: &mut dyn DrawSurface) {
        self.dirty = false;

        let size = self.size;
        let background = Rect::new(
            0.0,
            0.0,
            size.width,
            self.style.background_height(size.height),
        );
        surface.save_layer(Rect::from_origin_size(0.0, 0.0, size.width, size.height));
        surface.fill_rect(background, self.style.background_color);

        let (Some(layout), Some(selected)) = (self.layout_metrics(), self.selected) else {
            surface.restore();
            return;
        };

        let offset = self.cursor_offset();
        let cutout = layout.cutout(offset).to_path();
        surface.fill_path(&cutout, Color::TRANSPARENT, BlendMode::Clear);
        surface.restore();

        self.draw_selected_bitmap(&layout, offset, surface);
        self.draw_labels(&layout, selected, surface);
    }

    fn draw_selected_bitmap(
        &mut self,
        layout: &TabBarLayout,
        offset: f32,
        surface: &mut dyn DrawSurface,
    ) {
        let Some(source) = &self.select_bitmap else {
            return;
        };
        let gap = self.style.gap;
        let (width, height) = layout.selected_image_size(gap);
        if let Some(rounded) =
            self.rounded
                .get_or_round(source, width, height, layout.selected_image_radius(gap))
        {
            surface.draw_image(&rounded, layout.selected_image_rect(offset, gap));
        }
    }

    fn draw_labels(&self, layout: &TabBarLayout, selected: usize, surface: &mut dyn DrawSurface) {
        let scale = self.cursor_scale();
        for placement in self.place_labels(layout, selected) {
            if !placement.selected {
                surface.draw_text(&placement.run);
                continue;
            }

            surface.save_layer(placement.slot);
            surface.scale(scale, placement.slot.center());
            if let (Some(icon), Some(dst)) = (&self.title_icon, placement.icon) {
                surface.draw_image(icon, dst);
            }
            surface.draw_text(&placement.run);
            surface.restore();
        }
    }
}
