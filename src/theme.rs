use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub surface: Color32,
    pub panel: Color32,
    pub card: Color32,
    pub card_selected: Color32,
    pub accent: Color32,
    pub accent_soft: Color32,
    pub danger: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub border_subtle: Color32,
    pub selected_stroke: Color32,
    pub spacing_12: f32,
    pub radius_8: u8,
    pub radius_12: u8,
    pub card_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface: Color32::from_rgb(0xFD, 0xF8, 0xF5),
            panel: Color32::from_rgb(0xF7, 0xEE, 0xEA),
            card: Color32::from_rgb(0xFF, 0xFF, 0xFF),
            card_selected: Color32::from_rgb(0xFB, 0xE9, 0xE7),
            accent: Color32::from_rgb(0xC2, 0x5E, 0x7A),
            accent_soft: Color32::from_rgb(0xD9, 0x8A, 0x9F),
            danger: Color32::from_rgb(0xC0, 0x39, 0x2B),
            text_primary: Color32::from_rgb(0x2B, 0x22, 0x24),
            text_muted: Color32::from_rgb(0x8A, 0x7A, 0x7E),
            border_subtle: Color32::from_rgba_premultiplied(0, 0, 0, 18),
            selected_stroke: Color32::from_rgb(0xC2, 0x5E, 0x7A),
            spacing_12: 12.0,
            radius_8: 8,
            radius_12: 12,
            card_width: 230.0,
        }
    }
}

impl Theme {
    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.surface;
        visuals.override_text_color = Some(self.text_primary);
        visuals.widgets.noninteractive.bg_fill = self.panel;
        visuals.widgets.noninteractive.weak_bg_fill = self.panel;
        visuals.widgets.noninteractive.fg_stroke.color = self.text_primary;
        visuals.widgets.inactive.bg_fill = self.panel;
        visuals.widgets.inactive.fg_stroke.color = self.text_primary;
        visuals.widgets.hovered.bg_fill = self.card_selected;
        visuals.widgets.hovered.fg_stroke.color = self.text_primary;
        visuals.widgets.active.bg_fill = self.accent_soft;
        visuals.widgets.active.fg_stroke.color = self.text_primary;
        visuals.selection.bg_fill = self.accent_soft;
        visuals.hyperlink_color = self.accent;
        visuals.window_fill = self.surface;
        visuals.window_corner_radius = CornerRadius::same(self.radius_12);

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(18.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(12.0));
        style.text_styles.insert(TextStyle::Monospace, FontId::monospace(13.0));
        ctx.set_style(style);
    }

    pub fn card_frame(&self, selected: bool) -> Frame {
        let (fill, stroke) = if selected {
            (self.card_selected, Stroke::new(2.0, self.selected_stroke))
        } else {
            (self.card, Stroke::new(1.0, self.border_subtle))
        };
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(self.spacing_12 as i8))
            .corner_radius(CornerRadius::same(self.radius_8))
            .stroke(stroke)
    }
}
