//! Faction colours for egui.

use bevy_egui::egui::{self, Color32};
use hangar::{FactionTheme, ThemeColor};

/// Convert a theme colour to an egui colour.
pub fn color32(color: ThemeColor) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Scale a colour's opacity by `factor`.
pub fn fade(color: Color32, factor: f32) -> Color32 {
    color.gamma_multiply(factor.clamp(0.0, 1.0))
}

/// Colours used by the overlays for one faction.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub primary: Color32,
    pub secondary: Color32,
    pub glow: Color32,
    pub background: Color32,
    /// Translucent fill behind panels.
    pub panel: Color32,
    /// Body text.
    pub text: Color32,
    /// Secondary text.
    pub muted: Color32,
}

impl Palette {
    pub fn new(theme: &FactionTheme) -> Self {
        Self {
            primary: color32(theme.primary),
            secondary: color32(theme.secondary),
            glow: color32(theme.glow),
            background: color32(theme.background),
            panel: Color32::from_rgba_unmultiplied(0, 0, 0, 153),
            text: Color32::from_rgb(0xe2, 0xe8, 0xf0),
            muted: Color32::from_rgb(0x94, 0xa3, 0xb8),
        }
    }
}

/// Frame shared by the HUD panels.
pub fn panel_frame(palette: &Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(palette.panel)
        .stroke(egui::Stroke::new(1.0, fade(palette.primary, 0.3)))
        .inner_margin(egui::Margin::same(14))
        .corner_radius(2)
}

/// Small upper-case heading inside a panel.
pub fn section_title(ui: &mut egui::Ui, title: &str, palette: &Palette) {
    ui.label(
        egui::RichText::new(title)
            .size(10.0)
            .strong()
            .color(palette.muted),
    );
}

#[cfg(test)]
mod tests {
    use hangar::FactionId;

    use super::*;

    #[test]
    fn test_palette_uses_theme_colours() {
        let theme = FactionId::Caldari.theme();
        let palette = Palette::new(theme);
        assert_eq!(palette.primary, color32(theme.primary));
        assert_eq!(palette.glow, color32(theme.glow));
    }

    #[test]
    fn test_fade_clamps() {
        let color = Color32::from_rgb(200, 100, 50);
        assert_eq!(fade(color, 1.5), color);
        assert_eq!(fade(color, -1.0).a(), 0);
    }
}
