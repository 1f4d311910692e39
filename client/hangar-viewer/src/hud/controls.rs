//! View-control panel: mode buttons and the rotation toggle.

use bevy_egui::egui::{self, Color32, RichText};
use hangar::{ViewIntent, ViewMode, ViewState};

use super::theme::{Palette, fade, panel_frame, section_title};
use crate::state::ViewIntents;

const PANEL_WIDTH: f32 = 220.0;
const AMBER: Color32 = Color32::from_rgb(0xf5, 0x9e, 0x0b);

pub(super) fn render_controls(
    ctx: &egui::Context,
    state: &ViewState,
    palette: &Palette,
    intents: &mut ViewIntents,
) {
    egui::Area::new(egui::Id::new("hud_view_control"))
        .anchor(egui::Align2::LEFT_BOTTOM, [24.0, -24.0])
        .show(ctx, |ui| {
            panel_frame(palette).show(ui, |ui| {
                ui.set_width(PANEL_WIDTH);
                ui.label(
                    RichText::new("VIEW CONTROL")
                        .size(13.0)
                        .strong()
                        .color(palette.primary),
                );
                ui.add_space(8.0);

                for mode in ViewMode::ALL {
                    if mode_button(ui, mode, state.mode() == mode, palette).clicked() {
                        intents.request(ViewIntent::SetMode(mode));
                    }
                }

                ui.add_space(6.0);
                ui.separator();
                ui.add_space(6.0);

                if rotation_button(ui, state.is_rotating(), palette).clicked() {
                    intents.request(ViewIntent::ToggleRotation);
                }

                ui.add_space(6.0);
                section_title(ui, "1-3 VIEW   R ROTATE   H HIDE HUD", palette);
            });
        });
}

fn mode_button(ui: &mut egui::Ui, mode: ViewMode, active: bool, palette: &Palette) -> egui::Response {
    let (text, fill, stroke) = if active {
        (
            format!("{}  >", mode.label()),
            fade(palette.primary, 0.15),
            fade(palette.primary, 0.5),
        )
    } else {
        (
            mode.label().to_string(),
            Color32::from_rgba_unmultiplied(30, 41, 59, 128),
            Color32::TRANSPARENT,
        )
    };
    let color = if active { palette.glow } else { palette.muted };

    ui.add(
        egui::Button::new(RichText::new(text).size(13.0).color(color))
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, stroke))
            .min_size(egui::vec2(PANEL_WIDTH, 32.0)),
    )
}

fn rotation_button(ui: &mut egui::Ui, rotating: bool, palette: &Palette) -> egui::Response {
    let button = if rotating {
        egui::Button::new(RichText::new("HALT ROTATION").size(13.0).color(AMBER))
            .fill(fade(AMBER, 0.12))
            .stroke(egui::Stroke::new(1.0, fade(AMBER, 0.5)))
    } else {
        egui::Button::new(RichText::new("INITIATE ROTATION").size(13.0).color(palette.muted))
            .fill(Color32::from_rgba_unmultiplied(30, 41, 59, 128))
            .stroke(egui::Stroke::new(1.0, Color32::TRANSPARENT))
    };
    ui.add(button.min_size(egui::vec2(PANEL_WIDTH, 32.0)))
}
