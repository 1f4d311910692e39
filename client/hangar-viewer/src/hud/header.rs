//! Ship name plate and system status.

use bevy_egui::egui::{self, RichText};
use hangar::ShipConfig;

use super::theme::{Palette, fade, panel_frame};

const INTEGRITY_GREEN: egui::Color32 = egui::Color32::from_rgb(0x34, 0xd3, 0x99);

pub(super) fn render_header(ctx: &egui::Context, ship: &ShipConfig, palette: &Palette) {
    egui::Area::new(egui::Id::new("hud_header"))
        .anchor(egui::Align2::LEFT_TOP, [24.0, 24.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new(ship.stats.name.to_uppercase())
                    .size(34.0)
                    .strong()
                    .monospace()
                    .color(palette.glow),
            );
            ui.horizontal(|ui| {
                egui::Frame::new()
                    .fill(fade(palette.primary, 0.15))
                    .stroke(egui::Stroke::new(1.0, fade(palette.primary, 0.5)))
                    .inner_margin(egui::Margin::symmetric(8, 2))
                    .corner_radius(2)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(format!("{} Class", ship.stats.class).to_uppercase())
                                .size(12.0)
                                .strong()
                                .color(palette.primary),
                        );
                    });
                ui.label(RichText::new("|").color(palette.muted));
                ui.label(
                    RichText::new(ship.stats.manufacturer.to_uppercase())
                        .size(12.0)
                        .strong()
                        .color(palette.primary),
                );
            });
            ui.label(RichText::new(ship.localized_name).size(14.0).color(palette.muted));
        });

    egui::Area::new(egui::Id::new("hud_integrity"))
        .anchor(egui::Align2::RIGHT_TOP, [-24.0, 24.0])
        .show(ctx, |ui| {
            panel_frame(palette).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new("SYSTEM INTEGRITY").size(10.0).color(palette.muted));
                        ui.label(
                            RichText::new("100%")
                                .size(18.0)
                                .monospace()
                                .color(INTEGRITY_GREEN),
                        );
                    });
                    integrity_pulse(ui);
                });
            });
        });
}

/// Pulsing status light next to the integrity readout.
fn integrity_pulse(ui: &mut egui::Ui) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(20.0, 20.0), egui::Sense::hover());
    let t = ui.input(|input| input.time);
    #[allow(clippy::cast_possible_truncation)]
    let pulse = (0.6 + 0.4 * (t * 3.0).sin()) as f32;
    ui.painter()
        .circle_filled(rect.center(), 5.0, fade(INTEGRITY_GREEN, pulse));
    ui.painter().circle_stroke(
        rect.center(),
        8.0,
        egui::Stroke::new(1.0, fade(INTEGRITY_GREEN, pulse * 0.4)),
    );
    ui.ctx().request_repaint();
}
