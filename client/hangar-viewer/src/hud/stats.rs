//! Ship statistics panel with ATTRIBUTES and FITTING tabs.

use bevy_egui::egui::{self, Color32, RichText};
use hangar::ShipStats;

use super::theme::{Palette, panel_frame, section_title};

const PANEL_WIDTH: f32 = 300.0;
const BAR_HEIGHT: f32 = 4.0;
const BAR_TRACK: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);

const SHIELD_BLUE: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
const ARMOR_ORANGE: Color32 = Color32::from_rgb(0xf9, 0x73, 0x16);
const STRUCTURE_RED: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
const CAPACITOR_YELLOW: Color32 = Color32::from_rgb(0xea, 0xb3, 0x08);

/// Which tab of the stats panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum StatsTab {
    #[default]
    Attributes,
    Fitting,
}

pub(super) fn render_stats(
    ctx: &egui::Context,
    stats: &ShipStats,
    tab: &mut StatsTab,
    palette: &Palette,
) {
    // Leaves room for the selector button in the corner below.
    egui::Area::new(egui::Id::new("hud_stats"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-24.0, -88.0])
        .show(ctx, |ui| {
            panel_frame(palette).show(ui, |ui| {
                ui.set_width(PANEL_WIDTH);
                ui.horizontal(|ui| {
                    ui.selectable_value(tab, StatsTab::Attributes, "ATTRIBUTES");
                    ui.selectable_value(tab, StatsTab::Fitting, "FITTING");
                });
                ui.separator();

                egui::ScrollArea::vertical()
                    .max_height(300.0)
                    .show(ui, |ui| match tab {
                        StatsTab::Attributes => render_attributes(ui, stats, palette),
                        StatsTab::Fitting => render_fitting(ui, stats, palette),
                    });

                ui.separator();
                ui.label(
                    RichText::new("SIMULATION MODE")
                        .size(10.0)
                        .monospace()
                        .color(palette.muted),
                );
            });
        });
}

fn render_attributes(ui: &mut egui::Ui, stats: &ShipStats, palette: &Palette) {
    let max = stats.max_pool();

    section_title(ui, "DEFENSE", palette);
    stat_row(ui, "Shield HP", &grouped(stats.shield), "HP", palette);
    stat_bar(ui, fraction(stats.shield, max), SHIELD_BLUE);
    stat_row(ui, "Armor HP", &grouped(stats.armor), "HP", palette);
    stat_bar(ui, fraction(stats.armor, max), ARMOR_ORANGE);
    stat_row(ui, "Structure", &grouped(stats.structure), "HP", palette);
    stat_bar(ui, fraction(stats.structure, max), STRUCTURE_RED);

    ui.add_space(8.0);
    section_title(ui, "CAPACITOR", palette);
    stat_row(ui, "Capacity", &grouped(stats.capacitor), "GJ", palette);
    stat_bar(ui, fraction(stats.capacitor, max), CAPACITOR_YELLOW);

    ui.add_space(8.0);
    section_title(ui, "HULL", palette);
    stat_row(ui, "Mass", stats.mass, "", palette);
}

fn render_fitting(ui: &mut egui::Ui, stats: &ShipStats, palette: &Palette) {
    section_title(ui, "RESOURCES", palette);
    stat_row(ui, "CPU", stats.cpu, "tf", palette);
    stat_row(ui, "Powergrid", stats.power_grid, "MW", palette);

    ui.add_space(8.0);
    section_title(ui, "HARDPOINTS", palette);
    stat_row(ui, "Turret slots", &stats.turret_slots.to_string(), "", palette);
    stat_row(ui, "Launcher slots", &stats.launcher_slots.to_string(), "", palette);
}

/// One labelled value, right-aligned with its unit.
fn stat_row(ui: &mut egui::Ui, label: &str, value: &str, unit: &str, palette: &Palette) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).size(12.0).monospace().color(palette.muted));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if !unit.is_empty() {
                ui.label(RichText::new(unit).size(12.0).monospace().color(palette.muted));
            }
            ui.label(RichText::new(value).size(12.0).monospace().color(palette.text));
        });
    });
}

fn stat_bar(ui: &mut egui::Ui, fraction: f32, color: Color32) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, BAR_HEIGHT), egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 1.0, BAR_TRACK);

    let mut filled = rect;
    filled.set_width(rect.width() * fraction.clamp(0.0, 1.0));
    painter.rect_filled(filled, 1.0, color);
    ui.add_space(4.0);
}

/// Share of `max`, for bar widths.
#[allow(clippy::cast_possible_truncation)]
fn fraction(value: u32, max: u32) -> f32 {
    if max == 0 {
        return 0.0;
    }
    (f64::from(value) / f64::from(max)) as f32
}

/// Format with thousands separators, e.g. `12,500`.
fn grouped(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped() {
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(999), "999");
        assert_eq!(grouped(1000), "1,000");
        assert_eq!(grouped(12_500), "12,500");
        assert_eq!(grouped(1_234_567), "1,234,567");
    }

    #[test]
    fn test_fraction() {
        assert!((fraction(50, 200) - 0.25).abs() < f32::EPSILON);
        assert!((fraction(200, 200) - 1.0).abs() < f32::EPSILON);
        assert!(fraction(10, 0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_largest_pool_fills_bar() {
        let stats = &hangar::ShipId::Avatar.config().stats;
        let max = stats.max_pool();
        let widest = stats
            .pools()
            .iter()
            .map(|(_, value)| fraction(*value, max))
            .fold(0.0_f32, f32::max);
        assert!((widest - 1.0).abs() < f32::EPSILON);
    }
}
