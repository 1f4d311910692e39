//! Ship selector flyout.
//!
//! A button in the bottom-right corner opens a panel on the right edge
//! listing every ship grouped by faction. Clicking outside the panel closes
//! it; picking a ship queues a selection intent.

use bevy_egui::egui::{self, Color32, RichText};
use hangar::selector::FactionGroup;
use hangar::{SelectorState, ShipConfig, ShipId, ViewIntent, catalog};

use super::theme::{Palette, color32, fade};
use crate::state::ViewIntents;

const PANEL_WIDTH: f32 = 384.0;
/// Above the HUD panels, below the flyout itself.
const BACKDROP_ORDER: egui::Order = egui::Order::PanelResizeLine;

pub(super) fn render_selector(
    ctx: &egui::Context,
    current: ShipId,
    selector: &mut SelectorState,
    palette: &Palette,
    intents: &mut ViewIntents,
) {
    egui::Area::new(egui::Id::new("hud_selector_button"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-24.0, -24.0])
        .show(ctx, |ui| {
            let button = egui::Button::new(
                RichText::new("选择飞船")
                    .size(14.0)
                    .color(palette.primary),
            )
            .fill(fade(palette.primary, 0.18))
            .stroke(egui::Stroke::new(1.0, fade(palette.primary, 0.3)))
            .corner_radius(12)
            .min_size(egui::vec2(140.0, 44.0));
            if ui.add(button).clicked() {
                selector.open();
            }
        });

    if !selector.is_open() {
        return;
    }

    let screen = ctx.screen_rect();

    // Dim everything behind the flyout; a click here dismisses it.
    let backdrop = egui::Area::new(egui::Id::new("hud_selector_backdrop"))
        .order(BACKDROP_ORDER)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let (rect, response) = ui.allocate_exact_size(screen.size(), egui::Sense::click());
            ui.painter()
                .rect_filled(rect, 0.0, Color32::from_black_alpha(153));
            response
        });

    let mut picked = None;
    let mut close = backdrop.inner.clicked();

    egui::Area::new(egui::Id::new("hud_selector_panel"))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::pos2(screen.max.x - PANEL_WIDTH.min(screen.width()), screen.min.y))
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(fade(palette.background, 0.95))
                .stroke(egui::Stroke::new(1.0, fade(palette.primary, 0.2)))
                .inner_margin(egui::Margin::same(16))
                .show(ui, |ui| {
                    ui.set_width(PANEL_WIDTH.min(screen.width()) - 32.0);
                    ui.set_min_height(screen.height() - 32.0);

                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new("飞船选择").size(18.0).strong().color(Color32::WHITE));
                            ui.label(RichText::new("SHIP SELECTOR").size(11.0).color(palette.muted));
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let close_button = egui::Button::new(RichText::new("X").color(palette.primary))
                                .fill(fade(palette.primary, 0.08));
                            if ui.add(close_button).clicked() {
                                close = true;
                            }
                        });
                    });
                    ui.separator();

                    egui::ScrollArea::vertical()
                        .max_height(screen.height() - 140.0)
                        .show(ui, |ui| {
                            for group in SelectorState::groups() {
                                if let Some(ship) = faction_section(ui, &group, current, selector) {
                                    picked = Some(ship);
                                }
                                ui.add_space(8.0);
                            }
                        });

                    ui.separator();
                    ui.vertical_centered(|ui| {
                        ui.label(
                            RichText::new(format!(
                                "共 {} 艘飞船 • {} 个势力",
                                catalog::all_ships().len(),
                                catalog::all_factions().len()
                            ))
                            .size(11.0)
                            .monospace()
                            .color(palette.muted),
                        );
                    });
                });
        });

    if let Some(ship) = picked {
        selector.close();
        intents.request(ViewIntent::SelectShip(ship));
    } else if close {
        selector.close();
    }
}

/// One collapsible faction group. Returns the ship picked this frame.
fn faction_section(
    ui: &mut egui::Ui,
    group: &FactionGroup,
    current: ShipId,
    selector: &mut SelectorState,
) -> Option<ShipId> {
    let theme = group.theme;
    let primary = color32(theme.primary);
    let expanded = selector.is_expanded(theme.id);

    let header = egui::Button::new(
        RichText::new(format!(
            "{}  {}  {}   {}",
            if expanded { "-" } else { "+" },
            theme.name,
            theme.english_name.to_uppercase(),
            group.ships.len()
        ))
        .size(14.0)
        .color(primary),
    )
    .fill(fade(primary, if expanded { 0.15 } else { 0.06 }))
    .stroke(egui::Stroke::new(1.0, fade(primary, 0.3)))
    .min_size(egui::vec2(ui.available_width(), 40.0));
    if ui.add(header).clicked() {
        selector.toggle(theme.id);
    }

    if !expanded {
        return None;
    }

    let mut picked = None;
    ui.indent(theme.id.as_str(), |ui| {
        for ship in &group.ships {
            if ship_card(ui, ship, ship.id == current, primary).clicked() {
                picked = Some(ship.id);
            }
        }
    });
    picked
}

fn ship_card(ui: &mut egui::Ui, ship: &ShipConfig, current: bool, primary: Color32) -> egui::Response {
    let name_color = if current { primary } else { Color32::WHITE };
    let mut text = format!("{}  {}\n{} · {}", ship.localized_name, ship.name, ship.class, ship.manufacturer);
    if current {
        text.push_str("\nCURRENT");
    }

    ui.add(
        egui::Button::new(RichText::new(text).size(12.0).color(name_color))
            .fill(if current { fade(primary, 0.2) } else { Color32::from_white_alpha(8) })
            .stroke(egui::Stroke::new(
                1.0,
                if current { primary } else { Color32::from_white_alpha(20) },
            ))
            .min_size(egui::vec2(ui.available_width(), 52.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backdrop_covers_panels_under_flyout() {
        assert!(BACKDROP_ORDER > egui::Order::Middle);
        assert!(BACKDROP_ORDER < egui::Order::Foreground);
    }
}
