//! Per-mode screen overlays: vignette, letterbox bars and the tactical reticle.
//!
//! Painted on the background layer so the panels stay on top.

use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::CinematicBars;
use super::theme::{Palette, fade};
use crate::state::ViewerState;

/// Share of the smaller screen dimension left clear in the vignette's centre.
const VIGNETTE_CLEAR: f32 = 0.5;
const RETICLE_RADIUS: f32 = 250.0;
const RETICLE_DASHES: u8 = 72;
/// Seconds per turn of the dashed reticle ring.
const RETICLE_PERIOD_SECS: f32 = 60.0;

pub(super) fn mode_overlay_ui(
    mut contexts: EguiContexts,
    state: Res<ViewerState>,
    bars: Option<Res<CinematicBars>>,
    time: Res<Time>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let screen = ctx.screen_rect();
    let painter = ctx.layer_painter(egui::LayerId::background());
    let mode = state.mode();

    painter.add(vignette_mesh(screen, mode.vignette_opacity()));

    if let Some(bars) = bars {
        let height = bars.bar_height();
        if height > 0.0 {
            let top = egui::Rect::from_min_size(screen.min, egui::vec2(screen.width(), height));
            let bottom = egui::Rect::from_min_max(
                egui::pos2(screen.min.x, screen.max.y - height),
                screen.max,
            );
            painter.rect_filled(top, 0.0, egui::Color32::BLACK);
            painter.rect_filled(bottom, 0.0, egui::Color32::BLACK);
        }
        if !bars.is_settled(mode) {
            ctx.request_repaint();
        }
    }

    if mode.shows_reticle() {
        let palette = Palette::new(state.selection().ship.theme());
        draw_reticle(&painter, screen.center(), time.elapsed_secs(), &palette);
    }

    Ok(())
}

/// Darkened screen edges fading to clear towards the centre.
fn vignette_mesh(screen: egui::Rect, opacity: f32) -> egui::Mesh {
    let edge = fade(egui::Color32::BLACK, opacity);
    let inset = screen.size().min_elem() * VIGNETTE_CLEAR * 0.5;
    let inner = screen.shrink(inset);

    let mut mesh = egui::Mesh::default();
    for corner in [
        screen.left_top(),
        screen.right_top(),
        screen.right_bottom(),
        screen.left_bottom(),
    ] {
        mesh.colored_vertex(corner, edge);
    }
    for corner in [
        inner.left_top(),
        inner.right_top(),
        inner.right_bottom(),
        inner.left_bottom(),
    ] {
        mesh.colored_vertex(corner, egui::Color32::TRANSPARENT);
    }

    // One trapezoid per screen edge: outer vertices 0..4, inner 4..8.
    for i in 0..4 {
        let j = (i + 1) % 4;
        mesh.add_triangle(i, j, j + 4);
        mesh.add_triangle(i, j + 4, i + 4);
    }
    mesh
}

fn draw_reticle(painter: &egui::Painter, center: egui::Pos2, elapsed: f32, palette: &Palette) {
    painter.circle_stroke(
        center,
        RETICLE_RADIUS,
        egui::Stroke::new(1.0, fade(palette.glow, 0.1)),
    );

    // Dashed inner ring, turning slowly.
    let radius = RETICLE_RADIUS - 10.0;
    let spin = (elapsed / RETICLE_PERIOD_SECS).fract() * TAU;
    let step = TAU / f32::from(RETICLE_DASHES);
    let stroke = egui::Stroke::new(1.0, fade(palette.glow, 0.2));
    for i in 0..RETICLE_DASHES {
        let start = spin + step * f32::from(i);
        let end = start + step * 0.5;
        painter.line_segment(
            [
                center + egui::vec2(start.cos(), start.sin()) * radius,
                center + egui::vec2(end.cos(), end.sin()) * radius,
            ],
            stroke,
        );
    }

    // Cross hairs, brightest at the centre.
    let segments = 8_u8;
    for k in 0..segments {
        let t0 = f32::from(k) / f32::from(segments);
        let t1 = f32::from(k + 1) / f32::from(segments);
        let alpha = 0.2 * (1.0 - ((t0 + t1) - 1.0).abs());
        let stroke = egui::Stroke::new(1.0, fade(palette.glow, alpha));
        let a = -RETICLE_RADIUS + 2.0 * RETICLE_RADIUS * t0;
        let b = -RETICLE_RADIUS + 2.0 * RETICLE_RADIUS * t1;
        painter.line_segment([center + egui::vec2(0.0, a), center + egui::vec2(0.0, b)], stroke);
        painter.line_segment([center + egui::vec2(a, 0.0), center + egui::vec2(b, 0.0)], stroke);
    }

    painter.ctx().request_repaint();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vignette_mesh_shape() {
        let screen = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0));
        let mesh = vignette_mesh(screen, 0.4);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices.len(), 24);
        // Outer corners carry the tint; inner corners are clear.
        assert!(mesh.vertices[..4].iter().all(|v| v.color.a() > 0));
        assert!(mesh.vertices[4..].iter().all(|v| v.color.a() == 0));
        assert!(mesh.vertices[4].pos.x > 0.0);
    }

    #[test]
    fn test_cinematic_vignette_is_darker() {
        let screen = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0));
        let cinematic = vignette_mesh(screen, hangar::ViewMode::Cinematic.vignette_opacity());
        let tactical = vignette_mesh(screen, hangar::ViewMode::Tactical.vignette_opacity());
        assert!(cinematic.vertices[0].color.a() > tactical.vertices[0].color.a());
    }
}
