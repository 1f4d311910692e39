//! CJK fallback font for localized ship and faction names.
//!
//! The default egui fonts have no CJK glyphs. On native builds the first
//! system CJK font found is appended as a fallback to both families; in the
//! browser the defaults stay and CJK text falls back to placeholder glyphs.

use std::sync::Arc;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

const FONT_NAME: &str = "cjk-fallback";

/// Common install locations, checked in order.
#[cfg(not(target_family = "wasm"))]
const SYSTEM_CJK_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
];

/// Marker inserted once fonts have been configured.
#[derive(Resource)]
pub(super) struct HasInitialisedFonts;

pub(super) fn setup_fonts(mut contexts: EguiContexts, mut commands: Commands) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    if let Some(bytes) = load_cjk_font() {
        ctx.set_fonts(with_fallback(egui::FontDefinitions::default(), bytes));
    }
    commands.insert_resource(HasInitialisedFonts);
}

/// Append `bytes` as the last fallback of every font family.
fn with_fallback(mut fonts: egui::FontDefinitions, bytes: Vec<u8>) -> egui::FontDefinitions {
    fonts
        .font_data
        .insert(FONT_NAME.into(), Arc::new(egui::FontData::from_owned(bytes)));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(FONT_NAME.into());
    }
    fonts
}

#[cfg(not(target_family = "wasm"))]
fn load_cjk_font() -> Option<Vec<u8>> {
    for path in SYSTEM_CJK_FONTS {
        match std::fs::read(path) {
            Ok(bytes) => {
                tracing::info!("Using CJK font {path}");
                return Some(bytes);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::debug!("Skipping CJK font {path}: {e}"),
        }
    }
    tracing::warn!("No CJK font found, localized names will not render");
    None
}

#[cfg(target_family = "wasm")]
fn load_cjk_font() -> Option<Vec<u8>> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_appended_last() {
        let fonts = with_fallback(egui::FontDefinitions::default(), vec![0; 4]);
        assert!(fonts.font_data.contains_key(FONT_NAME));
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            let names = &fonts.families[&family];
            assert_eq!(names.last().map(String::as_str), Some(FONT_NAME));
            assert!(names.len() > 1);
        }
    }
}
