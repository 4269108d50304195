//! Fixed UI strip drawn on top of every composed frame.

use image::{Rgb, RgbImage};

use super::{
    draw::{self, BLACK, CYAN, GREEN, RED, WHITE},
    text::{draw_text, text_width},
};
use crate::{AppState, Mode};

const HINT_COLOR: Rgb<u8> = Rgb([200, 200, 200]);

pub const CONTROL_HINTS: [&str; 5] = [
    "SPACE: Action",
    "M: Switch Mode",
    "D: Detect/Load",
    "O: Toggle Overlay",
    "Q: Quit",
];

/// Status line for the current mode and whether it reads as satisfied.
pub fn status_line(state: &AppState) -> (&'static str, bool) {
    match state.mode {
        Mode::TraceProjection if state.surface_detected => ("Surface Detected", true),
        Mode::TraceProjection => ("No Surface", false),
        Mode::ReferenceImage if state.has_reference() => ("Image Loaded", true),
        Mode::ReferenceImage => ("No Image", false),
        Mode::Model3D if state.has_model() => ("Model Loaded", true),
        Mode::Model3D => ("No Model", false),
    }
}

pub fn draw_hud(frame: &mut RgbImage, state: &AppState) {
    let width = frame.width() as i32;

    let label = format!("Mode: {}", state.mode.display_name());
    // The label box stretches to fit the longest mode name.
    let box_right = (20 + text_width(&label, 2) as i32 + 10).max(300);
    draw::rect_filled(frame, (10, 10), (box_right, 70), BLACK);
    draw::rect_outline(frame, (10, 10), (box_right, 70), WHITE, 2);
    draw_text(frame, 20, 35, &label, 2, WHITE);

    let (status, satisfied) = status_line(state);
    draw_text(frame, 20, 60, status, 2, if satisfied { GREEN } else { CYAN });

    let indicator = if state.overlay_visible {
        "Overlay: ON"
    } else {
        "Overlay: OFF"
    };
    let indicator_color = if state.overlay_visible { GREEN } else { RED };
    let indicator_x = width - text_width(indicator, 2) as i32 - 20;
    draw_text(frame, indicator_x, 30, indicator, 2, indicator_color);

    let widest_hint = CONTROL_HINTS
        .iter()
        .map(|hint| text_width(hint, 2))
        .max()
        .unwrap_or(0);
    let hints_x = width - widest_hint as i32 - 20;
    for (row, hint) in CONTROL_HINTS.iter().enumerate() {
        draw_text(frame, hints_x, 60 + row as i32 * 22, hint, 2, HINT_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelDescriptor;

    #[test]
    fn status_tracks_the_active_mode_only() {
        let mut state = AppState::default();
        assert_eq!(status_line(&state), ("No Surface", false));

        state.toggle_surface_detected();
        assert_eq!(status_line(&state), ("Surface Detected", true));

        state.cycle_mode();
        assert_eq!(status_line(&state), ("No Image", false));

        state.cycle_mode();
        state.set_model(ModelDescriptor::default_cube());
        assert_eq!(status_line(&state), ("Model Loaded", true));
    }

    #[test]
    fn label_box_is_opaque() {
        let mut frame = RgbImage::from_pixel(1280, 720, Rgb([90, 90, 90]));
        draw_hud(&mut frame, &AppState::default());
        assert_eq!(*frame.get_pixel(295, 65), BLACK);
        assert_eq!(*frame.get_pixel(10, 40), WHITE);
        assert_eq!(*frame.get_pixel(640, 360), Rgb([90, 90, 90]));
    }

    #[test]
    fn label_box_fits_the_longest_mode_name() {
        let mut frame = RgbImage::from_pixel(1280, 720, Rgb([90, 90, 90]));
        draw_hud(&mut frame, &AppState::default());
        let label_end = 20 + text_width("Mode: Trace Projection", 2);
        assert_eq!(*frame.get_pixel(label_end + 5, 65), BLACK);
        assert_eq!(*frame.get_pixel(label_end + 30, 65), Rgb([90, 90, 90]));
    }

    #[test]
    fn tolerates_tiny_frames() {
        let mut frame = RgbImage::new(32, 24);
        draw_hud(&mut frame, &AppState::default());
    }
}
