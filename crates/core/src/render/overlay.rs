//! Mode specific overlays.

use image::{Rgb, RgbImage};
use tracing::debug;

use super::{
    blend::blend,
    draw::{self, BLUE, GREEN, RED, WHITE, YELLOW},
    text::{draw_text, draw_text_centered},
};
use crate::{assets::TemplateSource, ModelDescriptor};

const FRONT_FACE: Rgb<u8> = Rgb([200, 50, 50]);
const BACK_FACE: Rgb<u8> = Rgb([230, 80, 80]);

pub const DETECTION_PROMPT: &str = "Place paper here and press D to detect";

fn half_size(image: &RgbImage) -> (i32, i32) {
    (image.width() as i32 / 2, image.height() as i32 / 2)
}

/// Lengths tuned for 720 lines, scaled to the frame's shorter side.
fn scaled(image: &RgbImage, length: f32) -> i32 {
    let short_side = image.width().min(image.height()) as f32;
    (length * short_side / 720.0).round().max(1.0) as i32
}

/// Detection hint: a centred rectangle covering half of each dimension.
pub fn trace_prompt(frame: &mut RgbImage) {
    let (w, h) = (frame.width() as i32, frame.height() as i32);
    draw::rect_outline(frame, (w / 4, h / 4), (3 * w / 4, 3 * h / 4), YELLOW, 2);
    draw_text(frame, w / 4, h / 4 - 10, DETECTION_PROMPT, 2, YELLOW);
}

/// Template silhouette shown once a surface is detected. Falls back to a
/// directly drawn circle when the catalog has no entry for `template`.
pub fn trace_template(
    frame: RgbImage,
    templates: &dyn TemplateSource,
    template: &str,
    alpha: f32,
) -> RgbImage {
    if let Some(silhouette) = templates.lookup(template) {
        return blend(&frame, silhouette, alpha);
    }

    debug!(template, "template missing from catalog, drawing default circle");
    let mut frame = frame;
    let center = half_size(&frame);
    let radius = frame.width().min(frame.height()) as i32 / 6;
    draw::circle_outline(&mut frame, center, radius, GREEN, 3);
    draw_text_centered(
        &mut frame,
        center.0,
        center.1 + radius + 30,
        "Circle Template",
        2,
        GREEN,
    );
    frame
}

pub fn reference_placeholder(frame: &mut RgbImage) {
    let h = frame.height() as i32;
    draw_text(frame, 50, h / 2, "No reference image loaded", 3, WHITE);
    draw_text(frame, 50, h / 2 + 40, "Press D to load image", 2, WHITE);
}

pub fn reference_blend(frame: &RgbImage, reference: &RgbImage, alpha: f32) -> RgbImage {
    blend(frame, reference, alpha)
}

pub fn model_placeholder(frame: &mut RgbImage) {
    let h = frame.height() as i32;
    draw_text(frame, 50, h / 2, "No 3D model loaded", 3, WHITE);
}

pub fn cube_caption(model: &ModelDescriptor, angle: u32) -> String {
    format!("{} (rotating: {angle}°)", model.name)
}

/// Stylised cube: back face, connecting edges, then the filled front face.
pub fn model_cube(frame: &mut RgbImage, model: &ModelDescriptor, angle: u32) {
    let (cx, cy) = half_size(frame);
    let size = scaled(frame, 80.0);
    let depth = scaled(frame, 30.0);

    let front = [
        (cx - size, cy - size),
        (cx + size, cy - size),
        (cx + size, cy + size),
        (cx - size, cy + size),
    ];
    let back = front.map(|(x, y)| (x + depth, y - depth));

    draw::polygon_filled(frame, &back, BACK_FACE);
    draw::polyline(frame, &back, true, WHITE, 2);
    for (from, to) in front.iter().zip(back.iter()) {
        draw::line(frame, *from, *to, WHITE, 2);
    }
    draw::polygon_filled(frame, &front, FRONT_FACE);
    draw::polyline(frame, &front, true, WHITE, 2);

    draw_text_centered(frame, cx, cy + size + 40, &cube_caption(model, angle), 2, WHITE);
    model_axes(frame);
}

/// Reference axes in the bottom-left corner: X red, Y green, Z blue.
fn model_axes(frame: &mut RgbImage) {
    let origin = (50, frame.height() as i32 - 50);
    let length = scaled(frame, 80.0);
    let diagonal = scaled(frame, 30.0);

    let x_end = (origin.0 + length, origin.1);
    let y_end = (origin.0, origin.1 - length);
    let z_end = (origin.0 + diagonal, origin.1 - diagonal);

    draw::arrow(frame, origin, x_end, RED, 3);
    draw::arrow(frame, origin, y_end, GREEN, 3);
    draw::arrow(frame, origin, z_end, BLUE, 3);

    draw_text(frame, x_end.0 + 10, x_end.1 + 5, "X", 2, RED);
    draw_text(frame, y_end.0 + 5, y_end.1 - 10, "Y", 2, GREEN);
    draw_text(frame, z_end.0 + 5, z_end.1 - 5, "Z", 2, BLUE);
}
