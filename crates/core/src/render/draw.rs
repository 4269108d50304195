//! Thick-stroke helpers layered over `imageproc`'s one-pixel primitives.

use image::{Rgb, RgbImage};
use imageproc::{
    drawing::{
        draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_polygon_mut,
    },
    point::Point,
    rect::Rect,
};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
pub const CYAN: Rgb<u8> = Rgb([0, 255, 255]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

pub type Vertex = (i32, i32);

/// Straight line `thickness` pixels wide, drawn as a bundle of offset segments.
pub fn line(image: &mut RgbImage, from: Vertex, to: Vertex, color: Rgb<u8>, thickness: u32) {
    let spread = offsets(thickness);
    for &dx in &spread {
        for &dy in &spread {
            draw_line_segment_mut(
                image,
                ((from.0 + dx) as f32, (from.1 + dy) as f32),
                ((to.0 + dx) as f32, (to.1 + dy) as f32),
                color,
            );
        }
    }
}

/// Outline of the axis-aligned rectangle spanning `top_left` to `bottom_right`.
pub fn rect_outline(
    image: &mut RgbImage,
    top_left: Vertex,
    bottom_right: Vertex,
    color: Rgb<u8>,
    thickness: u32,
) {
    let (x0, y0) = top_left;
    let (x1, y1) = bottom_right;
    polyline(image, &[(x0, y0), (x1, y0), (x1, y1), (x0, y1)], true, color, thickness);
}

/// Solid rectangle spanning `top_left` to `bottom_right`, both inclusive.
pub fn rect_filled(image: &mut RgbImage, top_left: Vertex, bottom_right: Vertex, color: Rgb<u8>) {
    let width = (bottom_right.0 - top_left.0 + 1).max(0) as u32;
    let height = (bottom_right.1 - top_left.1 + 1).max(0) as u32;
    if width == 0 || height == 0 {
        return;
    }
    draw_filled_rect_mut(
        image,
        Rect::at(top_left.0, top_left.1).of_size(width, height),
        color,
    );
}

pub fn circle_outline(
    image: &mut RgbImage,
    center: Vertex,
    radius: i32,
    color: Rgb<u8>,
    thickness: u32,
) {
    for offset in offsets(thickness) {
        let r = radius + offset;
        if r > 0 {
            draw_hollow_circle_mut(image, center, r, color);
        }
    }
}

/// Connects consecutive vertices, closing the loop when `closed` is set.
pub fn polyline(
    image: &mut RgbImage,
    vertices: &[Vertex],
    closed: bool,
    color: Rgb<u8>,
    thickness: u32,
) {
    for pair in vertices.windows(2) {
        line(image, pair[0], pair[1], color, thickness);
    }
    if closed && vertices.len() > 2 {
        line(image, vertices[vertices.len() - 1], vertices[0], color, thickness);
    }
}

pub fn polygon_filled(image: &mut RgbImage, vertices: &[Vertex], color: Rgb<u8>) {
    let mut points: Vec<Point<i32>> = vertices.iter().map(|&(x, y)| Point::new(x, y)).collect();
    // imageproc rejects polygons whose first and last vertex coincide.
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return;
    }
    draw_polygon_mut(image, &points, color);
}

/// Line with an arrow head at `to`; the head is a tenth of the shaft length.
pub fn arrow(image: &mut RgbImage, from: Vertex, to: Vertex, color: Rgb<u8>, thickness: u32) {
    let dx = (from.0 - to.0) as f32;
    let dy = (from.1 - to.1) as f32;
    let length = (dx * dx + dy * dy).sqrt();
    if length < f32::EPSILON {
        return;
    }

    line(image, from, to, color, thickness);

    let tip = length * 0.1;
    let angle = dy.atan2(dx);
    for side in [std::f32::consts::FRAC_PI_4, -std::f32::consts::FRAC_PI_4] {
        let head = (
            to.0 + (tip * (angle + side).cos()).round() as i32,
            to.1 + (tip * (angle + side).sin()).round() as i32,
        );
        line(image, to, head, color, thickness);
    }
}

fn offsets(thickness: u32) -> Vec<i32> {
    let thickness = thickness.max(1) as i32;
    let low = -(thickness - 1) / 2;
    (low..low + thickness).collect()
}
