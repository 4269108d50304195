use image::{Rgb, RgbImage};

use crate::{
    render::{draw, text::draw_text},
    session::FrameSource,
    Result,
};

const FILL: Rgb<u8> = Rgb([40, 40, 40]);
const GRID: Rgb<u8> = Rgb([60, 60, 60]);
const CROSSHAIR: Rgb<u8> = Rgb([80, 80, 80]);
const CAPTION: Rgb<u8> = Rgb([100, 100, 100]);
const GRID_SPACING: usize = 100;

/// Dark gray canvas with a 100 px grid and a centre crosshair, used when no
/// camera is attached.
pub fn test_background(width: u32, height: u32) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, FILL);
    let (w, h) = (width as i32, height as i32);

    for x in (0..w).step_by(GRID_SPACING) {
        draw::line(&mut image, (x, 0), (x, h), GRID, 1);
    }
    for y in (0..h).step_by(GRID_SPACING) {
        draw::line(&mut image, (0, y), (w, y), GRID, 1);
    }

    draw::line(&mut image, (w / 2, 0), (w / 2, h), CROSSHAIR, 2);
    draw::line(&mut image, (0, h / 2), (w, h / 2), CROSSHAIR, 2);
    draw_text(&mut image, 50, 50, "ArtMentor Test Background", 3, CAPTION);
    image
}

/// Frame source that yields the synthetic background forever.
#[derive(Debug, Clone)]
pub struct StaticSource {
    background: RgbImage,
}

impl StaticSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            background: test_background(width, height),
        }
    }
}

impl FrameSource for StaticSource {
    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        Ok(Some(self.background.clone()))
    }
}
