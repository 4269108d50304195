use std::{collections::HashMap, path::Path};

use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use tracing::debug;

use crate::{
    input::ReferencePicker,
    render::draw::{self, GREEN},
    Result,
};

/// Side length of the procedurally drawn templates.
const TEMPLATE_SIZE: u32 = 400;
const SKETCH_COLOR: Rgb<u8> = Rgb([255, 150, 100]);

/// Lookup of named template images shown in trace projection mode.
pub trait TemplateSource {
    fn lookup(&self, name: &str) -> Option<&RgbImage>;
}

/// Registry of template silhouettes keyed by name.
#[derive(Debug, Default)]
pub struct TemplateCatalog {
    templates: HashMap<String, RgbImage>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Catalog pre-populated with the `circle`, `square` and `triangle` shapes.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register("circle", circle_template());
        catalog.register("square", square_template());
        catalog.register("triangle", triangle_template());
        catalog
    }

    pub fn register(&mut self, name: impl Into<String>, image: RgbImage) {
        self.templates.insert(name.into(), image);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateSource for TemplateCatalog {
    fn lookup(&self, name: &str) -> Option<&RgbImage> {
        self.templates.get(name)
    }
}

fn blank_template() -> RgbImage {
    RgbImage::new(TEMPLATE_SIZE, TEMPLATE_SIZE)
}

fn circle_template() -> RgbImage {
    let mut image = blank_template();
    draw::circle_outline(&mut image, (200, 200), 150, GREEN, 3);
    image
}

fn square_template() -> RgbImage {
    let mut image = blank_template();
    draw::rect_outline(&mut image, (50, 50), (350, 350), GREEN, 3);
    image
}

fn triangle_template() -> RgbImage {
    let mut image = blank_template();
    draw::polyline(&mut image, &[(200, 50), (50, 350), (350, 350)], true, GREEN, 3);
    image
}

/// Decodes an image file, guessing the format from its contents.
pub fn decode_image(path: &Path) -> Result<DynamicImage> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    debug!(path = %path.display(), width = image.width(), height = image.height(), "decoded image");
    Ok(image)
}

/// Line drawing of a building facade, laid out on a 1280x720 grid and
/// scaled to the requested size.
pub fn architectural_sketch(width: u32, height: u32) -> RgbImage {
    let mut image = RgbImage::new(width, height);
    let sx = width as f32 / 1280.0;
    let sy = height as f32 / 720.0;
    let at = |x: i32, y: i32| ((x as f32 * sx).round() as i32, (y as f32 * sy).round() as i32);
    let radius = (30.0 * sx.min(sy)).round() as i32;

    draw::rect_outline(&mut image, at(340, 160), at(940, 560), SKETCH_COLOR, 2);
    draw::line(&mut image, at(340, 280), at(940, 280), SKETCH_COLOR, 2);
    draw::line(&mut image, at(640, 160), at(640, 560), SKETCH_COLOR, 2);
    draw::circle_outline(&mut image, at(490, 220), radius, SKETCH_COLOR, 2);
    draw::circle_outline(&mut image, at(790, 220), radius, SKETCH_COLOR, 2);
    draw::rect_outline(&mut image, at(590, 300), at(690, 400), SKETCH_COLOR, 2);
    image
}

/// Reference picker that always yields the built-in architectural sketch.
#[derive(Debug, Clone, Copy)]
pub struct SketchPicker {
    width: u32,
    height: u32,
}

impl SketchPicker {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl ReferencePicker for SketchPicker {
    fn pick(&mut self) -> Result<Option<DynamicImage>> {
        Ok(Some(DynamicImage::ImageRgb8(architectural_sketch(
            self.width,
            self.height,
        ))))
    }
}
