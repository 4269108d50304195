//! Weighted blending of an overlay onto a base image.

use image::{imageops::FilterType, GenericImageView, Pixel, Rgb, RgbImage};
use tracing::warn;

use crate::{OverlayError, Result};

/// Blends `overlay` over `background` as `background * (1 - alpha) + overlay * alpha`.
///
/// The overlay is resized to the background's dimensions and converted to
/// RGB first, so grayscale and RGBA overlays are accepted. Any failure is
/// logged and the background is returned unchanged.
pub fn blend<I>(background: &RgbImage, overlay: &I, alpha: f32) -> RgbImage
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8> + 'static,
{
    match try_blend(background, overlay, alpha) {
        Ok(blended) => blended,
        Err(err) => {
            warn!(error = %err, "error blending overlay, keeping background");
            background.clone()
        }
    }
}

/// Fallible form of [`blend`].
pub fn try_blend<I>(background: &RgbImage, overlay: &I, alpha: f32) -> Result<RgbImage>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8> + 'static,
{
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(OverlayError::InvalidBlend(format!(
            "alpha {alpha} outside [0, 1]"
        )));
    }

    let (width, height) = background.dimensions();
    if width == 0 || height == 0 {
        return Err(OverlayError::InvalidBlend("background is empty".into()));
    }

    let (overlay_width, overlay_height) = overlay.dimensions();
    if overlay_width == 0 || overlay_height == 0 {
        return Err(OverlayError::InvalidBlend(format!(
            "overlay is {overlay_width}x{overlay_height}"
        )));
    }

    let resized = image::imageops::resize(overlay, width, height, FilterType::Triangle);
    let keep = 1.0 - alpha;

    let mut blended = RgbImage::new(width, height);
    for ((out, base), over) in blended
        .pixels_mut()
        .zip(background.pixels())
        .zip(resized.pixels())
    {
        let over = over.to_rgb();
        *out = Rgb(std::array::from_fn(|channel| {
            let value = base[channel] as f32 * keep + over[channel] as f32 * alpha;
            value.round().clamp(0.0, 255.0) as u8
        }));
    }

    Ok(blended)
}
