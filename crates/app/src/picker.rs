use artmentor_core::{decode_image, ReferencePicker, Result};
use image::DynamicImage;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "tiff"];

/// Asks the user for a reference image through the native file dialog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileDialogPicker;

impl ReferencePicker for FileDialogPicker {
    fn pick(&mut self) -> Result<Option<DynamicImage>> {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Select Reference Image")
            .add_filter("Image files", &IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return Ok(None);
        };

        let image = decode_image(&path)?;
        tracing::info!(
            file = %path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default(),
            "reference image selected"
        );
        Ok(Some(image))
    }
}
