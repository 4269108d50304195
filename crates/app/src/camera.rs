use artmentor_core::{FrameSource, OverlayError, Result, SessionConfig};
use image::RgbImage;
use nokhwa::{
    pixel_format::RgbFormat,
    utils::{CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution},
    Camera,
};

const REQUESTED_FPS: u32 = 30;

/// Live capture device. The stream is stopped when the source is dropped.
pub struct CameraSource {
    camera: Camera,
}

impl CameraSource {
    pub fn open(index: u32, config: &SessionConfig) -> Result<Self> {
        let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(config.frame_width, config.frame_height),
                FrameFormat::MJPEG,
                REQUESTED_FPS,
            ),
        ));

        let mut camera = Camera::new(CameraIndex::Index(index), format).map_err(unavailable)?;
        camera.open_stream().map_err(unavailable)?;
        tracing::info!(
            index,
            name = %camera.info().human_name(),
            resolution = ?camera.resolution(),
            "camera initialised"
        );

        Ok(Self { camera })
    }
}

impl FrameSource for CameraSource {
    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        let frame = self.camera.frame().map_err(unavailable)?;
        let decoded = frame.decode_image::<RgbFormat>().map_err(unavailable)?;
        let (width, height) = (decoded.width(), decoded.height());

        RgbImage::from_raw(width, height, decoded.into_raw())
            .map(Some)
            .ok_or_else(|| OverlayError::SourceUnavailable("camera returned a short frame".into()))
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        if let Err(err) = self.camera.stop_stream() {
            tracing::warn!(error = %err, "failed to stop camera stream");
        }
        tracing::debug!("camera released");
    }
}

fn unavailable(err: nokhwa::NokhwaError) -> OverlayError {
    OverlayError::SourceUnavailable(err.to_string())
}
