//! OpenCV-backed capture device.

use image::RgbImage;
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture},
};
use tracing::warn;
use weapon_watch::core_modules::capture::FrameSource;
use weapon_watch::error::{CaptureError, DeviceUnavailableError};

use crate::convert::bgr_mat_to_rgb;

pub struct Camera {
    capture: VideoCapture,
    raw: Mat,
    rgb: Mat,
}

impl Camera {
    /// Opens capture device `index` with whatever backend OpenCV prefers.
    pub fn open(index: i32) -> Result<Self, DeviceUnavailableError> {
        let unavailable = |reason: String| DeviceUnavailableError { index, reason };

        let capture = VideoCapture::new(index, videoio::CAP_ANY).map_err(|e| unavailable(e.to_string()))?;
        let opened = capture.is_opened().map_err(|e| unavailable(e.to_string()))?;
        if !opened {
            return Err(unavailable(
                "check permissions and ensure no other app is using it".to_string(),
            ));
        }

        Ok(Self {
            capture,
            raw: Mat::default(),
            rgb: Mat::default(),
        })
    }
}

impl FrameSource for Camera {
    fn read_frame(&mut self) -> Result<Option<RgbImage>, CaptureError> {
        let grabbed = self
            .capture
            .read(&mut self.raw)
            .map_err(|e| CaptureError { reason: e.to_string() })?;
        if !grabbed || self.raw.empty() {
            return Ok(None);
        }

        bgr_mat_to_rgb(&self.raw, &mut self.rgb).map_err(|e| CaptureError { reason: e.to_string() })
    }

    fn release(&mut self) {
        if let Err(err) = self.capture.release() {
            warn!(error = %err, "failed to release camera");
        }
    }
}
