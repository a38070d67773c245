use image::RgbImage;

use crate::error::CaptureError;

/// A capture device handing out color frames.
pub trait FrameSource {
    /// Reads the next frame. `Ok(None)` means the device answered with no data.
    fn read_frame(&mut self) -> Result<Option<RgbImage>, CaptureError>;

    /// Gives the device back to the system. Called once, when the session ends.
    fn release(&mut self);
}
