use std::time::Duration;

use image::RgbImage;

use crate::core_modules::overlay::Overlay;
use crate::error::DisplayError;

/// The on-screen surface the annotated feed is shown on.
pub trait FeedDisplay {
    /// Paints `overlay` onto `frame` and presents it.
    fn show(&mut self, frame: &RgbImage, overlay: &Overlay) -> Result<(), DisplayError>;

    /// Waits up to `timeout` for a keypress. Doubles as the retry delay.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<char>, DisplayError>;

    /// Closes every window this display opened. Called once, when the session ends.
    fn close(&mut self);
}
