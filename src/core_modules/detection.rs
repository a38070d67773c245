// THEORY:
// The `detection` module is the contract with the object-detection model. The
// model itself is a black box: it takes a grayscale frame plus three scalar
// parameters and hands back zero or more axis-aligned boxes. This module owns the
// box type and the one rule the feed enforces on top of whatever the model
// returns: nothing smaller than the configured minimum size is ever reported.

use image::GrayImage;

use crate::config::DetectionParams;
use crate::error::DetectionError;

/// An axis-aligned box reported by the detector, in pixels of the resized frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Detection {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Detection {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top_left(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn bottom_right(&self) -> (i32, i32) {
        (self.x + self.width, self.y + self.height)
    }

    /// True if the box is at least `min_size` (width, height) in both dimensions.
    pub fn meets_min_size(&self, min_size: (u32, u32)) -> bool {
        i64::from(self.width) >= i64::from(min_size.0)
            && i64::from(self.height) >= i64::from(min_size.1)
    }
}

/// A loaded, query-able detection model.
pub trait Detector {
    /// Scans `gray` at multiple scales. An empty result is not an error.
    fn detect(
        &mut self,
        gray: &GrayImage,
        params: &DetectionParams,
    ) -> Result<Vec<Detection>, DetectionError>;
}

/// Drops every detection narrower or shorter than `min_size`, keeping order.
pub fn enforce_min_size(mut detections: Vec<Detection>, min_size: (u32, u32)) -> Vec<Detection> {
    detections.retain(|d| d.meets_min_size(min_size));
    detections
}
