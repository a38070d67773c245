//! `highgui` window that paints the overlay and polls the keyboard.

use std::time::Duration;

use image::RgbImage;
use opencv::{
    core::{Mat, Point, Scalar},
    highgui, imgproc,
};
use tracing::warn;
use weapon_watch::core_modules::display::FeedDisplay;
use weapon_watch::core_modules::overlay::{Color, Overlay};
use weapon_watch::error::DisplayError;

use crate::convert::rgb_to_bgr_mat;

pub struct Window {
    title: String,
}

impl Window {
    pub fn open(title: &str) -> Result<Self, DisplayError> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE).map_err(display_error)?;
        Ok(Self {
            title: title.to_string(),
        })
    }
}

impl FeedDisplay for Window {
    fn show(&mut self, frame: &RgbImage, overlay: &Overlay) -> Result<(), DisplayError> {
        let mut canvas = rgb_to_bgr_mat(frame).map_err(display_error)?;
        paint(&mut canvas, overlay).map_err(display_error)?;
        highgui::imshow(&self.title, &canvas).map_err(display_error)
    }

    fn poll_key(&mut self, timeout: Duration) -> Result<Option<char>, DisplayError> {
        // wait_key(0) blocks forever.
        let delay = timeout.as_millis().clamp(1, i32::MAX as u128) as i32;
        let key = highgui::wait_key(delay).map_err(display_error)?;
        if key < 0 {
            return Ok(None);
        }
        Ok(Some(char::from((key & 0xFF) as u8)))
    }

    fn close(&mut self) {
        if let Err(err) = highgui::destroy_all_windows() {
            warn!(error = %err, "failed to close windows");
        }
    }
}

fn paint(canvas: &mut Mat, overlay: &Overlay) -> opencv::Result<()> {
    let banner = &overlay.banner;
    imgproc::put_text(
        canvas,
        banner.text,
        Point::new(banner.origin.x, banner.origin.y),
        imgproc::FONT_HERSHEY_SIMPLEX,
        banner.font_scale,
        scalar(banner.color),
        banner.thickness,
        imgproc::LINE_8,
        false,
    )?;

    for outline in &overlay.outlines {
        imgproc::rectangle_points(
            canvas,
            Point::new(outline.top_left.x, outline.top_left.y),
            Point::new(outline.bottom_right.x, outline.bottom_right.y),
            scalar(outline.color),
            outline.thickness,
            imgproc::LINE_8,
            0,
        )?;
    }
    Ok(())
}

fn scalar(color: Color) -> Scalar {
    Scalar::new(f64::from(color.b), f64::from(color.g), f64::from(color.r), 0.0)
}

fn display_error(err: opencv::Error) -> DisplayError {
    DisplayError {
        reason: err.to_string(),
    }
}
