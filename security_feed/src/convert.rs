//! Copies between OpenCV `Mat`s and `image` buffers.

use image::{GrayImage, RgbImage};
use opencv::{
    core::{self, Mat, Scalar},
    imgproc,
    prelude::*,
};

/// Converts a BGR capture into an owned RGB image.
pub fn bgr_mat_to_rgb(bgr: &Mat, scratch: &mut Mat) -> opencv::Result<Option<RgbImage>> {
    imgproc::cvt_color(bgr, scratch, imgproc::COLOR_BGR2RGB, 0)?;
    let (width, height) = (scratch.cols() as u32, scratch.rows() as u32);
    let data = scratch.data_bytes()?.to_vec();
    Ok(RgbImage::from_raw(width, height, data))
}

/// Builds a BGR `Mat` from an RGB image, ready for drawing and display.
pub fn rgb_to_bgr_mat(frame: &RgbImage) -> opencv::Result<Mat> {
    let mut rgb = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        core::CV_8UC3,
        Scalar::all(0.0),
    )?;
    rgb.data_bytes_mut()?.copy_from_slice(frame.as_raw());

    let mut bgr = Mat::default();
    imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0)?;
    Ok(bgr)
}

/// Copies a grayscale image into `target`, reallocating only when the size changes.
pub fn gray_into_mat(gray: &GrayImage, target: &mut Mat) -> opencv::Result<()> {
    let (rows, cols) = (gray.height() as i32, gray.width() as i32);
    if target.rows() != rows || target.cols() != cols || target.typ() != core::CV_8UC1 {
        *target = Mat::new_rows_cols_with_default(rows, cols, core::CV_8UC1, Scalar::all(0.0))?;
    }
    target.data_bytes_mut()?.copy_from_slice(gray.as_raw());
    Ok(())
}
