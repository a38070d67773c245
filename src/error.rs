//! Error taxonomy for the feed.
//!
//! Startup errors are fatal and stop the process before the frame loop runs.
//! `CaptureError` is the only transient class; the frame loop absorbs it.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("cascade file {} not found", path.display())]
    Missing { path: PathBuf },
    #[error("cascade file {} failed to load: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
#[error("failed to open camera at index {index}: {reason}")]
pub struct DeviceUnavailableError {
    pub index: i32,
    pub reason: String,
}

#[derive(Debug, Error)]
#[error("display error: {reason}")]
pub struct DisplayError {
    pub reason: String,
}

#[derive(Debug, Error)]
#[error("detection failed: {reason}")]
pub struct DetectionError {
    pub reason: String,
}

/// A single failed frame read.
#[derive(Debug, Error)]
#[error("frame capture failed: {reason}")]
pub struct CaptureError {
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Model(#[from] ModelLoadError),
    #[error(transparent)]
    Device(#[from] DeviceUnavailableError),
    #[error(transparent)]
    Display(#[from] DisplayError),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("camera produced no frame after {failures} consecutive attempts")]
    CaptureStalled { failures: u32 },
    #[error(transparent)]
    Detection(#[from] DetectionError),
    #[error(transparent)]
    Display(#[from] DisplayError),
}
