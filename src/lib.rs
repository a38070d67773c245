// THEORY:
// This file is the main entry point for the `weapon_watch` library crate.
// It exposes the `Session` frame loop and the small set of traits a capture
// backend has to implement (`FrameSource`, `Detector`, `FeedDisplay`,
// `Backend`). Everything that touches a real camera, a cascade file, or a
// window lives in the `security_feed` binary; this crate only holds the
// decisions: what to resize to, what counts as a detection, what gets drawn,
// and when the session stops.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod pipeline;

pub use config::SessionConfig;
pub use error::{SessionError, StartupError};
pub use pipeline::{Session, SessionState, SessionSummary, start};
