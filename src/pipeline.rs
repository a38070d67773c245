// THEORY:
// The `pipeline` module is the top-level API of the feed. It wires the four steps
// of a session into one owned object:
// 1.  **Startup** (`start`): load the model, then open the device, then open the
//     window. Each step is fatal on failure and a later step never runs after an
//     earlier one fails, so a bad model never touches the camera and a missing
//     camera never opens a window.
// 2.  **Frame Loop** (`Session::step`): read, resize, convert to luma, detect,
//     annotate, show, poll for the quit key. A failed read waits a fixed delay
//     and comes back around; it is never surfaced beyond a warning unless a retry
//     limit is configured.
// 3.  **State**: `Scanning` until the quit key is seen, then `Stopped` for good.
//     The only data carried between frames is the `SightingFlag`.
// 4.  **Teardown**: the session owns the device and the display and releases both
//     exactly once, on every exit path, through `Drop`.

use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::core_modules::capture::FrameSource;
use crate::core_modules::detection::{Detector, enforce_min_size};
use crate::core_modules::display::FeedDisplay;
use crate::core_modules::frame::{resize_to_width, to_luma};
use crate::core_modules::overlay::annotate;
use crate::core_modules::sighting::SightingFlag;
use crate::error::{
    DeviceUnavailableError, DisplayError, ModelLoadError, SessionError, StartupError,
};

/// Factory for the three external collaborators of a session.
pub trait Backend {
    type Source: FrameSource;
    type Detector: Detector;
    type Display: FeedDisplay;

    /// Parses the model at `path`. Must fail if the result is an empty model.
    fn load_detector(&mut self, path: &Path) -> Result<Self::Detector, ModelLoadError>;

    fn open_source(&mut self, index: i32) -> Result<Self::Source, DeviceUnavailableError>;

    fn open_display(&mut self, title: &str) -> Result<Self::Display, DisplayError>;
}

/// Brings a session up in order: model, device, display.
pub fn start<B: Backend>(
    backend: &mut B,
    config: SessionConfig,
) -> Result<Session<B::Source, B::Detector, B::Display>, StartupError> {
    // --- 1. Model ---
    if !config.cascade_path.is_file() {
        return Err(ModelLoadError::Missing {
            path: config.cascade_path.clone(),
        }
        .into());
    }
    let detector = backend.load_detector(&config.cascade_path)?;
    info!(path = %config.cascade_path.display(), "cascade loaded");

    // --- 2. Device ---
    let mut source = backend.open_source(config.device_index)?;
    info!(index = config.device_index, "camera opened");

    // --- 3. Display ---
    let display = match backend.open_display(&config.window_title) {
        Ok(display) => display,
        Err(err) => {
            source.release();
            return Err(err.into());
        }
    };

    Ok(Session::new(source, detector, display, config))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Scanning,
    Stopped,
}

/// What a single call to `Session::step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A frame went through the full pipeline.
    Processed { detections: usize },
    /// The read failed and the loop waited before the next attempt.
    Retried,
    Stopped,
}

/// The end-of-session report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub weapon_seen: bool,
    pub frames_processed: u64,
    pub read_failures: u64,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weapon_seen {
            f.write_str("Gun Found")
        } else {
            f.write_str("Gun Not Found")
        }
    }
}

/// One camera, one model, one window, for the lifetime of a run.
pub struct Session<S: FrameSource, D: Detector, V: FeedDisplay> {
    source: S,
    detector: D,
    display: V,
    config: SessionConfig,
    state: SessionState,
    sighting: SightingFlag,
    frames_processed: u64,
    read_failures: u64,
    consecutive_failures: u32,
    released: bool,
}

impl<S: FrameSource, D: Detector, V: FeedDisplay> Session<S, D, V> {
    pub fn new(source: S, detector: D, display: V, config: SessionConfig) -> Self {
        Self {
            source,
            detector,
            display,
            config,
            state: SessionState::Scanning,
            sighting: SightingFlag::new(),
            frames_processed: 0,
            read_failures: 0,
            consecutive_failures: 0,
            released: false,
        }
    }

    /// Runs the frame loop until the quit key is pressed.
    pub fn run(&mut self) -> Result<SessionSummary, SessionError> {
        info!(quit_key = %self.config.quit_key, "scanning");
        while self.step()? != Step::Stopped {}
        let summary = self.summary();
        info!(
            weapon_seen = summary.weapon_seen,
            frames = summary.frames_processed,
            read_failures = summary.read_failures,
            "session stopped"
        );
        Ok(summary)
    }

    /// Runs one iteration of the frame loop.
    pub fn step(&mut self) -> Result<Step, SessionError> {
        if self.state == SessionState::Stopped {
            return Ok(Step::Stopped);
        }

        // --- 1. Capture ---
        let frame = match self.source.read_frame() {
            Ok(Some(frame)) if frame.width() > 0 && frame.height() > 0 => frame,
            Ok(_) => return self.recover_from_failed_read("empty frame"),
            Err(err) => return self.recover_from_failed_read(&err.reason),
        };
        self.consecutive_failures = 0;

        // --- 2. Preprocess ---
        let frame = resize_to_width(&frame, self.config.frame_width);
        let gray = to_luma(&frame);

        // --- 3. Detect ---
        let raw = self.detector.detect(&gray, &self.config.detection)?;
        let detections = enforce_min_size(raw, self.config.detection.min_size);
        if !detections.is_empty() {
            debug!(count = detections.len(), "weapon candidates in frame");
        }
        if self.sighting.record(!detections.is_empty()) {
            info!(frame = self.frames_processed, "weapon sighted");
        }

        // --- 4. Annotate & Present ---
        let overlay = annotate(&detections);
        self.display.show(&frame, &overlay)?;
        self.frames_processed += 1;

        // --- 5. Quit Check ---
        let key = self.display.poll_key(self.config.key_poll)?;
        if self.is_quit(key) {
            return Ok(self.stop());
        }
        Ok(Step::Processed {
            detections: detections.len(),
        })
    }

    fn recover_from_failed_read(&mut self, reason: &str) -> Result<Step, SessionError> {
        self.read_failures += 1;
        self.consecutive_failures += 1;
        warn!(
            reason,
            attempt = self.consecutive_failures,
            "failed to capture frame, retrying"
        );

        if let Some(limit) = self.config.retry.max_consecutive_failures {
            if self.consecutive_failures > limit {
                return Err(SessionError::CaptureStalled {
                    failures: self.consecutive_failures,
                });
            }
        }

        let key = self.display.poll_key(self.config.retry.delay)?;
        if self.is_quit(key) {
            return Ok(self.stop());
        }
        Ok(Step::Retried)
    }

    fn is_quit(&self, key: Option<char>) -> bool {
        key == Some(self.config.quit_key)
    }

    fn stop(&mut self) -> Step {
        self.state = SessionState::Stopped;
        Step::Stopped
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn weapon_seen(&self) -> bool {
        self.sighting.is_set()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            weapon_seen: self.sighting.is_set(),
            frames_processed: self.frames_processed,
            read_failures: self.read_failures,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Releases the camera and closes the window.
    pub fn shutdown(mut self) {
        self.release_resources();
    }

    fn release_resources(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.source.release();
        self.display.close();
        info!("camera released, windows closed");
    }
}

impl<S: FrameSource, D: Detector, V: FeedDisplay> Drop for Session<S, D, V> {
    fn drop(&mut self) {
        self.release_resources();
    }
}
