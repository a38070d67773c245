// THEORY:
// All of the tuning knobs of the feed live here as named values instead of
// inline literals. `SessionConfig::default()` reproduces the stock behavior:
// the `cascade_1.2.xml` model, camera 0, 500 px frames, scale step 1.05,
// 25 neighbours, 120x120 minimum size and a 50 ms wait between failed reads.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CASCADE_PATH: &str = "cascade_1.2.xml";
pub const DEFAULT_DEVICE_INDEX: i32 = 0;
pub const DEFAULT_WINDOW_TITLE: &str = "Security Feed";
pub const DEFAULT_FRAME_WIDTH: u32 = 500;
pub const DEFAULT_SCALE_FACTOR: f64 = 1.05;
pub const DEFAULT_MIN_NEIGHBORS: i32 = 25;
pub const DEFAULT_MIN_OBJECT_SIZE: u32 = 120;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(50);
pub const DEFAULT_KEY_POLL: Duration = Duration::from_millis(1);
pub const DEFAULT_QUIT_KEY: char = 'q';

/// Parameters handed to the cascade on every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    /// How much the image shrinks between scan scales (1.05 = 5% per step).
    pub scale_factor: f64,
    /// Overlapping hits required before a candidate is reported.
    pub min_neighbors: i32,
    /// Smallest accepted detection, (width, height) in pixels.
    pub min_size: (u32, u32),
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            min_size: (DEFAULT_MIN_OBJECT_SIZE, DEFAULT_MIN_OBJECT_SIZE),
        }
    }
}

/// What the frame loop does when a read comes back empty or fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed wait before the next read attempt. There is no backoff growth.
    pub delay: Duration,
    /// `None` retries forever. `Some(n)` gives up after `n` consecutive failures.
    pub max_consecutive_failures: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: DEFAULT_RETRY_DELAY,
            max_consecutive_failures: None,
        }
    }
}

/// Configuration for a `Session`, allowing for tunable behavior.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cascade_path: PathBuf,
    pub device_index: i32,
    pub window_title: String,
    /// Frames are resized to this width before detection, keeping aspect ratio.
    pub frame_width: u32,
    pub detection: DetectionParams,
    pub retry: RetryPolicy,
    /// How long the display is polled for a key after each shown frame.
    pub key_poll: Duration,
    pub quit_key: char,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cascade_path: PathBuf::from(DEFAULT_CASCADE_PATH),
            device_index: DEFAULT_DEVICE_INDEX,
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            frame_width: DEFAULT_FRAME_WIDTH,
            detection: DetectionParams::default(),
            retry: RetryPolicy::default(),
            key_poll: DEFAULT_KEY_POLL,
            quit_key: DEFAULT_QUIT_KEY,
        }
    }
}
