//! Security Feed
//!
//! Opens the webcam, runs the weapon cascade on every frame and shows the
//! annotated feed until `q` is pressed. Prints `Gun Found` or `Gun Not Found`
//! on the way out.
//!
//! Usage:
//!     security_feed
//!     security_feed --cascade models/cascade_1.2.xml --camera 1

mod camera;
mod cascade;
mod convert;
mod window;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;
use weapon_watch::config::{DEFAULT_CASCADE_PATH, DEFAULT_DEVICE_INDEX, RetryPolicy};
use weapon_watch::error::{DeviceUnavailableError, DisplayError, ModelLoadError};
use weapon_watch::pipeline::Backend;
use weapon_watch::{SessionConfig, start};

use crate::camera::Camera;
use crate::cascade::HaarCascade;
use crate::window::Window;

#[derive(Parser, Debug)]
#[command(name = "security_feed")]
#[command(about = "Webcam weapon detection feed using a Haar cascade")]
#[command(version)]
struct Args {
    /// Haar cascade XML file
    #[arg(long, default_value = DEFAULT_CASCADE_PATH)]
    cascade: PathBuf,

    /// Capture device index
    #[arg(long, default_value_t = DEFAULT_DEVICE_INDEX)]
    camera: i32,

    /// Stop after this many consecutive failed frame reads (retries forever if unset)
    #[arg(long)]
    max_read_failures: Option<u32>,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Camera, cascade and window, all through OpenCV.
struct OpenCvBackend;

impl Backend for OpenCvBackend {
    type Source = Camera;
    type Detector = HaarCascade;
    type Display = Window;

    fn load_detector(&mut self, path: &Path) -> Result<HaarCascade, ModelLoadError> {
        HaarCascade::load(path)
    }

    fn open_source(&mut self, index: i32) -> Result<Camera, DeviceUnavailableError> {
        Camera::open(index)
    }

    fn open_display(&mut self, title: &str) -> Result<Window, DisplayError> {
        Window::open(title)
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // --- 1. Argument Parsing & Logging ---
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!("Security Feed {}", env!("CARGO_PKG_VERSION"));

    // --- 2. Session Configuration ---
    let config = SessionConfig {
        cascade_path: args.cascade,
        device_index: args.camera,
        retry: RetryPolicy {
            max_consecutive_failures: args.max_read_failures,
            ..RetryPolicy::default()
        },
        ..SessionConfig::default()
    };

    // --- 3. Startup: model, camera, window ---
    let mut session = start(&mut OpenCvBackend, config).context("failed to start security feed")?;

    // --- 4. Main Processing Loop ---
    let summary = session.run().context("security feed stopped unexpectedly")?;

    // --- 5. Summary & Teardown ---
    println!("{summary}");
    session.shutdown();
    Ok(())
}
