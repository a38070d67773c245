#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use image::{GrayImage, Rgb, RgbImage};
use tempfile::NamedTempFile;
use weapon_watch::config::{DetectionParams, SessionConfig};
use weapon_watch::core_modules::capture::FrameSource;
use weapon_watch::core_modules::detection::{Detection, Detector};
use weapon_watch::core_modules::display::FeedDisplay;
use weapon_watch::core_modules::overlay::Overlay;
use weapon_watch::error::{
    CaptureError, DetectionError, DeviceUnavailableError, DisplayError, ModelLoadError,
};
use weapon_watch::pipeline::{Backend, Session};

/// Everything the fakes saw, shared so it can be inspected after the session is gone.
#[derive(Debug, Default)]
pub struct Journal {
    pub events: Vec<&'static str>,
    pub reads: u32,
    pub detect_inputs: Vec<(u32, u32)>,
    pub shown: Vec<Overlay>,
    pub shown_sizes: Vec<(u32, u32)>,
    pub polls: Vec<Duration>,
    pub released: u32,
    pub closed: u32,
}

pub type SharedJournal = Rc<RefCell<Journal>>;

pub fn journal() -> SharedJournal {
    Rc::new(RefCell::new(Journal::default()))
}

pub enum Read {
    Frame(RgbImage),
    Empty,
    Fail,
}

pub fn camera_frame() -> RgbImage {
    RgbImage::from_pixel(640, 480, Rgb([90, 90, 90]))
}

pub struct ScriptedSource {
    reads: VecDeque<Read>,
    journal: SharedJournal,
}

impl ScriptedSource {
    pub fn new(reads: impl IntoIterator<Item = Read>, journal: &SharedJournal) -> Self {
        Self {
            reads: reads.into_iter().collect(),
            journal: Rc::clone(journal),
        }
    }
}

impl FrameSource for ScriptedSource {
    fn read_frame(&mut self) -> Result<Option<RgbImage>, CaptureError> {
        self.journal.borrow_mut().reads += 1;
        match self.reads.pop_front() {
            Some(Read::Frame(frame)) => Ok(Some(frame)),
            Some(Read::Empty) => Ok(None),
            Some(Read::Fail) => Err(CaptureError {
                reason: "device timeout".to_string(),
            }),
            None => Ok(Some(camera_frame())),
        }
    }

    fn release(&mut self) {
        self.journal.borrow_mut().released += 1;
    }
}

/// Returns one scripted result per call, then nothing.
pub struct ScriptedDetector {
    results: VecDeque<Result<Vec<Detection>, DetectionError>>,
    journal: SharedJournal,
}

impl ScriptedDetector {
    pub fn new(results: impl IntoIterator<Item = Vec<Detection>>, journal: &SharedJournal) -> Self {
        Self {
            results: results.into_iter().map(Ok).collect(),
            journal: Rc::clone(journal),
        }
    }

    pub fn failing(journal: &SharedJournal) -> Self {
        Self {
            results: VecDeque::from([Err(DetectionError {
                reason: "cascade exploded".to_string(),
            })]),
            journal: Rc::clone(journal),
        }
    }
}

impl Detector for ScriptedDetector {
    fn detect(
        &mut self,
        gray: &GrayImage,
        _params: &DetectionParams,
    ) -> Result<Vec<Detection>, DetectionError> {
        self.journal.borrow_mut().detect_inputs.push(gray.dimensions());
        self.results.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Reports a fixed box whenever the frame is mostly bright. Same frame, same answer.
pub struct BrightnessDetector;

impl Detector for BrightnessDetector {
    fn detect(
        &mut self,
        gray: &GrayImage,
        _params: &DetectionParams,
    ) -> Result<Vec<Detection>, DetectionError> {
        let total: u64 = gray.pixels().map(|p| u64::from(p.0[0])).sum();
        let mean = total / u64::from((gray.width() * gray.height()).max(1));
        if mean > 128 {
            Ok(vec![Detection::new(40, 30, 150, 160)])
        } else {
            Ok(Vec::new())
        }
    }
}

/// Hands out scripted keys; once the script runs out it presses quit.
pub struct ScriptedDisplay {
    keys: VecDeque<Option<char>>,
    journal: SharedJournal,
}

impl ScriptedDisplay {
    pub fn new(keys: impl IntoIterator<Item = Option<char>>, journal: &SharedJournal) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            journal: Rc::clone(journal),
        }
    }
}

impl FeedDisplay for ScriptedDisplay {
    fn show(&mut self, frame: &RgbImage, overlay: &Overlay) -> Result<(), DisplayError> {
        let mut journal = self.journal.borrow_mut();
        journal.shown.push(overlay.clone());
        journal.shown_sizes.push(frame.dimensions());
        Ok(())
    }

    fn poll_key(&mut self, timeout: Duration) -> Result<Option<char>, DisplayError> {
        self.journal.borrow_mut().polls.push(timeout);
        Ok(self.keys.pop_front().unwrap_or(Some('q')))
    }

    fn close(&mut self) {
        self.journal.borrow_mut().closed += 1;
    }
}

pub fn session<D: Detector>(
    reads: impl IntoIterator<Item = Read>,
    detector: D,
    keys: impl IntoIterator<Item = Option<char>>,
    config: SessionConfig,
    journal: &SharedJournal,
) -> Session<ScriptedSource, D, ScriptedDisplay> {
    Session::new(
        ScriptedSource::new(reads, journal),
        detector,
        ScriptedDisplay::new(keys, journal),
        config,
    )
}

/// A backend whose startup steps can be made to fail one at a time.
pub struct FakeBackend {
    pub journal: SharedJournal,
    pub model_error: bool,
    pub device_error: bool,
    pub display_error: bool,
}

impl FakeBackend {
    pub fn new(journal: &SharedJournal) -> Self {
        Self {
            journal: Rc::clone(journal),
            model_error: false,
            device_error: false,
            display_error: false,
        }
    }
}

impl Backend for FakeBackend {
    type Source = ScriptedSource;
    type Detector = ScriptedDetector;
    type Display = ScriptedDisplay;

    fn load_detector(&mut self, path: &Path) -> Result<ScriptedDetector, ModelLoadError> {
        self.journal.borrow_mut().events.push("load_detector");
        if self.model_error {
            return Err(ModelLoadError::Invalid {
                path: path.to_path_buf(),
                reason: "classifier is empty".to_string(),
            });
        }
        Ok(ScriptedDetector::new(Vec::new(), &self.journal))
    }

    fn open_source(&mut self, index: i32) -> Result<ScriptedSource, DeviceUnavailableError> {
        self.journal.borrow_mut().events.push("open_source");
        if self.device_error {
            return Err(DeviceUnavailableError {
                index,
                reason: "permission denied".to_string(),
            });
        }
        Ok(ScriptedSource::new(Vec::new(), &self.journal))
    }

    fn open_display(&mut self, _title: &str) -> Result<ScriptedDisplay, DisplayError> {
        self.journal.borrow_mut().events.push("open_display");
        if self.display_error {
            return Err(DisplayError {
                reason: "no display server".to_string(),
            });
        }
        Ok(ScriptedDisplay::new(Vec::new(), &self.journal))
    }
}

/// A config whose cascade path points at a real (but fake) file.
pub fn config_with_cascade() -> (SessionConfig, NamedTempFile) {
    let cascade = NamedTempFile::new().expect("create cascade file");
    let config = SessionConfig {
        cascade_path: cascade.path().to_path_buf(),
        ..SessionConfig::default()
    };
    (config, cascade)
}
