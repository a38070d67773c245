//! Haar cascade detector.
//!
//! OpenCV does not fail when handed a missing or malformed XML file; it returns a
//! classifier that is simply empty. `HaarCascade::load` checks for that explicitly.

use std::path::Path;

use image::GrayImage;
use opencv::{
    core::{Mat, Rect, Size, Vector},
    objdetect::CascadeClassifier,
    prelude::*,
};
use weapon_watch::config::DetectionParams;
use weapon_watch::core_modules::detection::{Detection, Detector};
use weapon_watch::error::{DetectionError, ModelLoadError};

use crate::convert::gray_into_mat;

pub struct HaarCascade {
    classifier: CascadeClassifier,
    gray: Mat,
    hits: Vector<Rect>,
}

impl HaarCascade {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let invalid = |reason: String| ModelLoadError::Invalid {
            path: path.to_path_buf(),
            reason,
        };

        let filename = path
            .to_str()
            .ok_or_else(|| invalid("path is not valid UTF-8".to_string()))?;
        let classifier = CascadeClassifier::new(filename).map_err(|e| invalid(e.to_string()))?;
        if classifier.empty().map_err(|e| invalid(e.to_string()))? {
            return Err(invalid("classifier is empty".to_string()));
        }

        Ok(Self {
            classifier,
            gray: Mat::default(),
            hits: Vector::new(),
        })
    }
}

impl Detector for HaarCascade {
    fn detect(
        &mut self,
        gray: &GrayImage,
        params: &DetectionParams,
    ) -> Result<Vec<Detection>, DetectionError> {
        let failed = |e: opencv::Error| DetectionError { reason: e.to_string() };

        gray_into_mat(gray, &mut self.gray).map_err(failed)?;
        self.hits.clear();
        self.classifier
            .detect_multi_scale(
                &self.gray,
                &mut self.hits,
                params.scale_factor,
                params.min_neighbors,
                0,
                Size::new(params.min_size.0 as i32, params.min_size.1 as i32),
                Size::default(),
            )
            .map_err(failed)?;

        Ok(self
            .hits
            .iter()
            .map(|r| Detection::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}
