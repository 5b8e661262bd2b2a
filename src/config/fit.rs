use crate::samples::SampleSet;
use crate::io::read_json_file;
use crate::types::{Degrees, ScalarCor, SlicePoint};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration of the `cor_tilt_fit` tool.
#[derive(Debug, Deserialize)]
pub struct FitToolConfig {
    /// Measured `(slice, cor)` samples.
    #[serde(default)]
    pub points: Vec<SlicePoint>,
    /// Stack height; one COR is written per row `0..height`.
    pub height: usize,
    #[serde(default)]
    pub fit: FitOptions,
    pub output: FitOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Sort samples by slice before fitting.
    pub sort_points: bool,
    /// Skip the regression and use a known COR/tilt instead.
    pub precalculated: Option<PrecalculatedFit>,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            sort_points: true,
            precalculated: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PrecalculatedFit {
    pub cor: f64,
    pub tilt_deg: f64,
}

#[derive(Debug, Deserialize)]
pub struct FitOutputConfig {
    #[serde(rename = "summary_json")]
    pub summary_json: PathBuf,
}

impl FitToolConfig {
    /// Sample table populated from `points` (sorted if configured).
    pub fn to_sample_set(&self) -> SampleSet {
        let mut set = SampleSet::new();
        for &point in &self.points {
            set.add_point(None, point);
        }
        if self.fit.sort_points {
            set.sort_points();
        }
        if let Some(pre) = self.fit.precalculated {
            set.set_precalculated(ScalarCor(pre.cor), Degrees(pre.tilt_deg));
        }
        set
    }
}

pub fn load_config(path: &Path) -> Result<FitToolConfig, String> {
    read_json_file(path).map_err(|e| format!("Failed to load config: {e}"))
}
