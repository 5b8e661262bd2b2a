use super::regression::{fit_line, RegressionResult};
use super::snapshot::CorTiltSnapshot;
use crate::error::{CorTiltError, Result};
use crate::linspace::linspace_indices;
use crate::types::{Degrees, ScalarCor, Slope, SlicePoint};
use log::{debug, warn};

/// Ordered table of `(slice, cor)` measurements plus an optional line fit.
///
/// Slices and CORs are kept in two index-aligned vectors which are only ever
/// reordered together. Editing points does not invalidate an existing fit;
/// call [`SampleSet::clear_results`] or refit explicitly.
#[derive(Clone, Debug, Default)]
pub struct SampleSet {
    slices: Vec<usize>,
    cors: Vec<f64>,
    results: Option<RegressionResult>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_points(&self) -> usize {
        self.slices.len()
    }

    pub fn empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn slices(&self) -> &[usize] {
        &self.slices
    }

    pub fn cors(&self) -> &[f64] {
        &self.cors
    }

    /// Overwrite the pair at position `index` when it exists, otherwise append.
    ///
    /// Replacement is positional: the stored slice value at `index` is not
    /// consulted.
    pub fn add_point(&mut self, index: Option<usize>, point: SlicePoint) {
        match index {
            Some(i) if i < self.num_points() => {
                self.slices[i] = point.slice;
                self.cors[i] = point.cor;
            }
            _ => {
                self.slices.push(point.slice);
                self.cors.push(point.cor);
            }
        }
    }

    /// Insert a pair before position `index`, shifting later points. An index
    /// past the end appends.
    pub fn insert_point(&mut self, index: usize, point: SlicePoint) {
        let i = index.min(self.num_points());
        self.slices.insert(i, point.slice);
        self.cors.insert(i, point.cor);
    }

    /// Remove the pair at position `index`.
    pub fn remove_point(&mut self, index: usize) -> Option<SlicePoint> {
        if index >= self.num_points() {
            return None;
        }
        let slice = self.slices.remove(index);
        let cor = self.cors.remove(index);
        Some(SlicePoint { slice, cor })
    }

    /// Replace all points with `count` slices evenly spaced over
    /// `[start, stop]`, each paired with `cor`.
    pub fn populate_slice_indices(&mut self, start: usize, stop: usize, count: usize, cor: f64) {
        self.slices = linspace_indices(start as f64, stop as f64, count);
        self.cors = vec![cor; self.slices.len()];
    }

    /// Remove every point and any fit.
    pub fn clear_points(&mut self) {
        self.slices.clear();
        self.cors.clear();
        self.clear_results();
    }

    /// Stable sort of the points by ascending slice index.
    pub fn sort_points(&mut self) {
        let mut pairs: Vec<(usize, f64)> = self
            .slices
            .iter()
            .copied()
            .zip(self.cors.iter().copied())
            .collect();
        pairs.sort_by_key(|&(slice, _)| slice);
        let (slices, cors): (Vec<usize>, Vec<f64>) = pairs.into_iter().unzip();
        self.slices = slices;
        self.cors = cors;
    }

    /// Fit the current points. On failure any previous fit is left cleared.
    pub fn linear_regression(&mut self) -> Result<RegressionResult> {
        self.results = None;
        match fit_line(&self.slices, &self.cors) {
            Ok(result) => {
                debug!(
                    "SampleSet::linear_regression points={} m={:.6} c={:.4} tilt={}",
                    self.num_points(),
                    result.m,
                    result.c,
                    result.tilt()
                );
                self.results = Some(result);
                Ok(result)
            }
            Err(err) => {
                warn!("SampleSet::linear_regression failed: {err}");
                Err(err)
            }
        }
    }

    pub fn clear_results(&mut self) {
        self.results = None;
    }

    /// Adopt a fit computed elsewhere. Points are left as they are.
    pub fn set_precalculated(&mut self, cor: ScalarCor, tilt: Degrees) {
        self.results = Some(RegressionResult::from_cor_and_tilt(cor, tilt));
    }

    pub fn has_results(&self) -> bool {
        self.results.is_some()
    }

    pub fn results(&self) -> Option<RegressionResult> {
        self.results
    }

    pub fn m(&self) -> Option<f64> {
        self.results.map(|r| r.m)
    }

    pub fn c(&self) -> Option<f64> {
        self.results.map(|r| r.c)
    }

    pub fn gradient(&self) -> Option<Slope> {
        self.results.map(|r| r.slope())
    }

    pub fn cor(&self) -> Option<ScalarCor> {
        self.results.map(|r| r.cor())
    }

    pub fn tilt_angle_rad(&self) -> Option<f64> {
        self.results.map(|r| r.tilt_angle_rad())
    }

    pub fn angle_in_degrees(&self) -> Option<Degrees> {
        self.results.map(|r| r.tilt())
    }

    pub fn point(&self, index: usize) -> Option<SlicePoint> {
        Some(SlicePoint {
            slice: *self.slices.get(index)?,
            cor: *self.cors.get(index)?,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = SlicePoint> + '_ {
        self.slices
            .iter()
            .zip(self.cors.iter())
            .map(|(&slice, &cor)| SlicePoint { slice, cor })
    }

    /// Position of the first point stored for `slice`.
    pub fn index_for_slice(&self, slice: usize) -> Option<usize> {
        self.slices.iter().position(|&s| s == slice)
    }

    /// Stored COR for `slice`, matched exactly on the slice value.
    pub fn get_cor_for_slice(&self, slice: usize) -> Option<f64> {
        self.index_for_slice(slice).map(|i| self.cors[i])
    }

    pub fn get_cor_for_slice_from_regression(&self, slice: usize) -> Result<f64> {
        let fit = self.require_results("get_cor_for_slice_from_regression")?;
        Ok(fit.evaluate(slice as f64))
    }

    /// COR for every row `0..height` from the fitted line.
    pub fn get_all_cors_from_regression(&self, height: usize) -> Result<Vec<f64>> {
        let fit = self.require_results("get_all_cors_from_regression")?;
        Ok((0..height).map(|row| fit.evaluate(row as f64)).collect())
    }

    /// Update the COR of the point at `slice`. Returns `false` if none exists.
    pub fn set_cor_at_slice(&mut self, slice: usize, cor: f64) -> bool {
        match self.index_for_slice(slice) {
            Some(i) => {
                self.cors[i] = cor;
                true
            }
            None => false,
        }
    }

    /// Fit and samples in a serializable form, `None` before any fit.
    pub fn properties_snapshot(&self) -> Option<CorTiltSnapshot> {
        let fit = self.results?;
        Some(CorTiltSnapshot {
            fitted_gradient: fit.m,
            rotation_centre: fit.c,
            slice_indices: self.slices.clone(),
            rotation_centres: self.cors.clone(),
            tilt_angle_rad: fit.tilt_angle_rad(),
        })
    }

    fn require_results(&self, operation: &'static str) -> Result<RegressionResult> {
        self.results.ok_or(CorTiltError::InvalidState { operation })
    }
}
