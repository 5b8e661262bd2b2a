use super::auto_cor::AutoCorJob;
use crate::samples::{CorTiltSnapshot, SampleSet, SNAPSHOT_KEY};
use crate::diagnostics::CorSearchReport;
use crate::error::{CorTiltError, Result};
use crate::image::{ImageF32, ImageStack, StackId, Volume};
use crate::inspection::RefinementSearch;
use crate::linspace::linspace_indices;
use crate::recon::{generate_projection_angles, BackendRegistry, Progress};
use crate::types::{Degrees, ProjectionAngles, ReconstructionParameters, ScalarCor, Slope};
use log::{debug, info};
use std::collections::BTreeSet;
use std::time::Instant;

/// Fraction of the stack height dropped at the top and at the bottom when
/// choosing slices for automatic COR sampling.
pub const EDGE_EXCLUSION_FRACTION: f64 = 0.2;

/// Angular range assumed for the projections of a freshly bound stack.
const FULL_TURN_DEG: f64 = 360.0;

/// Session object tying one sample table to at most one image stack.
///
/// States: unbound, bound without a fit, bound with a fit.
/// [`initial_select_data`](Self::initial_select_data) always lands in "bound
/// without a fit"; [`do_fit`](Self::do_fit) moves to "bound with a fit".
pub struct ReconstructionCoordinator<S: ImageStack> {
    registry: BackendRegistry,
    samples: SampleSet,
    stack: Option<S>,
    preview_projection_idx: usize,
    preview_slice_idx: usize,
    selected_row: usize,
    projection_angles: Option<ProjectionAngles>,
    last_result: Option<CorTiltSnapshot>,
    last_cor: ScalarCor,
}

impl<S: ImageStack> ReconstructionCoordinator<S> {
    pub fn new(registry: BackendRegistry) -> Self {
        Self {
            registry,
            samples: SampleSet::new(),
            stack: None,
            preview_projection_idx: 0,
            preview_slice_idx: 0,
            selected_row: 0,
            projection_angles: None,
            last_result: None,
            last_cor: ScalarCor(0.0),
        }
    }

    // --- Binding -----------------------------------------------------------

    /// Bind `stack`, returning the previously bound one.
    ///
    /// Any fit is cleared. Sample points survive only when the new stack has
    /// the same identity as the old one. The preview moves to projection 0 and
    /// the middle sinogram row, the cached COR to the detector centre.
    pub fn initial_select_data(&mut self, stack: S) -> Option<S> {
        let same_stack = self.is_current_stack(stack.id());
        if same_stack {
            self.samples.clear_results();
        } else {
            self.samples.clear_points();
        }
        self.projection_angles = Some(generate_projection_angles(
            FULL_TURN_DEG,
            stack.num_projections(),
        ));
        info!(
            "ReconstructionCoordinator bind stack={:?} {}x{} projections={} kept_points={}",
            stack.id(),
            stack.width(),
            stack.height(),
            stack.num_projections(),
            same_stack
        );
        let previous = self.stack.replace(stack);

        let (slice_idx, _) = self.find_initial_cor();
        self.preview_projection_idx = 0;
        self.preview_slice_idx = slice_idx;
        previous
    }

    /// Unbind and return the current stack.
    pub fn release_stack(&mut self) -> Option<S> {
        self.samples.clear_results();
        self.projection_angles = None;
        self.stack.take()
    }

    pub fn stack(&self) -> Option<&S> {
        self.stack.as_ref()
    }

    pub fn stack_mut(&mut self) -> Option<&mut S> {
        self.stack.as_mut()
    }

    pub fn is_bound(&self) -> bool {
        self.stack.is_some()
    }

    pub fn is_current_stack(&self, id: StackId) -> bool {
        self.stack.as_ref().is_some_and(|s| s.id() == id)
    }

    /// Default slice (middle sinogram row) and COR (detector centre).
    ///
    /// A cheap approximation rather than a search. Updates the cached COR when
    /// a stack is bound; returns `(0, 0)` otherwise.
    pub fn find_initial_cor(&mut self) -> (usize, ScalarCor) {
        match &self.stack {
            Some(stack) => {
                let cor = ScalarCor((stack.width() / 2) as f64);
                self.last_cor = cor;
                (stack.num_sinogram_rows() / 2, cor)
            }
            None => (0, ScalarCor(0.0)),
        }
    }

    // --- Fit ---------------------------------------------------------------

    /// Fit the sample table and record the result on the bound stack.
    ///
    /// Fails with [`CorTiltError::InvalidState`] when unbound, leaving the
    /// sample table untouched. A failed fit also removes the previous
    /// snapshot from the stack metadata and from [`last_result`](Self::last_result).
    pub fn do_fit(&mut self) -> Result<CorTiltSnapshot> {
        let stack = self
            .stack
            .as_mut()
            .ok_or(CorTiltError::InvalidState { operation: "do_fit" })?;
        if let Err(err) = self.samples.linear_regression() {
            // Drop the snapshot of the previous fit.
            stack.metadata_mut().remove(SNAPSHOT_KEY);
            self.last_result = None;
            return Err(err);
        }
        let snapshot = self
            .samples
            .properties_snapshot()
            .ok_or(CorTiltError::InvalidState { operation: "do_fit" })?;
        stack
            .metadata_mut()
            .insert(SNAPSHOT_KEY.to_string(), snapshot.to_value());
        info!(
            "ReconstructionCoordinator::do_fit points={} cor={:.3} tilt_rad={:.6}",
            snapshot.slice_indices.len(),
            snapshot.rotation_centre,
            snapshot.tilt_angle_rad
        );
        self.last_result = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Adopt a known COR and tilt instead of fitting.
    pub fn set_precalculated(&mut self, cor: ScalarCor, tilt: Degrees) {
        self.samples.set_precalculated(cor, tilt);
        self.last_result = self.samples.properties_snapshot();
    }

    pub fn has_results(&self) -> bool {
        self.samples.has_results()
    }

    /// Intercept, tilt and slope of the current fit.
    pub fn get_results(&self) -> Option<(ScalarCor, Degrees, Slope)> {
        let fit = self.samples.results()?;
        Some((fit.cor(), fit.tilt(), fit.slope()))
    }

    pub fn tilt_angle(&self) -> Option<Degrees> {
        self.samples.angle_in_degrees()
    }

    pub fn last_result(&self) -> Option<&CorTiltSnapshot> {
        self.last_result.as_ref()
    }

    pub fn sample_set(&self) -> &SampleSet {
        &self.samples
    }

    pub fn sample_set_mut(&mut self) -> &mut SampleSet {
        &mut self.samples
    }

    pub fn slices(&self) -> &[usize] {
        self.samples.slices()
    }

    pub fn cors(&self) -> &[f64] {
        self.samples.cors()
    }

    // --- COR selection -----------------------------------------------------

    pub fn last_cor(&self) -> ScalarCor {
        self.last_cor
    }

    pub fn set_last_cor(&mut self, cor: ScalarCor) {
        self.last_cor = cor;
    }

    /// COR for the preview slice: `explicit` if given, else the fitted line
    /// at the preview slice, else the cached COR.
    pub fn resolve_cor(&self, explicit: Option<ScalarCor>) -> ScalarCor {
        if let Some(cor) = explicit {
            return cor;
        }
        match self.samples.get_cor_for_slice_from_regression(self.preview_slice_idx) {
            Ok(cor) => ScalarCor(cor),
            Err(_) => self.last_cor,
        }
    }

    pub fn preview_projection_idx(&self) -> usize {
        self.preview_projection_idx
    }

    pub fn set_preview_projection_idx(&mut self, idx: usize) {
        self.preview_projection_idx = idx;
    }

    pub fn preview_slice_idx(&self) -> usize {
        self.preview_slice_idx
    }

    pub fn set_preview_slice_idx(&mut self, idx: usize) {
        self.preview_slice_idx = idx;
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    pub fn set_selected_row(&mut self, row: usize) {
        self.selected_row = row;
    }

    pub fn reset_selected_row(&mut self) {
        self.selected_row = 0;
    }

    pub fn projection_angles(&self) -> Option<&ProjectionAngles> {
        self.projection_angles.as_ref()
    }

    /// `count` rows evenly spaced over the middle of the stack, skipping
    /// [`EDGE_EXCLUSION_FRACTION`] of the height at either end. Returned
    /// together with the selected table row.
    pub fn get_slice_indices(&self, count: usize) -> Result<(usize, Vec<usize>)> {
        let stack = self.bound_stack("get_slice_indices")?;
        let height = stack.height() as f64;
        let margin = height * EDGE_EXCLUSION_FRACTION;
        let slices = linspace_indices(margin, height - margin, count);
        Ok((self.selected_row, slices))
    }

    // --- Backend dispatch --------------------------------------------------

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    pub fn allowed_filters(&self, algorithm: &str) -> Result<BTreeSet<String>> {
        self.registry.allowed_filters(algorithm)
    }

    /// Reconstruct one slice at `cor` with the backend named in `params`.
    pub fn run_preview_recon(
        &self,
        slice_idx: usize,
        cor: ScalarCor,
        params: &ReconstructionParameters,
    ) -> Result<ImageF32> {
        let stack = self.bound_stack("run_preview_recon")?;
        let angles = self.angles()?;
        let backend = self.registry.get(&params.algorithm)?;
        debug!(
            "run_preview_recon algorithm={} slice={} cor={}",
            params.algorithm, slice_idx, cor
        );
        Ok(backend.single(stack, slice_idx, cor, angles, params)?)
    }

    /// Reconstruct the whole stack with one COR per row from the fitted line.
    ///
    /// Needs a bound stack and a fit. `progress` is reset to one step per row
    /// and the backend reports through it.
    pub fn run_full_recon(
        &self,
        params: &ReconstructionParameters,
        progress: &Progress,
    ) -> Result<Volume> {
        let stack = self.bound_stack("run_full_recon")?;
        let angles = self.angles()?;
        let backend = self.registry.get(&params.algorithm)?;
        let cors: Vec<ScalarCor> = self
            .samples
            .get_all_cors_from_regression(stack.height())?
            .into_iter()
            .map(ScalarCor)
            .collect();
        progress.reset(cors.len());
        progress.check_cancelled()?;
        info!(
            "run_full_recon algorithm={} rows={} filter={}",
            params.algorithm,
            cors.len(),
            params.filter_name
        );
        let volume = backend.full(stack, &cors, angles, params, progress)?;
        progress.check_cancelled()?;
        Ok(volume)
    }

    /// Find the COR of each slice with the backend's own search, seeded at
    /// the detector centre. Results are in slice order; the caller decides
    /// whether to add them to the sample table. `progress` is reset to one
    /// step per slice.
    pub fn auto_find_cors_for_slices(
        &self,
        slices: &[usize],
        params: &ReconstructionParameters,
        progress: &Progress,
    ) -> Result<Vec<ScalarCor>> {
        Ok(self.auto_find_cors_report(slices, params, progress)?.cors())
    }

    /// [`auto_find_cors_for_slices`](Self::auto_find_cors_for_slices) with
    /// per-slice timings.
    pub fn auto_find_cors_report(
        &self,
        slices: &[usize],
        params: &ReconstructionParameters,
        progress: &Progress,
    ) -> Result<CorSearchReport> {
        let stack = self.bound_stack("auto_find_cors_for_slices")?;
        let angles = self.angles()?;
        let backend = self.registry.get(&params.algorithm)?;
        let start = Instant::now();
        let job = AutoCorJob {
            backend: backend.as_ref(),
            stack,
            angles,
            params,
            progress,
        };
        let results = job.run(slices)?;
        let total_ms = start.elapsed().as_secs_f64() * 1000.0;
        info!(
            "auto_find_cors algorithm={} slices={} total_ms={:.1}",
            params.algorithm,
            results.len(),
            total_ms
        );
        Ok(CorSearchReport {
            algorithm: params.algorithm.clone(),
            total_ms,
            results,
        })
    }

    /// Start an interactive refinement on `slice_idx` of the bound stack.
    pub fn refinement_search(
        &self,
        slice_idx: usize,
        initial_cor: ScalarCor,
        params: ReconstructionParameters,
    ) -> Result<RefinementSearch> {
        let stack = self.bound_stack("refinement_search")?;
        RefinementSearch::new(stack, slice_idx, initial_cor, params)
    }

    fn bound_stack(&self, operation: &'static str) -> Result<&S> {
        self.stack.as_ref().ok_or(CorTiltError::InvalidState { operation })
    }

    fn angles(&self) -> Result<&ProjectionAngles> {
        self.projection_angles.as_ref().ok_or(CorTiltError::InvalidState {
            operation: "projection_angles",
        })
    }
}

impl<S: ImageStack> Default for ReconstructionCoordinator<S> {
    fn default() -> Self {
        Self::new(BackendRegistry::default())
    }
}
