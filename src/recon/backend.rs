use super::progress::Progress;
use crate::error::BackendError;
use crate::image::{ImageF32, ImageStack, Volume};
use crate::types::{ProjectionAngles, ReconstructionParameters, ScalarCor};
use std::collections::BTreeSet;

/// Capability interface of a reconstruction algorithm.
///
/// Implementations are opaque, blocking and compute-bound. The coordinator
/// never retries a failed call and never parallelizes inside one call.
pub trait Backend: Send + Sync {
    /// Algorithm identifier this backend is registered under.
    fn name(&self) -> &str;

    /// Reconstruct the single slice at detector row `slice_index`.
    fn single(
        &self,
        stack: &dyn ImageStack,
        slice_index: usize,
        cor: ScalarCor,
        angles: &ProjectionAngles,
        params: &ReconstructionParameters,
    ) -> Result<ImageF32, BackendError>;

    /// Reconstruct every row of the stack using `per_row_cors[row]` as the
    /// rotation centre of that row.
    ///
    /// Implementations should call [`Progress::update`] once per slice and may
    /// stop early when [`Progress::is_cancelled`] turns true.
    fn full(
        &self,
        stack: &dyn ImageStack,
        per_row_cors: &[ScalarCor],
        angles: &ProjectionAngles,
        params: &ReconstructionParameters,
        progress: &Progress,
    ) -> Result<Volume, BackendError>;

    /// Search for the COR of one slice, starting from `initial_guess`.
    fn find_cor(
        &self,
        stack: &dyn ImageStack,
        slice_index: usize,
        initial_guess: ScalarCor,
        angles: &ProjectionAngles,
        params: &ReconstructionParameters,
    ) -> Result<ScalarCor, BackendError>;

    /// Filter identifiers accepted in [`ReconstructionParameters::filter_name`].
    fn allowed_filters(&self) -> BTreeSet<String>;
}
