use crate::error::{CorTiltError, Result};
use crate::image::{ImageF32, ImageStack, StackId};
use crate::recon::{generate_projection_angles, BackendRegistry};
use crate::types::{ProjectionAngles, ReconstructionParameters, ScalarCor};
use log::debug;
use std::fmt;

/// Initial step as a fraction of the image width.
pub const INITIAL_STEP_FRACTION: f64 = 0.05;

/// Which of the three test reconstructions a value or choice refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    Less,
    Current,
    More,
}

impl CandidateKind {
    pub const ALL: [CandidateKind; 3] = [
        CandidateKind::Less,
        CandidateKind::Current,
        CandidateKind::More,
    ];
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CandidateKind::Less => "less",
            CandidateKind::Current => "current",
            CandidateKind::More => "more",
        };
        f.write_str(label)
    }
}

/// Centre and step of the bracketing search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefinementState {
    pub centre_value: f64,
    pub step: f64,
}

impl RefinementState {
    pub fn new(centre_value: f64, step: f64) -> Self {
        Self { centre_value, step }
    }

    pub fn candidate(&self, kind: CandidateKind) -> f64 {
        match kind {
            CandidateKind::Less => self.centre_value - self.step,
            CandidateKind::Current => self.centre_value,
            CandidateKind::More => self.centre_value + self.step,
        }
    }

    /// Apply the user's choice: a side candidate moves the centre with the
    /// step unchanged, the current candidate halves the step in place.
    pub fn adjust(&mut self, selected: CandidateKind) {
        match selected {
            CandidateKind::Current => self.step /= 2.0,
            CandidateKind::Less | CandidateKind::More => {
                self.centre_value = self.candidate(selected);
            }
        }
    }
}

/// Refinement session for one slice of one stack.
///
/// Holds the sinogram of the selected row so candidate reconstructions can be
/// requested repeatedly while the user narrows the bracket.
#[derive(Clone, Debug)]
pub struct RefinementSearch {
    stack_id: StackId,
    slice_index: usize,
    sinogram: ImageF32,
    cor_extents: (usize, usize),
    projection_angles: ProjectionAngles,
    params: ReconstructionParameters,
    state: RefinementState,
}

impl RefinementSearch {
    /// Start a search at `initial_cor` on detector row `slice_index`.
    ///
    /// The initial step is [`INITIAL_STEP_FRACTION`] of the image width.
    pub fn new(
        stack: &dyn ImageStack,
        slice_index: usize,
        initial_cor: ScalarCor,
        params: ReconstructionParameters,
    ) -> Result<Self> {
        let rows = stack.num_sinogram_rows();
        if slice_index >= rows {
            return Err(CorTiltError::Configuration(format!(
                "slice index {slice_index} is outside the stack (0..{rows})"
            )));
        }
        let width = stack.width();
        if width == 0 {
            return Err(CorTiltError::Configuration("stack has zero width".to_string()));
        }
        let sinogram = stack.sinogram(slice_index).ok_or_else(|| {
            CorTiltError::Configuration(format!("no sinogram available for row {slice_index}"))
        })?;
        let state = RefinementState::new(initial_cor.value(), width as f64 * INITIAL_STEP_FRACTION);
        debug!(
            "RefinementSearch::new slice={} cor={} step={:.3}",
            slice_index, initial_cor, state.step
        );
        Ok(Self {
            stack_id: stack.id(),
            slice_index,
            sinogram,
            cor_extents: (0, width - 1),
            projection_angles: generate_projection_angles(360.0, stack.num_projections()),
            params,
            state,
        })
    }

    /// Identity of the stack the search was started on.
    pub fn stack_id(&self) -> StackId {
        self.stack_id
    }

    pub fn slice_index(&self) -> usize {
        self.slice_index
    }

    pub fn sinogram(&self) -> &ImageF32 {
        &self.sinogram
    }

    /// Valid pixel-column bounds for a COR, `(0, width - 1)`.
    pub fn cor_extents(&self) -> (usize, usize) {
        self.cor_extents
    }

    pub fn projection_angles(&self) -> &ProjectionAngles {
        &self.projection_angles
    }

    pub fn params(&self) -> &ReconstructionParameters {
        &self.params
    }

    pub fn state(&self) -> RefinementState {
        self.state
    }

    /// Replace the search state, e.g. to resume an earlier session.
    pub fn set_state(&mut self, state: RefinementState) {
        self.state = state;
    }

    pub fn centre_value(&self) -> f64 {
        self.state.centre_value
    }

    pub fn step(&self) -> f64 {
        self.state.step
    }

    pub fn candidate(&self, kind: CandidateKind) -> ScalarCor {
        ScalarCor(self.state.candidate(kind))
    }

    pub fn adjust(&mut self, selected: CandidateKind) {
        self.state.adjust(selected);
        debug!(
            "RefinementSearch::adjust picked={} centre={:.4} step={:.4}",
            selected, self.state.centre_value, self.state.step
        );
    }

    /// Test reconstruction of the selected slice at the `kind` candidate.
    ///
    /// The backend is the one registered under `params.algorithm`. `stack`
    /// must be the stack the search was started on.
    pub fn reconstruct(
        &self,
        kind: CandidateKind,
        registry: &BackendRegistry,
        stack: &dyn ImageStack,
    ) -> Result<ImageF32> {
        if stack.id() != self.stack_id {
            return Err(CorTiltError::Configuration(format!(
                "refinement search started on stack {:?}, got stack {:?}",
                self.stack_id,
                stack.id()
            )));
        }
        let backend = registry.get(&self.params.algorithm)?;
        let cor = self.candidate(kind);
        let image = backend.single(
            stack,
            self.slice_index,
            cor,
            &self.projection_angles,
            &self.params,
        )?;
        Ok(image)
    }
}
