use cor_tilt::error::BackendError;
use cor_tilt::image::{ImageF32, ImageStack, Volume};
use cor_tilt::recon::{Backend, Progress};
use cor_tilt::types::{ProjectionAngles, ReconstructionParameters, ScalarCor};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

pub const MOCK_ALGORITHM: &str = "MOCK";

/// One recorded backend invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum MockCall {
    Single {
        slice: usize,
        cor: f64,
        num_angles: usize,
    },
    Full {
        cors: Vec<f64>,
    },
    FindCor {
        slice: usize,
        initial_guess: f64,
    },
}

/// Deterministic backend for coordinator tests.
///
/// `find_cor` answers `offset + gradient * slice`. Single slices come back as
/// a `w x w` image filled with the requested COR, full volumes as one such
/// image per row.
pub struct MockBackend {
    name: String,
    pub offset: f64,
    pub gradient: f64,
    pub failure: Option<String>,
    /// Cancel this sink after the given number of `find_cor` calls.
    pub cancel_after: Option<(usize, Arc<Progress>)>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockBackend {
    pub fn new(offset: f64, gradient: f64) -> Self {
        Self {
            name: MOCK_ALGORITHM.to_string(),
            offset,
            gradient,
            failure: None,
            cancel_after: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn cancelling_after(mut self, calls: usize, progress: Arc<Progress>) -> Self {
        self.cancel_after = Some((calls, progress));
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn find_cor_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockCall::FindCor { .. }))
            .count()
    }

    fn record(&self, call: MockCall) -> usize {
        let mut calls = self.calls.lock().expect("calls lock");
        calls.push(call);
        calls.len()
    }

    fn check_failure(&self) -> Result<(), BackendError> {
        match &self.failure {
            Some(message) => Err(BackendError::new(self.name.clone(), message.clone())),
            None => Ok(()),
        }
    }

    fn filled(width: usize, value: f64) -> ImageF32 {
        ImageF32::from_vec(width, width, vec![value as f32; width * width])
            .expect("square buffer")
    }
}

impl Backend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn single(
        &self,
        stack: &dyn ImageStack,
        slice_index: usize,
        cor: ScalarCor,
        angles: &ProjectionAngles,
        _params: &ReconstructionParameters,
    ) -> Result<ImageF32, BackendError> {
        self.record(MockCall::Single {
            slice: slice_index,
            cor: cor.value(),
            num_angles: angles.len(),
        });
        self.check_failure()?;
        Ok(Self::filled(stack.width(), cor.value()))
    }

    fn full(
        &self,
        stack: &dyn ImageStack,
        per_row_cors: &[ScalarCor],
        _angles: &ProjectionAngles,
        _params: &ReconstructionParameters,
        progress: &Progress,
    ) -> Result<Volume, BackendError> {
        self.record(MockCall::Full {
            cors: per_row_cors.iter().map(|c| c.value()).collect(),
        });
        self.check_failure()?;
        let mut slices = Vec::with_capacity(per_row_cors.len());
        for (row, cor) in per_row_cors.iter().enumerate() {
            if progress.is_cancelled() {
                break;
            }
            slices.push(Self::filled(stack.width(), cor.value()));
            progress.update(None, format!("Reconstructed slice {row}"));
        }
        Ok(Volume::new(slices))
    }

    fn find_cor(
        &self,
        _stack: &dyn ImageStack,
        slice_index: usize,
        initial_guess: ScalarCor,
        _angles: &ProjectionAngles,
        _params: &ReconstructionParameters,
    ) -> Result<ScalarCor, BackendError> {
        let count = self.record(MockCall::FindCor {
            slice: slice_index,
            initial_guess: initial_guess.value(),
        });
        self.check_failure()?;
        if let Some((after, progress)) = &self.cancel_after {
            if count >= *after {
                progress.cancel();
            }
        }
        Ok(ScalarCor(self.offset + self.gradient * slice_index as f64))
    }

    fn allowed_filters(&self) -> BTreeSet<String> {
        ["ram-lak", "shepp-logan", "cosine"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}
