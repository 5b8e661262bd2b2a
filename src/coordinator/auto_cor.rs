//! Automatic per-slice COR search.
//!
//! Slices are independent, so with the `parallel` feature they run through
//! rayon. Results are always returned in the order the slices were given and
//! progress advances by exactly one step per finished slice.

use crate::diagnostics::SliceCorResult;
use crate::error::Result;
use crate::image::ImageStack;
use crate::recon::{Backend, Progress};
use crate::types::{ProjectionAngles, ReconstructionParameters, ScalarCor};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub(crate) struct AutoCorJob<'a> {
    pub backend: &'a dyn Backend,
    pub stack: &'a dyn ImageStack,
    pub angles: &'a ProjectionAngles,
    pub params: &'a ReconstructionParameters,
    pub progress: &'a Progress,
}

impl AutoCorJob<'_> {
    /// Seed for every slice: the horizontal centre of the detector.
    fn initial_guess(&self) -> ScalarCor {
        ScalarCor(self.stack.width() as f64 / 2.0)
    }

    fn find_one(&self, slice: usize) -> Result<SliceCorResult> {
        self.progress.check_cancelled()?;
        let start = Instant::now();
        let cor = self.backend.find_cor(
            self.stack,
            slice,
            self.initial_guess(),
            self.angles,
            self.params,
        )?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.progress.update(None, format!("Calculating COR for slice {slice}"));
        Ok(SliceCorResult {
            slice,
            cor,
            elapsed_ms,
        })
    }

    pub fn run(&self, slices: &[usize]) -> Result<Vec<SliceCorResult>> {
        self.progress.reset(slices.len());
        if let Some(first) = slices.first() {
            self.progress.update(Some(0), format!("Calculating COR for slice {first}"));
        }

        #[cfg(feature = "parallel")]
        {
            self.run_parallel(slices)
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.run_sequential(slices)
        }
    }

    #[cfg_attr(feature = "parallel", allow(dead_code))]
    fn run_sequential(&self, slices: &[usize]) -> Result<Vec<SliceCorResult>> {
        let mut results = Vec::with_capacity(slices.len());
        for &slice in slices {
            results.push(self.find_one(slice)?);
        }
        Ok(results)
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(&self, slices: &[usize]) -> Result<Vec<SliceCorResult>> {
        // Indexed parallel iterators collect in input order.
        slices
            .par_iter()
            .map(|&slice| self.find_one(slice))
            .collect()
    }
}
