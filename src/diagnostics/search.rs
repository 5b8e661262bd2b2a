use crate::types::ScalarCor;
use serde::{Deserialize, Serialize};

/// COR found for one slice during an automatic search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceCorResult {
    pub slice: usize,
    pub cor: ScalarCor,
    pub elapsed_ms: f64,
}

/// Outcome of an automatic per-slice COR search, in slice order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorSearchReport {
    pub algorithm: String,
    pub total_ms: f64,
    pub results: Vec<SliceCorResult>,
}

impl CorSearchReport {
    pub fn slices(&self) -> Vec<usize> {
        self.results.iter().map(|r| r.slice).collect()
    }

    pub fn cors(&self) -> Vec<ScalarCor> {
        self.results.iter().map(|r| r.cor).collect()
    }

    /// Slowest slice, useful to spot backend outliers.
    pub fn slowest(&self) -> Option<&SliceCorResult> {
        self.results
            .iter()
            .max_by(|a, b| a.elapsed_ms.total_cmp(&b.elapsed_ms))
    }
}
