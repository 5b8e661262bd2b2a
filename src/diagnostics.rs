//! Structured reports for tools and callers that want more than the bare
//! results, e.g. per-slice timings of an automatic COR search.

mod search;

pub use search::{CorSearchReport, SliceCorResult};
