//! Reconstruction coordinator driving the COR/tilt workflow for one stack.
//!
//! Overview
//! - Bind a stack with [`ReconstructionCoordinator::initial_select_data`]. This
//!   picks the middle sinogram row as preview slice, the detector centre as
//!   default COR and generates projection angles over a full turn.
//! - Collect samples in the owned [`SampleSet`](crate::samples::SampleSet),
//!   by hand, with [`RefinementSearch`](crate::inspection::RefinementSearch)
//!   sessions, or with
//!   [`auto_find_cors_for_slices`](ReconstructionCoordinator::auto_find_cors_for_slices)
//!   over rows from [`get_slice_indices`](ReconstructionCoordinator::get_slice_indices).
//! - [`do_fit`](ReconstructionCoordinator::do_fit) fits the table and stores
//!   the snapshot on the stack metadata.
//! - Preview and full-volume jobs go to the backend named by
//!   [`ReconstructionParameters::algorithm`](crate::types::ReconstructionParameters),
//!   resolved through the [`BackendRegistry`](crate::recon::BackendRegistry).
//!
//! Long jobs report one step per slice through a caller-owned
//! [`Progress`](crate::recon::Progress) and stop at the next slice boundary
//! after it is cancelled.
//!
//! Modules
//! - `session` – the [`ReconstructionCoordinator`] itself.
//! - `auto_cor` – the per-slice COR search runner, sequential or rayon-backed
//!   behind the `parallel` feature.

mod auto_cor;
mod session;

pub use session::{ReconstructionCoordinator, EDGE_EXCLUSION_FRACTION};
