//! Interactive COR refinement for a single slice.
//!
//! The user is shown three test reconstructions of one sinogram, at
//! `centre - step`, `centre` and `centre + step`, and picks the sharpest.
//! Picking a side candidate moves the centre there and keeps the step; picking
//! the middle candidate halves the step. Alternating moves and zooms brackets
//! the COR to any precision the user cares about.
//!
//! ```
//! use cor_tilt::inspection::{CandidateKind, RefinementState};
//!
//! let mut state = RefinementState::new(5.0, 1.0);
//! state.adjust(CandidateKind::Current);
//! state.adjust(CandidateKind::Less);
//! assert_eq!((state.centre_value, state.step), (4.5, 0.5));
//! ```

mod search;

pub use search::{CandidateKind, RefinementSearch, RefinementState, INITIAL_STEP_FRACTION};
