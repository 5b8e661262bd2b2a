//! Reconstruction backend seam.
//!
//! Modules
//! - `backend` – the [`Backend`] capability trait (single slice, full volume,
//!   per-slice COR search, allowed filters).
//! - `registry` – [`BackendRegistry`], resolving algorithm identifiers to
//!   backends explicitly.
//! - `progress` – [`Progress`], the cancellable sink long-running jobs report
//!   through.
//! - `angles` – projection angle generation.

mod angles;
mod backend;
mod progress;
mod registry;

pub use angles::generate_projection_angles;
pub use backend::Backend;
pub use progress::Progress;
pub use registry::BackendRegistry;
