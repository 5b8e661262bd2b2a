pub mod f32;
pub mod stack;
pub mod traits;
pub mod volume;

pub use self::f32::ImageF32;
pub use self::stack::{ImageStack, Metadata, ProjectionStack, StackId};
pub use self::traits::{ImageView, Rows};
pub use self::volume::Volume;
