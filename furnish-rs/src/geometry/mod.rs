pub mod geo_traits;
pub mod primitives;

mod footprint;
mod rotation;

#[doc(inline)]
pub use footprint::Footprint;
#[doc(inline)]
pub use rotation::{RotationStrategy, TrigRotation};
