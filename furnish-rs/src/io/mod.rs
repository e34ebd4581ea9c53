pub mod export;
pub mod svg;

#[doc(inline)]
pub use export::{CONTAINER_EXPORT_ID, JsonPolygon, compose_layout, write_layout};
#[doc(inline)]
pub use svg::{room_to_svg, write_svg};
