//! Common geometry types shared by the grid definition resolver.

pub mod extent;
pub mod float;
pub mod shape;

pub use extent::AreaExtent;
pub use float::allclose;
pub use shape::{quantize_shape, GridShape, QuantizedShape};
