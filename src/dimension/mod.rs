//! Dimension handling for the tensors the backends produce.
//!
//! Shapes are only known at run time here (they come out of the pattern's
//! variable assignment), so a single dynamic representation is used.

pub mod dynamic;

pub use dynamic::{checked_size, element_count, DynamicDim};
