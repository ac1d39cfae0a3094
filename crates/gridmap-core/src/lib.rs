//! Synthetic lon/lat grid fields and the contour machinery used to map them.

pub mod contour;
pub mod coords;
pub mod error;
pub mod field;
pub mod generator;
pub mod grid;
pub mod levels;

pub use error::GridError;
pub use field::ScalarField;
pub use generator::{GridFieldGenerator, GridSpec};
