//! Slide layouts and the registry that picks one per slide
//!
//! Each layout is a beamer frame skeleton sized for a fixed number of plots.
//! The registry maps a slide's plot count to the smallest layout that can
//! hold it.

pub mod error;
pub mod registry;

pub use error::LayoutError;
pub use registry::{LayoutRegistry, LayoutTemplate};
