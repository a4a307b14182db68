//! Document generation: the slide body and the top-level file around it
//!
//! A deck compiles from two files. The slide body holds one rendered frame
//! per slide; the top-level document carries the title page, the optional
//! outline and an `\input` of the body.

mod assembler;
mod sequencer;

pub use assembler::{assemble, DEFAULT_FRONT_MATTER, TOC_BLOCK};
pub use sequencer::sequence;
