//! Build driver: runs the external LaTeX compiler and tidies up after it
//!
//! The compiler is invoked synchronously a fixed number of passes. A pass
//! that exits non-zero is reported, never raised; only failing to start
//! the compiler at all stops the build.

mod compiler;
mod viewer;

pub use compiler::{
    remove_intermediates, BuildError, BuildReport, Compiler, ExternalToolError,
    DEFAULT_COMPILER, DEFAULT_PASSES, INTERMEDIATE_EXTENSIONS,
};
pub use viewer::{open_viewer, viewer_command};
