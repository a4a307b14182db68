//! Placeholder templates for slides and front matter
//!
//! Templates are LaTeX text with `@NAME` placeholders. Slide layouts use
//! `@SLIDE_TITLE`, `@SLIDE_SECTION`, `@TOPTEXT`, `@BOTTOMTEXT` and the
//! positional pairs `@PLOTk` / `@PLOTkTITLE`; the front matter uses
//! `@TITLE`, `@SUBTITLE`, `@AUTHOR`, `@FILE` and `@TOC`.
//!
//! ```text
//! \section{@SLIDE_SECTION}
//! \begin{frame}{@SLIDE_TITLE}
//! @PLOT1TITLE
//! \includegraphics[width=0.5\textwidth]{@PLOT1}
//! \end{frame}
//! ```
//!
//! Names the renderer does not know are left in place verbatim.

pub mod lexer;
mod renderer;

pub use lexer::{lex, Slot, Token};
pub use renderer::{render, render_slide, SlideContent};
