//! beamer-slides - plot-heavy LaTeX beamer decks from a structured description
//!
//! A deck description lists a title page and an ordered set of slides, each
//! carrying zero to ten plots with captions. Every slide is laid out with
//! the smallest built-in layout that holds its plots; the result is a slide
//! body plus a top-level document that `\input`s it.
//!
//! # Example
//!
//! ```rust
//! use beamer_slides::config::{DeckSpec, FrontMatter, SlideSpec};
//! use beamer_slides::{render_deck, DeckOptions};
//!
//! let mut deck = DeckSpec::new(FrontMatter {
//!     title: "Weekly update".to_string(),
//!     ..FrontMatter::default()
//! });
//! deck.slides.push(SlideSpec::new("Jets").with_plot("jet_pt.pdf", "Leading jet"));
//!
//! let rendered = render_deck(&deck, "update_slides_input.tex", &DeckOptions::new()).unwrap();
//! assert!(rendered.body.contains("jet_pt.pdf"));
//! assert!(rendered.main.contains("\\input{update_slides_input.tex}"));
//! ```

pub mod build;
pub mod compare;
pub mod config;
pub mod document;
pub mod error;
pub mod layout;
pub mod output;
pub mod template;

pub use build::{BuildError, BuildReport, Compiler, ExternalToolError};
pub use compare::{CompareError, CompareOptions};
pub use config::{DeckSpec, FrontMatter, PlotRef, SlideSpec};
pub use error::{ConfigError, FilesystemError};
pub use layout::{LayoutError, LayoutRegistry, LayoutTemplate};
pub use output::OutputPaths;

use thiserror::Error;

/// Errors that can occur anywhere in the deck pipeline
#[derive(Debug, Error)]
pub enum SlidesError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Compare(#[from] CompareError),
}

/// Options for rendering a deck
#[derive(Debug, Clone, Default)]
pub struct DeckOptions {
    /// Front-matter template text; the built-in one when `None`
    pub front_template: Option<String>,
    /// Overrides the deck's own `table_of_contents` switch
    pub toc: Option<bool>,
}

impl DeckOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom front-matter template
    pub fn with_front_template(mut self, template: impl Into<String>) -> Self {
        self.front_template = Some(template.into());
        self
    }

    /// Force the outline frame on or off
    pub fn with_toc(mut self, toc: bool) -> Self {
        self.toc = Some(toc);
        self
    }

    /// Whether the outline frame ends up in `deck`
    pub fn toc_enabled(&self, deck: &DeckSpec) -> bool {
        self.toc.unwrap_or(deck.table_of_contents)
    }

    fn front_template(&self) -> &str {
        self.front_template
            .as_deref()
            .unwrap_or(document::DEFAULT_FRONT_MATTER)
    }
}

/// The two generated documents, fully rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDeck {
    /// Top-level document
    pub main: String,
    /// Slide body
    pub body: String,
}

/// Render both documents without touching the filesystem
///
/// `body_reference` is what the top-level document `\input`s.
pub fn render_deck(
    deck: &DeckSpec,
    body_reference: &str,
    options: &DeckOptions,
) -> Result<RenderedDeck, SlidesError> {
    let body = document::sequence(LayoutRegistry::builtin(), &deck.slides)?;
    let main = document::assemble(
        options.front_template(),
        &deck.frontpage,
        body_reference,
        options.toc_enabled(deck),
    );
    Ok(RenderedDeck { main, body })
}

/// Write both documents to their output paths
pub fn write_deck(rendered: &RenderedDeck, paths: &OutputPaths) -> Result<(), SlidesError> {
    output::write_text(&paths.body, &rendered.body)?;
    output::write_text(&paths.main, &rendered.main)?;
    Ok(())
}

/// Render `deck` and write it to `paths`
///
/// Every slide is rendered before the first file is written, so a slide
/// that cannot be laid out leaves no partial output behind.
pub fn make_deck(
    deck: &DeckSpec,
    paths: &OutputPaths,
    options: &DeckOptions,
) -> Result<RenderedDeck, SlidesError> {
    let rendered = render_deck(deck, &paths.body_reference(), options)?;
    write_deck(&rendered, paths)?;
    tracing::info!(
        slides = deck.slides.len(),
        "Written {} and {}",
        paths.main.display(),
        paths.body.display()
    );
    Ok(rendered)
}
