//! Batch comparison: one slide per plot, one panel per directory
//!
//! Given several directories holding identically named plots, build a deck
//! in which every slide shows the same plot from each directory side by
//! side. Plot names are either listed explicitly or discovered as the file
//! names with a given extension that every directory has in common.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{DeckSpec, FrontMatter, SlideSpec};
use crate::error::FilesystemError;

/// Title page heading used when none is given
pub const DEFAULT_TITLE: &str = "Plot comparison";

/// Errors raised while building a comparison deck
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("no directories to compare")]
    NoDirectories,

    #[error("{labels} labels given for {dirs} directories")]
    TooManyLabels { labels: usize, dirs: usize },

    #[error("no plots with extension '{ext}' are common to all directories")]
    NoCommonPlots { ext: String },

    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Which plots to put on slides
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotSelection {
    /// Exactly these file names, in this order
    Names(Vec<String>),
    /// Every file with this extension present in all directories
    Extension(String),
}

/// Inputs for [`synthesize`]
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub dirs: Vec<PathBuf>,
    pub labels: Vec<String>,
    pub plots: PlotSelection,
    pub title: String,
}

impl CompareOptions {
    /// Compare `dirs`, discovering PDF plots by default
    pub fn new(dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
            labels: Vec::new(),
            plots: PlotSelection::Extension("pdf".to_string()),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Caption each directory's panel; missing labels leave captions empty
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Compare exactly these plot file names
    pub fn with_plots(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.plots = PlotSelection::Names(names.into_iter().map(Into::into).collect());
        self
    }

    /// Discover plots by extension, with or without the leading dot
    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.plots = PlotSelection::Extension(ext.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Build the comparison deck
pub fn synthesize(options: &CompareOptions) -> Result<DeckSpec, CompareError> {
    if options.dirs.is_empty() {
        return Err(CompareError::NoDirectories);
    }
    if options.labels.len() > options.dirs.len() {
        return Err(CompareError::TooManyLabels {
            labels: options.labels.len(),
            dirs: options.dirs.len(),
        });
    }

    let names = match &options.plots {
        PlotSelection::Names(names) => names.clone(),
        PlotSelection::Extension(ext) => {
            let found = discover_plots(&options.dirs, ext)?;
            if found.is_empty() {
                return Err(CompareError::NoCommonPlots { ext: ext.clone() });
            }
            found
        }
    };

    let mut deck = DeckSpec::new(FrontMatter {
        title: options.title.clone(),
        ..FrontMatter::default()
    });

    for name in names {
        let mut slide = SlideSpec::new(name.as_str());
        for (i, dir) in options.dirs.iter().enumerate() {
            let caption = options.labels.get(i).map(String::as_str).unwrap_or("");
            slide = slide.with_plot(dir.join(&name).to_string_lossy(), caption);
        }
        deck.slides.push(slide);
    }

    tracing::debug!(
        slides = deck.slides.len(),
        dirs = options.dirs.len(),
        "Synthesized comparison deck"
    );
    Ok(deck)
}

/// File names with extension `ext` present in every directory
///
/// The result is naturally sorted, see [`natural_cmp`].
pub fn discover_plots(dirs: &[PathBuf], ext: &str) -> Result<Vec<String>, FilesystemError> {
    let ext = ext.trim_start_matches('.');
    let mut common: Option<BTreeSet<String>> = None;

    for dir in dirs {
        let names = plots_in(dir, ext)?;
        common = Some(match common {
            None => names,
            Some(seen) => seen.intersection(&names).cloned().collect(),
        });
    }

    let mut names: Vec<String> = common.unwrap_or_default().into_iter().collect();
    names.sort_by(|a, b| natural_cmp(a, b));
    Ok(names)
}

fn plots_in(dir: &Path, ext: &str) -> Result<BTreeSet<String>, FilesystemError> {
    let entries = fs::read_dir(dir).map_err(|e| FilesystemError::read(dir, e))?;
    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| FilesystemError::read(dir, e))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(ext) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.insert(name.to_string());
        }
    }
    Ok(names)
}

/// Compare strings as interleaved text and number runs
///
/// Digit runs compare by numeric value, so `plot2` sorts before `plot10`.
/// Text runs compare by character.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Runs::new(a);
    let mut right = Runs::new(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (is_number(x), is_number(y)) {
                    (true, true) => numeric_cmp(x, y),
                    _ => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn is_number(run: &str) -> bool {
    run.starts_with(|c: char| c.is_ascii_digit())
}

/// Compare digit strings of any length by value
fn numeric_cmp(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

/// Splits a string into maximal runs of ASCII digits and non-digits
struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Runs<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(run)
    }
}
