//! Output file naming and writing
//!
//! A config `dir/deck.json` produces `dir/deck_slides.tex` (top level),
//! `dir/deck_slides_input.tex` (slide body) and, once compiled,
//! `dir/deck_slides.pdf`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FilesystemError;

/// Paths of everything a run produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Top-level document handed to the compiler
    pub main: PathBuf,
    /// Slide body pulled in through `\input`
    pub body: PathBuf,
    /// Where the compiler writes the PDF
    pub pdf: PathBuf,
}

impl OutputPaths {
    /// Derive outputs next to `path`, named after its stem
    pub fn for_config(path: &Path) -> Self {
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_stem(dir, &stem)
    }

    pub fn from_stem(dir: &Path, stem: &str) -> Self {
        Self {
            main: dir.join(format!("{}_slides.tex", stem)),
            body: dir.join(format!("{}_slides_input.tex", stem)),
            pdf: dir.join(format!("{}_slides.pdf", stem)),
        }
    }

    /// Directory all outputs live in
    pub fn dir(&self) -> &Path {
        self.main.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Text substituted for `@FILE`: the body path with `/` separators
    pub fn body_reference(&self) -> String {
        self.body.to_string_lossy().replace('\\', "/")
    }
}

/// Read a text file, typically a front-matter template
pub fn read_text(path: &Path) -> Result<String, FilesystemError> {
    fs::read_to_string(path).map_err(|e| FilesystemError::read(path, e))
}

/// Write `contents` to `path`, creating parent directories as needed
pub fn write_text(path: &Path, contents: &str) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FilesystemError::write(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| FilesystemError::write(path, e))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
