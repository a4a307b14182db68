//! Error types for config loading and file access

use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::config::ConfigFormat;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors raised while loading a deck description
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {format} config: {message}")]
    Syntax {
        format: ConfigFormat,
        message: String,
        span: Option<Span>,
    },
}

impl ConfigError {
    pub(crate) fn from_json(err: serde_json::Error, source: &str) -> Self {
        let span = (err.line() > 0).then(|| {
            let offset = offset_of(source, err.line(), err.column());
            offset..next_boundary(source, offset)
        });
        ConfigError::Syntax {
            format: ConfigFormat::Json,
            message: err.to_string(),
            span,
        }
    }

    pub(crate) fn from_toml(err: toml::de::Error) -> Self {
        ConfigError::Syntax {
            format: ConfigFormat::Toml,
            message: err.message().to_string(),
            span: err.span(),
        }
    }

    pub(crate) fn from_yaml(err: serde_yaml::Error, source: &str) -> Self {
        let span = err.location().map(|loc| {
            let offset = loc.index().min(source.len());
            offset..next_boundary(source, offset)
        });
        ConfigError::Syntax {
            format: ConfigFormat::Yaml,
            message: err.to_string(),
            span,
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Syntax { span, .. } => span.as_ref(),
            Self::Read { .. } => None,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// Errors without a span fall back to their plain message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (Some(span), ConfigError::Syntax { message, format, .. }) = (self.span(), self) else {
            return self.to_string();
        };

        // ariadne counts characters, the parsers report bytes
        let start = char_index(source, span.start);
        let end = char_index(source, span.end).max(start + 1);

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, start)
            .with_message(format!("invalid {} config", format))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Read and write failures on templates and generated files
#[derive(Error, Debug)]
pub enum FilesystemError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FilesystemError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Path of the file that could not be accessed
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// Byte offset of a 1-based line/column position, clamped to the source
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let mut offset = (line_start + column.saturating_sub(1)).min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Byte offset just past the character starting at `offset`
fn next_boundary(source: &str, offset: usize) -> usize {
    source[offset..]
        .chars()
        .next()
        .map_or(offset, |c| offset + c.len_utf8())
}

fn char_index(source: &str, byte: usize) -> usize {
    let mut byte = byte.min(source.len());
    while !source.is_char_boundary(byte) {
        byte -= 1;
    }
    source[..byte].chars().count()
}
