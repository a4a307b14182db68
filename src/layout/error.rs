//! Error types for layout selection

use thiserror::Error;

/// Errors that can occur while choosing or filling a slide layout
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Plot count outside the supported buckets, or above a template's capacity
    #[error("cannot make a slide with {count} plots (at most {max} supported)")]
    Unsupported { count: usize, max: usize },

    /// Two layouts registered for the same plot capacity
    #[error("duplicate layout for capacity {capacity}: '{name}'")]
    DuplicateCapacity { capacity: usize, name: String },

    /// A layout failure attributed to one slide of a deck
    #[error("slide {index} ('{title}'): {source}")]
    Slide {
        index: usize,
        title: String,
        #[source]
        source: Box<LayoutError>,
    },
}

impl LayoutError {
    /// Create an unsupported plot count error
    pub fn unsupported(count: usize, max: usize) -> Self {
        Self::Unsupported { count, max }
    }

    /// Attach the 1-based slide position and title to an error
    pub fn in_slide(self, index: usize, title: impl Into<String>) -> Self {
        Self::Slide {
            index,
            title: title.into(),
            source: Box::new(self),
        }
    }

    /// The rejected plot count, looking through slide context
    pub fn unsupported_count(&self) -> Option<usize> {
        match self {
            Self::Unsupported { count, .. } => Some(*count),
            Self::Slide { source, .. } => source.unsupported_count(),
            Self::DuplicateCapacity { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let err = LayoutError::unsupported(11, 10);
        assert_eq!(
            err.to_string(),
            "cannot make a slide with 11 plots (at most 10 supported)"
        );
    }

    #[test]
    fn test_slide_context_display() {
        let err = LayoutError::unsupported(12, 10).in_slide(3, "Jets");
        let msg = err.to_string();
        assert!(msg.starts_with("slide 3 ('Jets')"));
        assert!(msg.contains("12 plots"));
    }

    #[test]
    fn test_unsupported_count_through_context() {
        let err = LayoutError::unsupported(11, 10).in_slide(1, "a");
        assert_eq!(err.unsupported_count(), Some(11));

        let dup = LayoutError::DuplicateCapacity {
            capacity: 2,
            name: "two".to_string(),
        };
        assert_eq!(dup.unsupported_count(), None);
    }
}
