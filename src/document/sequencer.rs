//! Slide sequencing - renders every slide of a deck in order

use tracing::debug;

use crate::config::SlideSpec;
use crate::layout::{LayoutError, LayoutRegistry};
use crate::template::render_slide;

/// Render all slides into the slide-body document
///
/// Blocks are concatenated in input order with nothing in between, since
/// section numbering and the outline follow that order. The first slide
/// that cannot be laid out aborts the whole sequence.
pub fn sequence(registry: &LayoutRegistry, slides: &[SlideSpec]) -> Result<String, LayoutError> {
    let mut body = String::new();

    for (index, slide) in slides.iter().enumerate() {
        let position = index + 1;
        let layout = registry
            .resolve(slide.plots.len())
            .map_err(|e| e.in_slide(position, &slide.title))?;

        debug!(
            slide = position,
            title = %slide.title,
            layout = layout.name(),
            plots = slide.plots.len(),
            "Writing slide"
        );

        let block = render_slide(layout, slide).map_err(|e| e.in_slide(position, &slide.title))?;
        body.push_str(&block);
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_preserves_order() {
        let slides = vec![
            SlideSpec::new("Alpha"),
            SlideSpec::new("Bravo").with_plot("b.pdf", ""),
            SlideSpec::new("Charlie").with_plot("c1.pdf", "").with_plot("c2.pdf", ""),
        ];
        let body = sequence(LayoutRegistry::builtin(), &slides).unwrap();

        let a = body.find("{Alpha}").expect("Alpha rendered");
        let b = body.find("{Bravo}").expect("Bravo rendered");
        let c = body.find("{Charlie}").expect("Charlie rendered");
        assert!(a < b && b < c);
    }

    #[test]
    fn test_sequence_is_concatenation_of_blocks() {
        let slides = vec![
            SlideSpec::new("One").with_plot("1.pdf", "x"),
            SlideSpec::new("Two"),
        ];
        let registry = LayoutRegistry::builtin();
        let body = sequence(registry, &slides).unwrap();

        let first = render_slide(registry.resolve(1).unwrap(), &slides[0]).unwrap();
        let second = render_slide(registry.resolve(0).unwrap(), &slides[1]).unwrap();
        assert_eq!(body, format!("{}{}", first, second));
    }

    #[test]
    fn test_sequence_empty_deck() {
        assert_eq!(sequence(LayoutRegistry::builtin(), &[]).unwrap(), "");
    }

    #[test]
    fn test_sequence_reports_failing_slide() {
        let mut crowded = SlideSpec::new("Crowded");
        for k in 0..11 {
            crowded = crowded.with_plot(format!("{}.pdf", k), "");
        }
        let slides = vec![SlideSpec::new("Fine"), crowded];

        let err = sequence(LayoutRegistry::builtin(), &slides).unwrap_err();
        assert_eq!(err.unsupported_count(), Some(11));
        assert!(matches!(err, LayoutError::Slide { index: 2, .. }));
        assert!(err.to_string().contains("Crowded"));
    }
}
