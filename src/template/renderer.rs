//! Slide rendering - fills a layout's placeholders with one slide's data
//!
//! Rendering is a single pass over the lexed template, driven by a lookup
//! table from [`Slot`] to replacement text. Substituted values are never
//! re-scanned, so a caption that itself contains `@PLOT10` stays literal.
//!
//! Plot slots the slide does not fill are erased: a stray `@PLOTkTITLE`
//! disappears, and an unfilled `@PLOTk` takes its whole
//! `\includegraphics[...]{...}` directive with it, or its whole line when
//! no such directive surrounds it. Afterwards lines left empty by erased
//! plot slots are dropped, together with any `\\` line break that no longer
//! separates two lines of content.

use std::collections::HashMap;

use crate::config::{PlotRef, SlideSpec};
use crate::layout::{LayoutError, LayoutTemplate};

use super::lexer::{lex, Slot, Token};

const EMBED_COMMAND: &str = r"\includegraphics";
const LINE_BREAK: &str = r"\\";

/// The data placed into one slide layout
#[derive(Debug, Clone, Copy)]
pub struct SlideContent<'a> {
    pub title: &'a str,
    pub section: &'a str,
    pub plots: &'a [PlotRef],
    pub top_text: Option<&'a str>,
    pub bottom_text: Option<&'a str>,
}

impl<'a> From<&'a SlideSpec> for SlideContent<'a> {
    fn from(spec: &'a SlideSpec) -> Self {
        Self {
            title: &spec.title,
            section: spec.section(),
            plots: &spec.plots,
            top_text: spec.top_text.as_deref(),
            bottom_text: spec.bottom_text.as_deref(),
        }
    }
}

/// Replacement text per slot for one slide
struct SlotValues<'a> {
    values: HashMap<Slot, &'a str>,
}

impl<'a> SlotValues<'a> {
    fn for_slide(slide: &SlideContent<'a>) -> Self {
        let mut values = HashMap::new();
        values.insert(Slot::SlideTitle, slide.title);
        values.insert(Slot::SlideSection, slide.section);
        values.insert(Slot::TopText, slide.top_text.unwrap_or(""));
        values.insert(Slot::BottomText, slide.bottom_text.unwrap_or(""));

        // Highest index first, so @PLOT10 is settled before @PLOT1
        for (index, plot) in slide.plots.iter().enumerate().rev() {
            values.insert(Slot::PlotCaption(index + 1), plot.caption.as_str());
            values.insert(Slot::PlotPath(index + 1), plot.path.as_str());
        }
        Self { values }
    }

    fn get(&self, slot: Slot) -> Option<&'a str> {
        self.values.get(&slot).copied()
    }
}

/// One template line after substitution
struct RenderedLine {
    text: String,
    held_plot_slot: bool,
    /// An unfilled plot path could not be cut out on its own
    dropped: bool,
}

/// Render one slide into beamer source
///
/// Fails if the slide carries more plots than the layout has slots; plots
/// are never dropped silently.
pub fn render(template: &LayoutTemplate, slide: &SlideContent<'_>) -> Result<String, LayoutError> {
    let count = slide.plots.len();
    if count > template.capacity() {
        return Err(LayoutError::unsupported(count, template.capacity()));
    }

    let values = SlotValues::for_slide(slide);
    let lines = template
        .source()
        .split_inclusive('\n')
        .map(|line| render_line(line, &values));
    Ok(collapse(lines))
}

/// Render a [`SlideSpec`] into the layout it resolved to
pub fn render_slide(template: &LayoutTemplate, spec: &SlideSpec) -> Result<String, LayoutError> {
    render(template, &SlideContent::from(spec))
}

fn render_line(line: &str, values: &SlotValues<'_>) -> RenderedLine {
    let mut text = String::with_capacity(line.len());
    let mut held_plot_slot = false;
    let mut dropped = false;
    let mut drop_closing_brace = false;

    for (token, span) in lex(line) {
        let raw = &line[span];
        let after_removed_embed = std::mem::take(&mut drop_closing_brace);
        match token {
            Token::Placeholder(name) => {
                let Some(slot) = Slot::parse(&name) else {
                    text.push_str(raw);
                    continue;
                };
                held_plot_slot |= slot.is_plot();
                match values.get(slot) {
                    Some(value) => text.push_str(value),
                    None if matches!(slot, Slot::PlotPath(_)) => {
                        drop_closing_brace = strip_embed(&mut text);
                        dropped |= !drop_closing_brace;
                    }
                    None if slot.is_plot() => {}
                    // Not a slide slot
                    None => text.push_str(raw),
                }
            }
            Token::Literal if after_removed_embed => {
                text.push_str(raw.trim_start().strip_prefix('}').unwrap_or(raw));
            }
            Token::Literal | Token::Newline => text.push_str(raw),
        }
    }

    RenderedLine {
        text,
        held_plot_slot,
        dropped,
    }
}

/// Remove a trailing embed directive opened up to its path brace
///
/// Accepts `\includegraphics`, optionally starred, followed by any mix of
/// `<overlay>` and `[options]` groups and whitespace before the `{`.
/// Returns whether the directive was found, in which case its closing
/// brace must be skipped too.
fn strip_embed(text: &mut String) -> bool {
    let Some(mut rest) = text.trim_end().strip_suffix('{') else {
        return false;
    };
    loop {
        let trimmed = rest.trim_end();
        let peeled = if let Some(inner) = trimmed.strip_suffix(']') {
            inner.rfind('[').map(|open| &inner[..open])
        } else if let Some(inner) = trimmed.strip_suffix('>') {
            inner.rfind('<').map(|open| &inner[..open])
        } else {
            trimmed.strip_suffix('*')
        };
        match peeled {
            Some(before) => rest = before,
            None => {
                rest = trimmed;
                break;
            }
        }
    }

    if !rest.ends_with(EMBED_COMMAND) {
        return false;
    }
    let start = rest.len() - EMBED_COMMAND.len();
    text.truncate(start);
    true
}

fn collapse(lines: impl Iterator<Item = RenderedLine>) -> String {
    let mut out = String::new();
    let mut ends_content = false;
    // A `\\` is held back until the next kept line shows whether it still
    // separates anything
    let mut pending_break: Option<String> = None;
    let mut removed_since_break = false;

    for line in lines {
        let trimmed = line.text.trim();
        if line.dropped || (line.held_plot_slot && trimmed.is_empty()) {
            removed_since_break = true;
            continue;
        }
        if trimmed == LINE_BREAK {
            if ends_content {
                pending_break = Some(line.text);
                ends_content = false;
                removed_since_break = false;
            }
            continue;
        }

        if let Some(line_break) = pending_break.take() {
            if !(removed_since_break && trimmed.starts_with(r"\end{")) {
                out.push_str(&line_break);
            }
        }
        ends_content = !(trimmed.is_empty() || trimmed.starts_with(r"\begin{"));
        out.push_str(&line.text);
    }

    if let Some(line_break) = pending_break {
        out.push_str(&line_break);
    }
    out
}
