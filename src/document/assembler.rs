//! Front-matter assembly - builds the top-level document around the slides

use crate::config::FrontMatter;
use crate::template::{lex, Slot, Token};

/// Built-in beamer front matter with `@TITLE`, `@SUBTITLE`, `@AUTHOR`,
/// `@TOC` and `@FILE` slots
pub const DEFAULT_FRONT_MATTER: &str = include_str!("default_front.tex");

/// Outline frame substituted for `@TOC`
pub const TOC_BLOCK: &str = "\\begin{frame}{Outline}\n\\tableofcontents\n\\end{frame}";

/// Fill the front-matter template
///
/// Works line by line; lines without a known slot are copied through
/// unchanged, line terminators included. Slots match whole placeholder
/// names only, so `@TITLE` never fires inside `@SUBTITLE`.
pub fn assemble(
    front_template: &str,
    front: &FrontMatter,
    body_reference: &str,
    toc_enabled: bool,
) -> String {
    let toc = if toc_enabled { TOC_BLOCK } else { "" };
    let value_of = |slot: Slot| match slot {
        Slot::Title => Some(front.title.as_str()),
        Slot::Subtitle => Some(front.subtitle.as_str()),
        Slot::Author => Some(front.author.as_str()),
        Slot::File => Some(body_reference),
        Slot::Toc => Some(toc),
        _ => None,
    };

    let mut out = String::with_capacity(front_template.len() + body_reference.len());
    for line in front_template.split_inclusive('\n') {
        for (token, span) in lex(line) {
            let raw = &line[span];
            let value = match token {
                Token::Placeholder(name) => Slot::parse(&name).and_then(value_of),
                Token::Literal | Token::Newline => None,
            };
            out.push_str(value.unwrap_or(raw));
        }
    }
    out
}
