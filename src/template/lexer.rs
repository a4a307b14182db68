//! Lexer for slide and front-matter templates using logos
//!
//! Templates are plain LaTeX with `@NAME` placeholders. The lexer splits a
//! template into literal runs, placeholder candidates and line terminators;
//! every byte of the input belongs to exactly one token.

use logos::Logos;

/// Byte range in template text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// `@` followed by the longest run of name characters, without the `@`
    #[regex(r"@[A-Za-z0-9_]*", |lex| lex.slice()[1..].to_string())]
    Placeholder(String),

    #[regex(r"[^@\n]+")]
    Literal,

    #[token("\n")]
    Newline,
}

/// A placeholder name recognised by the renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    // Slide layouts
    SlideTitle,
    SlideSection,
    TopText,
    BottomText,
    /// `@PLOTkTITLE`, 1-based
    PlotCaption(usize),
    /// `@PLOTk`, 1-based
    PlotPath(usize),

    // Front matter
    Title,
    Subtitle,
    Author,
    File,
    Toc,
}

impl Slot {
    /// Parse a placeholder name (without `@`); unknown names give `None`
    pub fn parse(name: &str) -> Option<Slot> {
        let slot = match name {
            "SLIDE_TITLE" => Slot::SlideTitle,
            "SLIDE_SECTION" => Slot::SlideSection,
            "TOPTEXT" => Slot::TopText,
            "BOTTOMTEXT" => Slot::BottomText,
            "TITLE" => Slot::Title,
            "SUBTITLE" => Slot::Subtitle,
            "AUTHOR" => Slot::Author,
            "FILE" => Slot::File,
            "TOC" => Slot::Toc,
            _ => return Self::parse_plot(name),
        };
        Some(slot)
    }

    fn parse_plot(name: &str) -> Option<Slot> {
        let rest = name.strip_prefix("PLOT")?;
        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        let (index, suffix) = rest.split_at(digits);
        if index.is_empty() || index.starts_with('0') {
            return None;
        }
        let index: usize = index.parse().ok()?;
        match suffix {
            "" => Some(Slot::PlotPath(index)),
            "TITLE" => Some(Slot::PlotCaption(index)),
            _ => None,
        }
    }

    /// Whether this slot belongs to a positional plot pair
    pub fn is_plot(self) -> bool {
        matches!(self, Slot::PlotCaption(_) | Slot::PlotPath(_))
    }
}

/// Lex template text into tokens with spans
///
/// Bytes the lexer cannot classify are reported as literals so the spans
/// always tile the input.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Literal), span))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_and_literals() {
        let tokens: Vec<_> = lex(r"\section{@SLIDE_SECTION}").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Literal,
                Token::Placeholder("SLIDE_SECTION".to_string()),
                Token::Literal
            ]
        );
    }

    #[test]
    fn test_longest_placeholder_name_wins() {
        let tokens: Vec<_> = lex("@PLOT10TITLE @PLOT10 @PLOT1").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Placeholder("PLOT10TITLE".to_string()),
                Token::Literal,
                Token::Placeholder("PLOT10".to_string()),
                Token::Literal,
                Token::Placeholder("PLOT1".to_string()),
            ]
        );
    }

    #[test]
    fn test_newlines_are_tokens() {
        let tokens: Vec<_> = lex("a\n@TOC\n").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Literal,
                Token::Newline,
                Token::Placeholder("TOC".to_string()),
                Token::Newline
            ]
        );
    }

    #[test]
    fn test_spans_tile_input() {
        let input = "x@ y @@Z \\\\ {@PLOT3}\r\n";
        let mut end = 0;
        for (_, span) in lex(input) {
            assert_eq!(span.start, end);
            end = span.end;
        }
        assert_eq!(end, input.len());
    }

    #[test]
    fn test_bare_at_sign() {
        let tokens: Vec<_> = lex("a@ b").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Literal,
                Token::Placeholder(String::new()),
                Token::Literal
            ]
        );
    }

    #[test]
    fn test_slot_parse_known_names() {
        assert_eq!(Slot::parse("SLIDE_TITLE"), Some(Slot::SlideTitle));
        assert_eq!(Slot::parse("BOTTOMTEXT"), Some(Slot::BottomText));
        assert_eq!(Slot::parse("SUBTITLE"), Some(Slot::Subtitle));
        assert_eq!(Slot::parse("TOC"), Some(Slot::Toc));
    }

    #[test]
    fn test_slot_parse_plots() {
        assert_eq!(Slot::parse("PLOT1"), Some(Slot::PlotPath(1)));
        assert_eq!(Slot::parse("PLOT10"), Some(Slot::PlotPath(10)));
        assert_eq!(Slot::parse("PLOT10TITLE"), Some(Slot::PlotCaption(10)));
        assert_eq!(Slot::parse("PLOT"), None);
        assert_eq!(Slot::parse("PLOT0"), None);
        assert_eq!(Slot::parse("PLOT01"), None);
        assert_eq!(Slot::parse("PLOT2CAPTION"), None);
    }

    #[test]
    fn test_slot_parse_unknown() {
        assert_eq!(Slot::parse("TITLES"), None);
        assert_eq!(Slot::parse("title"), None);
        assert_eq!(Slot::parse(""), None);
    }
}
