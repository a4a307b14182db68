//! Deck descriptions: the structured input that drives slide generation
//!
//! A deck is described in JSON, TOML or YAML:
//!
//! ```json
//! {
//!     "frontpage": {"title": "Jet studies", "subtitle": "Week 3", "author": "R. A."},
//!     "slides": [
//!         {"title": "Rates", "toptext": "Before cuts", "plots": [["rate.pdf", "Rate"]]}
//!     ]
//! }
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Serialization format of a deck description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Choose a format from a file extension; anything unknown is JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => ConfigFormat::Toml,
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigFormat::Json => "JSON",
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Yaml => "YAML",
        };
        f.write_str(name)
    }
}

/// One image on a slide and the caption shown above it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PlotEntry")]
pub struct PlotRef {
    pub path: String,
    pub caption: String,
}

impl PlotRef {
    pub fn new(path: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            caption: caption.into(),
        }
    }
}

/// Accepted spellings of a plot entry
#[derive(Deserialize)]
#[serde(untagged)]
enum PlotEntry {
    Pair(String, String),
    Single((String,)),
    Path(String),
    Table {
        path: String,
        #[serde(default)]
        caption: String,
    },
}

impl From<PlotEntry> for PlotRef {
    fn from(entry: PlotEntry) -> Self {
        match entry {
            PlotEntry::Pair(path, caption) => PlotRef { path, caption },
            PlotEntry::Single((path,)) | PlotEntry::Path(path) => PlotRef {
                path,
                caption: String::new(),
            },
            PlotEntry::Table { path, caption } => PlotRef { path, caption },
        }
    }
}

/// Description of one slide
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSpec {
    #[serde(default)]
    pub title: String,
    /// Section heading; the title is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, rename = "toptext", skip_serializing_if = "Option::is_none")]
    pub top_text: Option<String>,
    #[serde(default, rename = "bottomtext", skip_serializing_if = "Option::is_none")]
    pub bottom_text: Option<String>,
    #[serde(default)]
    pub plots: Vec<PlotRef>,
}

impl SlideSpec {
    /// Create a slide with a title and no plots
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the section heading
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Set the text shown above the plots
    pub fn with_top_text(mut self, text: impl Into<String>) -> Self {
        self.top_text = Some(text.into());
        self
    }

    /// Set the text shown below the plots
    pub fn with_bottom_text(mut self, text: impl Into<String>) -> Self {
        self.bottom_text = Some(text.into());
        self
    }

    /// Append a plot
    pub fn with_plot(mut self, path: impl Into<String>, caption: impl Into<String>) -> Self {
        self.plots.push(PlotRef::new(path, caption));
        self
    }

    /// Section heading, falling back to the title
    pub fn section(&self) -> &str {
        self.section.as_deref().unwrap_or(&self.title)
    }
}

/// Title page metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub author: String,
}

fn default_toc() -> bool {
    true
}

/// A complete deck: title page, ordered slides and the outline switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSpec {
    pub frontpage: FrontMatter,
    pub slides: Vec<SlideSpec>,
    #[serde(default = "default_toc")]
    pub table_of_contents: bool,
}

impl DeckSpec {
    /// Create an empty deck with an outline
    pub fn new(frontpage: FrontMatter) -> Self {
        Self {
            frontpage,
            slides: Vec::new(),
            table_of_contents: true,
        }
    }

    /// Load a deck from a file, choosing the format by extension
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str_with_format(&content, ConfigFormat::from_path(path))
    }

    /// Load a deck from a string in the given format
    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| ConfigError::from_json(e, content))
            }
            ConfigFormat::Toml => toml::from_str(content).map_err(ConfigError::from_toml),
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| ConfigError::from_yaml(e, content))
            }
        }
    }

    /// Serialize the deck as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_minimal_json_deck() {
        let json = r#"{"frontpage":{"title":"T"},"slides":[{"title":"S1","plots":[["a.pdf","capA"]]}]}"#;
        let deck = DeckSpec::from_str_with_format(json, ConfigFormat::Json).expect("Should parse");
        assert_eq!(deck.frontpage.title, "T");
        assert_eq!(deck.frontpage.subtitle, "");
        assert!(deck.table_of_contents);
        assert_eq!(deck.slides.len(), 1);
        assert_eq!(deck.slides[0].plots, vec![PlotRef::new("a.pdf", "capA")]);
        assert_eq!(deck.slides[0].section(), "S1");
    }

    #[test]
    fn test_plot_entry_spellings() {
        let json = r#"{
            "frontpage": {},
            "slides": [{
                "title": "s",
                "plots": ["bare.pdf", ["single.pdf"], ["pair.pdf", "cap"], {"path": "table.pdf"}]
            }]
        }"#;
        let deck = DeckSpec::from_str_with_format(json, ConfigFormat::Json).expect("Should parse");
        assert_eq!(
            deck.slides[0].plots,
            vec![
                PlotRef::new("bare.pdf", ""),
                PlotRef::new("single.pdf", ""),
                PlotRef::new("pair.pdf", "cap"),
                PlotRef::new("table.pdf", ""),
            ]
        );
    }

    #[test]
    fn test_slide_text_keys() {
        let json = r#"{"frontpage":{},"slides":[{"title":"t","section":"Intro","toptext":"above","bottomtext":"below"}]}"#;
        let deck = DeckSpec::from_str_with_format(json, ConfigFormat::Json).unwrap();
        let slide = &deck.slides[0];
        assert_eq!(slide.section(), "Intro");
        assert_eq!(slide.top_text.as_deref(), Some("above"));
        assert_eq!(slide.bottom_text.as_deref(), Some("below"));
        assert!(slide.plots.is_empty());
    }

    #[test]
    fn test_toml_deck() {
        let toml_str = r#"
table_of_contents = false

[frontpage]
title = "Toml deck"
author = "me"

[[slides]]
title = "One"
plots = [["a.pdf", "A"], ["b.pdf", "B"]]
"#;
        let deck = DeckSpec::from_str_with_format(toml_str, ConfigFormat::Toml).expect("Should parse");
        assert!(!deck.table_of_contents);
        assert_eq!(deck.frontpage.author, "me");
        assert_eq!(deck.slides[0].plots.len(), 2);
    }

    #[test]
    fn test_yaml_deck() {
        let yaml = r#"
frontpage:
  title: Yaml deck
slides:
  - title: First
    plots:
      - [x.png, X]
  - title: Second
"#;
        let deck = DeckSpec::from_str_with_format(yaml, ConfigFormat::Yaml).expect("Should parse");
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].plots[0], PlotRef::new("x.png", "X"));
    }

    #[test]
    fn test_missing_slides_is_error() {
        let result = DeckSpec::from_str_with_format(r#"{"frontpage":{}}"#, ConfigFormat::Json);
        assert!(matches!(result, Err(ConfigError::Syntax { .. })));
    }

    #[test]
    fn test_invalid_toml_has_span() {
        let err = DeckSpec::from_str_with_format("frontpage = {{{{", ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { format: ConfigFormat::Toml, .. }));
        assert!(err.span().is_some());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(&PathBuf::from("a.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(&PathBuf::from("a.YML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(&PathBuf::from("a.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(&PathBuf::from("deck")), ConfigFormat::Json);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = DeckSpec::from_file(Path::new("/nonexistent/deck.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_json_round_trip_keeps_keys() {
        let deck = DeckSpec {
            slides: vec![SlideSpec::new("s").with_top_text("t").with_plot("p.pdf", "c")],
            ..DeckSpec::new(FrontMatter::default())
        };
        let json = deck.to_json().unwrap();
        assert!(json.contains("\"toptext\""));
        let back = DeckSpec::from_str_with_format(&json, ConfigFormat::Json).unwrap();
        assert_eq!(back, deck);
    }
}
