//! Layout registry mapping plot counts to slide templates

use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::error::LayoutError;

/// Built-in layouts as (name, capacity, template source)
const BUILTIN_LAYOUTS: [(&str, usize, &str); 8] = [
    ("zero_plot", 0, include_str!("templates/zero_plot.tex")),
    ("one_plot", 1, include_str!("templates/one_plot.tex")),
    ("two_plot", 2, include_str!("templates/two_plot.tex")),
    ("three_plot", 3, include_str!("templates/three_plot.tex")),
    ("four_plot", 4, include_str!("templates/four_plot.tex")),
    ("six_plot", 6, include_str!("templates/six_plot.tex")),
    ("eight_plot", 8, include_str!("templates/eight_plot.tex")),
    ("ten_plot", 10, include_str!("templates/ten_plot.tex")),
];

/// An immutable slide skeleton sized for at most `capacity` plots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTemplate {
    name: String,
    capacity: usize,
    source: String,
}

impl LayoutTemplate {
    /// Create a template from its name, plot capacity and LaTeX source
    pub fn new(name: impl Into<String>, capacity: usize, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity,
            source: source.into(),
        }
    }

    /// Template name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum number of plots this layout can hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Template text with `@` placeholders
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Registry of layouts keyed by plot capacity
///
/// A plot count resolves to the layout with the smallest capacity that can
/// hold it. With the built-in set this gives exact matches for 0 to 3 plots
/// and the inclusive ceilings 4, 6, 8 and 10 above that.
#[derive(Debug, Default)]
pub struct LayoutRegistry {
    layouts: BTreeMap<usize, LayoutTemplate>,
}

impl LayoutRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry of built-in beamer layouts
    pub fn builtin() -> &'static LayoutRegistry {
        static BUILTIN: OnceLock<LayoutRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| LayoutRegistry {
            layouts: BUILTIN_LAYOUTS
                .iter()
                .map(|&(name, capacity, source)| {
                    (capacity, LayoutTemplate::new(name, capacity, source))
                })
                .collect(),
        })
    }

    /// Register a layout
    pub fn register(&mut self, template: LayoutTemplate) -> Result<(), LayoutError> {
        if self.layouts.contains_key(&template.capacity) {
            return Err(LayoutError::DuplicateCapacity {
                capacity: template.capacity,
                name: template.name,
            });
        }
        self.layouts.insert(template.capacity, template);
        Ok(())
    }

    /// Pick the layout for a slide carrying `plot_count` plots
    pub fn resolve(&self, plot_count: usize) -> Result<&LayoutTemplate, LayoutError> {
        self.layouts
            .range(plot_count..)
            .next()
            .map(|(_, template)| template)
            .ok_or_else(|| LayoutError::unsupported(plot_count, self.max_capacity()))
    }

    /// Get the layout registered for an exact capacity
    pub fn get(&self, capacity: usize) -> Option<&LayoutTemplate> {
        self.layouts.get(&capacity)
    }

    /// Largest plot count any registered layout can hold
    pub fn max_capacity(&self) -> usize {
        self.layouts.keys().next_back().copied().unwrap_or(0)
    }

    /// Registered capacities in ascending order
    pub fn capacities(&self) -> impl Iterator<Item = usize> + '_ {
        self.layouts.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_capacities() {
        let registry = LayoutRegistry::builtin();
        let capacities: Vec<_> = registry.capacities().collect();
        assert_eq!(capacities, vec![0, 1, 2, 3, 4, 6, 8, 10]);
        assert_eq!(registry.max_capacity(), 10);
    }

    #[test]
    fn test_resolve_buckets() {
        let registry = LayoutRegistry::builtin();
        let expected = [
            (0, "zero_plot"),
            (1, "one_plot"),
            (2, "two_plot"),
            (3, "three_plot"),
            (4, "four_plot"),
            (5, "six_plot"),
            (6, "six_plot"),
            (7, "eight_plot"),
            (8, "eight_plot"),
            (9, "ten_plot"),
            (10, "ten_plot"),
        ];
        for (count, name) in expected {
            let template = registry.resolve(count).expect("Should resolve");
            assert_eq!(template.name(), name, "plot count {}", count);
            assert!(template.capacity() >= count);
        }
    }

    #[test]
    fn test_resolve_too_many_plots() {
        let registry = LayoutRegistry::builtin();
        assert_eq!(
            registry.resolve(11),
            Err(LayoutError::Unsupported { count: 11, max: 10 })
        );
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(
            LayoutRegistry::builtin(),
            LayoutRegistry::builtin()
        ));
    }

    #[test]
    fn test_builtin_templates_declare_their_slots() {
        let registry = LayoutRegistry::builtin();
        for capacity in registry.capacities() {
            let source = registry.get(capacity).unwrap().source();
            assert!(source.contains("@SLIDE_TITLE"));
            assert!(source.contains("@SLIDE_SECTION"));
            for k in 1..=capacity {
                assert!(source.contains(&format!("{{@PLOT{}}}", k)));
                assert!(source.contains(&format!("@PLOT{}TITLE", k)));
            }
            assert!(!source.contains(&format!("@PLOT{}}}", capacity + 1)));
        }
    }

    #[test]
    fn test_register_and_duplicate_error() {
        let mut registry = LayoutRegistry::new();
        assert!(registry.is_empty());
        registry
            .register(LayoutTemplate::new("solo", 1, "@PLOT1"))
            .expect("First register should succeed");

        let result = registry.register(LayoutTemplate::new("other", 1, "@PLOT1"));
        assert!(matches!(
            result,
            Err(LayoutError::DuplicateCapacity { capacity: 1, .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_custom_registry_ceiling() {
        let mut registry = LayoutRegistry::new();
        registry
            .register(LayoutTemplate::new("pair", 2, ""))
            .unwrap();
        registry
            .register(LayoutTemplate::new("grid", 5, ""))
            .unwrap();

        assert_eq!(registry.resolve(0).unwrap().name(), "pair");
        assert_eq!(registry.resolve(3).unwrap().name(), "grid");
        assert_eq!(
            registry.resolve(6),
            Err(LayoutError::Unsupported { count: 6, max: 5 })
        );
    }
}
