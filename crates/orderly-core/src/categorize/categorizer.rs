//! Rule-set driven categorizer.

use tracing::trace;

use super::{CategoryRule, ProductClassifier, FROZEN_CATEGORY};
use crate::models::config::OrderlyConfig;

/// Resolves product descriptions to category labels.
#[derive(Debug, Clone)]
pub struct Categorizer {
    /// Products starting with this are frozen, before any rule is consulted.
    frozen_prefix: String,
    /// Categories in declaration order.
    rules: Vec<CategoryRule>,
}

impl Categorizer {
    /// Create a categorizer with an explicit prefix and rule set.
    pub fn new(frozen_prefix: impl Into<String>, rules: Vec<CategoryRule>) -> Self {
        Self {
            frozen_prefix: frozen_prefix.into(),
            rules,
        }
    }

    /// Create a categorizer from the run configuration.
    pub fn from_config(config: &OrderlyConfig) -> Self {
        Self::new(config.markers.frozen_prefix.clone(), config.categories.clone())
    }

    /// Configured categories.
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }
}

impl ProductClassifier for Categorizer {
    fn classify(&self, product: &str) -> Option<String> {
        if !self.frozen_prefix.is_empty() && product.starts_with(&self.frozen_prefix) {
            return Some(FROZEN_CATEGORY.to_string());
        }

        let rule = self.rules.iter().find(|rule| rule.matches(product))?;
        trace!("{:?} matched category {:?}", product, rule.name);
        Some(rule.name.trim().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::Matcher;

    fn categorizer(rules: Vec<CategoryRule>) -> Categorizer {
        Categorizer::new("frz", rules)
    }

    #[test]
    fn test_frozen_prefix_wins_over_rules() {
        let c = categorizer(vec![CategoryRule::new(
            "poultry",
            vec![Matcher::substring("chicken")],
        )]);
        assert_eq!(c.classify("frz chicken breast"), Some("frozen".to_string()));
        assert_eq!(c.classify("chicken breast"), Some("poultry".to_string()));
    }

    #[test]
    fn test_frozen_prefix_is_case_sensitive() {
        let c = categorizer(vec![]);
        assert_eq!(c.classify("FRZ peas"), None);
        assert_eq!(c.classify("peas frz"), None);
    }

    #[test]
    fn test_substring_rule() {
        let c = categorizer(vec![CategoryRule::new("dairy", vec![Matcher::substring("milk")])]);
        assert_eq!(c.classify("whole milk"), Some("dairy".to_string()));
        assert_eq!(c.classify("sourdough"), None);
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        let c = categorizer(vec![
            CategoryRule::new("zesty", vec![Matcher::substring("lemon")]),
            CategoryRule::new("citrus", vec![Matcher::substring("lemon")]),
        ]);
        assert_eq!(c.classify("lemon"), Some("zesty".to_string()));

        let c = categorizer(vec![
            CategoryRule::new("citrus", vec![Matcher::substring("lemon")]),
            CategoryRule::new("zesty", vec![Matcher::substring("lemon")]),
        ]);
        assert_eq!(c.classify("lemon"), Some("citrus".to_string()));
    }

    #[test]
    fn test_pattern_rule_and_label_normalization() {
        let c = categorizer(vec![CategoryRule::new(
            " Customer Cuts ",
            vec![Matcher::pattern(r"^(rib|strip)eye").unwrap()],
        )]);
        assert_eq!(c.classify("ribeye 12oz"), Some("customer cuts".to_string()));
    }

    #[test]
    fn test_empty_frozen_prefix_disables_rule() {
        let c = Categorizer::new("", vec![]);
        assert_eq!(c.classify("anything"), None);
    }
}
