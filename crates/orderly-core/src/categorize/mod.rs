//! Product categorization with layered matching rules.
//!
//! A product is checked against the frozen prefix first, then against the
//! configured categories in declaration order. The first hit wins.

mod categorizer;
mod matcher;

pub use categorizer::Categorizer;
pub use matcher::{CategoryRule, Matcher, Pattern};

/// Label assigned to every product carrying the frozen prefix.
pub const FROZEN_CATEGORY: &str = "frozen";

/// Categories whose label contains this get the client appended to quantities.
pub const CUSTOMER_MARKER: &str = "customer";

/// Trait for product classifiers.
pub trait ProductClassifier {
    /// Resolve the category of a product, `None` if nothing matches.
    fn classify(&self, product: &str) -> Option<String>;
}

/// Check whether a category label marks customer-specific splits.
pub fn is_customer_category(label: &str) -> bool {
    label.to_lowercase().contains(CUSTOMER_MARKER)
}
