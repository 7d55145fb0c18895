//! Matchers that decide whether a product belongs to a category.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A compiled regular expression that round-trips through config files as
/// its source string.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    /// Source text of the pattern.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl TryFrom<String> for Pattern {
    type Error = regex::Error;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        Self::new(&source)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.as_str().to_string()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// One way a product can match a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Matcher {
    /// Case-insensitive containment of the trimmed text.
    Substring(String),
    /// Regular expression tested against the product as given.
    Pattern(Pattern),
}

impl Matcher {
    /// Build a substring matcher.
    pub fn substring(text: impl Into<String>) -> Self {
        Matcher::Substring(text.into())
    }

    /// Build a pattern matcher.
    pub fn pattern(source: &str) -> Result<Self, regex::Error> {
        Pattern::new(source).map(Matcher::Pattern)
    }

    /// Test a product against this matcher.
    pub fn matches(&self, product: &str) -> bool {
        match self {
            Matcher::Substring(text) => product
                .trim()
                .to_lowercase()
                .contains(&text.trim().to_lowercase()),
            Matcher::Pattern(pattern) => pattern.is_match(product),
        }
    }
}

/// A category label with its matchers, in the order they are tried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category label.
    pub name: String,
    /// Matchers, first hit wins.
    #[serde(default)]
    pub matchers: Vec<Matcher>,
}

impl CategoryRule {
    pub fn new(name: impl Into<String>, matchers: Vec<Matcher>) -> Self {
        Self {
            name: name.into(),
            matchers,
        }
    }

    /// Check whether any matcher accepts the product.
    pub fn matches(&self, product: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(product))
    }
}
