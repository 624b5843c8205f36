//! Text matching for diagnostic messages and trace lines

/// How an asserted message or trace line is compared
#[derive(Debug, Clone)]
pub enum TextMatch {
    Exact(String),
    StartsWith(String),
    Contains(String),
}

impl TextMatch {
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            TextMatch::Exact(expected) => actual == expected,
            TextMatch::StartsWith(prefix) => actual.starts_with(prefix.as_str()),
            TextMatch::Contains(needle) => actual.contains(needle.as_str()),
        }
    }

    /// Panic with `context` in the message unless `actual` matches.
    pub fn assert(&self, actual: &str, context: &str) {
        assert!(
            self.matches(actual),
            "{}: expected text {}, got '{}'",
            context,
            self,
            actual
        );
    }
}

impl std::fmt::Display for TextMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextMatch::Exact(expected) => write!(f, "to be '{}'", expected),
            TextMatch::StartsWith(prefix) => write!(f, "to start with '{}'", prefix),
            TextMatch::Contains(needle) => write!(f, "to contain '{}'", needle),
        }
    }
}
