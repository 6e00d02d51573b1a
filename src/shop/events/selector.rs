//! # Event Selectors
//!
//! A subscription targets either one exact event name or a family of names
//! described by a regular expression.

use regex::Regex;
use std::fmt;

/// What a subscription listens to
#[derive(Debug, Clone)]
pub enum EventSelector {
    /// Matches a single event name
    Exact(String),
    /// Matches every event name the expression finds a match in
    Pattern(Regex),
}

impl EventSelector {
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    /// Compile a pattern selector
    pub fn pattern(expression: &str) -> Result<Self, regex::Error> {
        Ok(Self::Pattern(Regex::new(expression)?))
    }

    /// Check whether an event published under `name` reaches this selector
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => exact == name,
            Self::Pattern(pattern) => pattern.is_match(name),
        }
    }
}

impl PartialEq for EventSelector {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for EventSelector {}

impl From<&str> for EventSelector {
    fn from(name: &str) -> Self {
        Self::exact(name)
    }
}

impl From<String> for EventSelector {
    fn from(name: String) -> Self {
        Self::Exact(name)
    }
}

impl From<Regex> for EventSelector {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl fmt::Display for EventSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => write!(f, "{name}"),
            Self::Pattern(pattern) => write!(f, "/{}/", pattern.as_str()),
        }
    }
}
