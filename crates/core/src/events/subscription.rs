// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event pattern matching and subscriptions

/// Pattern for matching event names
///
/// - Exact: `job:completed`
/// - Single segment: `job:*` matches `job:running` but not `job:a:b`
/// - Remainder: `upload:**` matches every upload event
/// - `*` or `**` alone matches everything
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventPattern(String);

impl EventPattern {
    pub fn new(pattern: &str) -> Self {
        Self(pattern.to_string())
    }

    pub fn matches(&self, event_name: &str) -> bool {
        match self.0.as_str() {
            "" => false,
            "*" | "**" => true,
            pattern => {
                let pattern: Vec<&str> = pattern.split(':').collect();
                let name: Vec<&str> = event_name.split(':').collect();
                Self::match_segments(&pattern, &name)
            }
        }
    }

    fn match_segments(pattern: &[&str], name: &[&str]) -> bool {
        match (pattern.split_first(), name.split_first()) {
            (None, None) => true,
            (Some((&"**", _)), _) => true,
            (Some((&"*", p_rest)), Some((_, n_rest))) => Self::match_segments(p_rest, n_rest),
            (Some((p, p_rest)), Some((n, n_rest))) if p == n => {
                Self::match_segments(p_rest, n_rest)
            }
            _ => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Handle for unsubscribing
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub String);

/// A named set of patterns
#[derive(Clone, Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub patterns: Vec<EventPattern>,
}

impl Subscription {
    pub fn new(id: impl Into<String>, patterns: Vec<EventPattern>) -> Self {
        Self {
            id: SubscriberId(id.into()),
            patterns,
        }
    }

    /// Subscription to every event
    pub fn all(id: impl Into<String>) -> Self {
        Self::new(id, vec![EventPattern::new("**")])
    }

    pub fn matches(&self, event_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(event_name))
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
