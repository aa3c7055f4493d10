//! The navigation stack: ordered path segments naming the current location.
//!
//! A stack reads `[view, resource, id?, 'search', term?, ...list args]`.
//! Encoding and decoding between the stack and the visible URL path live in
//! the navigation crate; this type only carries the segments and the small
//! accessors views need.

use serde::{Deserialize, Serialize};

/// Reserved list-argument keywords. These delimit free-form search terms
/// inside a path: a search term runs until the next reserved keyword.
pub const LIST_ARGS: &[&str] = &["rpp", "page", "includes", "order", "log", "children", "search"];

/// The search keyword itself.
pub const SEARCH_SEGMENT: &str = "search";

/// True for segments that terminate a free-form search term.
pub fn is_list_argument(segment: &str) -> bool {
    LIST_ARGS.contains(&segment)
}

/// Ordered path segments representing the current application location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationStack {
    segments: Vec<String>,
}

impl NavigationStack {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn push(&mut self, segment: &str) {
        self.segments.push(segment.to_string());
    }

    /// The view segment (`list`, `detail`, ...), when present.
    pub fn view(&self) -> Option<&str> {
        self.segments.first().map(|s| s.as_str())
    }

    /// The resource key segment, when present.
    pub fn resource_id(&self) -> Option<&str> {
        self.segments.get(1).map(|s| s.as_str())
    }

    /// The first search term on the stack, when one is present.
    pub fn search_term(&self) -> Option<&str> {
        let mut segments = self.segments.iter();
        while let Some(segment) = segments.next() {
            if segment == SEARCH_SEGMENT {
                return segments.next().map(|s| s.as_str());
            }
        }
        None
    }
}

impl From<Vec<String>> for NavigationStack {
    fn from(segments: Vec<String>) -> Self {
        Self::new(segments)
    }
}

impl From<&[&str]> for NavigationStack {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl std::fmt::Display for NavigationStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.segments.join(", "))
    }
}
