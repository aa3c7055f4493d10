//! Conversion between the visible URL path and the navigation stack.
//!
//! The only subtlety is search terms: a term may itself contain `/`, so
//! on decode every segment after the literal `search` is folded into one
//! term until the next reserved list-argument keyword. Decoding never
//! fails; malformed input degrades to a partial stack.

use lims_model::{NavigationStack, SEARCH_SEGMENT, is_list_argument};

/// Decode a URL path into a navigation stack.
pub fn decode(path: &str) -> NavigationStack {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut stack = NavigationStack::default();
    let mut index = 0;
    while index < segments.len() {
        let segment = segments[index];
        stack.push(segment);
        index += 1;
        if segment == SEARCH_SEGMENT {
            // Fold everything up to the next reserved keyword into one term.
            let start = index;
            while index < segments.len() && !is_list_argument(segments[index]) {
                index += 1;
            }
            stack.push(&segments[start..index].join("/"));
        }
    }
    stack
}

/// Encode a navigation stack as a URL path.
///
/// Empty segments (an empty search term) are skipped, so decode then
/// encode reproduces the original path.
pub fn encode(stack: &NavigationStack) -> String {
    stack
        .segments()
        .iter()
        .filter(|segment| !segment.is_empty())
        .cloned()
        .collect::<Vec<String>>()
        .join("/")
}
