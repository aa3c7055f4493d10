//! List-request query parameters.

use lims_model::ListOptions;

/// Default delimiter between search clauses in the `search` parameter.
pub const DEFAULT_SEARCH_SEPARATOR: &str = ";";

/// Recognized query parameters of a list request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    /// Rows per page.
    pub rpp: Option<u32>,
    pub page: Option<u32>,
    /// Ordering keys, `-` prefix for descending.
    pub order: Vec<String>,
    /// Search clauses, each `field_expression=value`.
    pub search: Vec<String>,
    pub includes: Vec<String>,
    /// Depth of child records to include.
    pub children: Option<u32>,
    /// Include the change log with each record.
    pub log: bool,
}

impl ListParams {
    /// Seed params from a resource's default list options.
    pub fn from_options(options: &ListOptions) -> Self {
        Self {
            rpp: options.rpp,
            page: options.page,
            order: options.order.clone(),
            search: options
                .search
                .iter()
                .map(|(field, value)| format!("{}={}", field, value))
                .collect(),
            includes: options.includes.clone(),
            children: None,
            log: false,
        }
    }

    /// Ordered (name, value) query pairs. Empty parameters are omitted;
    /// search clauses are joined by `search_separator`.
    pub fn to_query_pairs(&self, search_separator: &str) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(rpp) = self.rpp {
            pairs.push(("rpp".to_string(), rpp.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if !self.order.is_empty() {
            pairs.push(("order".to_string(), self.order.join(",")));
        }
        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.join(search_separator)));
        }
        if !self.includes.is_empty() {
            pairs.push(("includes".to_string(), self.includes.join(",")));
        }
        if let Some(children) = self.children {
            pairs.push(("children".to_string(), children.to_string()));
        }
        if self.log {
            pairs.push(("log".to_string(), "true".to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn options_map_to_search_clauses() {
        let mut search = BTreeMap::new();
        search.insert("screen_type__in".to_string(), "rnai".to_string());
        search.insert("project_phase__ne".to_string(), "annotation".to_string());
        let options = ListOptions {
            rpp: Some(500),
            order: vec!["short_name".to_string()],
            search,
            ..ListOptions::default()
        };

        let params = ListParams::from_options(&options);
        let pairs = params.to_query_pairs(DEFAULT_SEARCH_SEPARATOR);
        assert_eq!(
            pairs,
            vec![
                ("rpp".to_string(), "500".to_string()),
                ("order".to_string(), "short_name".to_string()),
                (
                    "search".to_string(),
                    "project_phase__ne=annotation;screen_type__in=rnai".to_string()
                ),
            ]
        );
    }

    #[test]
    fn empty_params_yield_no_pairs() {
        assert!(ListParams::default().to_query_pairs(";").is_empty());
    }
}
