//! Navigable resource descriptors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::ResourceSchema;

/// Default list parameters carried by a [`UiResource`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Rows per page.
    #[serde(default)]
    pub rpp: Option<u32>,
    /// Page-size choices offered to the user.
    #[serde(default)]
    pub rpp_selections: Vec<u32>,
    #[serde(default)]
    pub page: Option<u32>,
    /// Ordering keys; a leading `-` marks descending.
    #[serde(default)]
    pub order: Vec<String>,
    /// Default search filter, field expression to value.
    #[serde(default)]
    pub search: BTreeMap<String, String>,
    /// Field keys added to (or, with a leading `-`, removed from) the
    /// default visible columns.
    #[serde(default)]
    pub includes: Vec<String>,
}

impl ListOptions {
    pub fn is_empty(&self) -> bool {
        self.rpp.is_none()
            && self.rpp_selections.is_empty()
            && self.page.is_none()
            && self.order.is_empty()
            && self.search.is_empty()
            && self.includes.is_empty()
    }

    /// Overlay `other` onto `self`: fields declared by `other` win.
    pub fn overlaid_with(&self, other: &ListOptions) -> ListOptions {
        ListOptions {
            rpp: other.rpp.or(self.rpp),
            rpp_selections: if other.rpp_selections.is_empty() {
                self.rpp_selections.clone()
            } else {
                other.rpp_selections.clone()
            },
            page: other.page.or(self.page),
            order: if other.order.is_empty() {
                self.order.clone()
            } else {
                other.order.clone()
            },
            search: if other.search.is_empty() {
                self.search.clone()
            } else {
                other.search.clone()
            },
            includes: if other.includes.is_empty() {
                self.includes.clone()
            } else {
                other.includes.clone()
            },
        }
    }
}

/// Client-side descriptor of one navigable entity type.
///
/// A UiResource merges the server-declared schema with static UI
/// configuration. When `api_resource` differs from `key` the resource is
/// "virtual": it inherits the schema of the underlying resource and adds
/// its own overrides (typically a default search filter).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiResource {
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    /// Underlying REST resource key. Equals `key` for concrete resources.
    #[serde(default)]
    pub api_resource: String,
    #[serde(default)]
    pub url_root: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub header_message: Option<String>,
    /// Server resource listings declare this as `fields`.
    #[serde(default, alias = "fields")]
    pub schema: ResourceSchema,
    #[serde(default)]
    pub options: ListOptions,
}

impl UiResource {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            api_resource: key.to_string(),
            ..Self::default()
        }
    }

    /// True when this resource borrows another resource's schema.
    pub fn is_virtual(&self) -> bool {
        self.api_resource != self.key
    }

    /// Display title, falling back to the key.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.key.as_str())
    }
}
