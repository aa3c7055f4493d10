//! The static UI-resource fixture.
//!
//! The fixture declares per-resource UI configuration (titles, routes,
//! default list options) and the virtual resources that overlay a concrete
//! server resource with a filtered sub-view. It is consumed once at
//! startup by [`crate::compose`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lims_model::{ListOptions, UiResource};

/// The bundled fixture, transcribed from the deployed configuration.
const DEFAULT_FIXTURE: &str = include_str!("../fixture/ui_resources.json");

/// One fixture entry. All attributes are optional; `api_resource` defaults
/// to the entry key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub api_resource: Option<String>,
    #[serde(default)]
    pub url_root: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub header_message: Option<String>,
    #[serde(default)]
    pub options: ListOptions,
}

impl FixtureEntry {
    /// Expand into a [`UiResource`] with an empty schema.
    pub fn into_resource(self, key: &str) -> UiResource {
        UiResource {
            key: key.to_string(),
            title: self.title,
            route: self.route,
            api_resource: self.api_resource.unwrap_or_else(|| key.to_string()),
            url_root: self.url_root,
            description: self.description,
            header_message: self.header_message,
            schema: Default::default(),
            options: self.options,
        }
    }
}

/// Fixture entries keyed by resource id.
pub type Fixture = BTreeMap<String, FixtureEntry>;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("fixture is not valid JSON: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

/// Parse a fixture from JSON text.
pub fn parse_fixture(text: &str) -> Result<Fixture, FixtureError> {
    Ok(serde_json::from_str(text)?)
}

/// The fixture bundled with this crate.
pub fn default_fixture() -> Fixture {
    // The bundled fixture is validated by tests; a parse failure here is a
    // build defect, not a runtime condition.
    parse_fixture(DEFAULT_FIXTURE).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_fixture_parses() {
        let fixture = parse_fixture(DEFAULT_FIXTURE).expect("bundled fixture");
        assert!(fixture.contains_key("screen"));
        assert!(fixture.contains_key("screeners"));
        let screeners = &fixture["screeners"];
        assert_eq!(screeners.api_resource.as_deref(), Some("screensaveruser"));
        assert_eq!(
            screeners.options.search.get("screeningroomuser__isnull"),
            Some(&"False".to_string())
        );
    }

    #[test]
    fn api_resource_defaults_to_entry_key() {
        let fixture = default_fixture();
        let copywell = fixture["copywell"].clone().into_resource("copywell");
        assert_eq!(copywell.api_resource, "copywell");
        assert!(!copywell.is_virtual());
    }
}
