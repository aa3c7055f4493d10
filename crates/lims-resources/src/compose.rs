//! The UI-resource composer.
//!
//! Merges the static fixture with the server's resource schemas into the
//! unified registry the rest of the client navigates by. Runs once per
//! session, after the server resource listing is fetched.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use lims_model::UiResource;

use crate::fixture::Fixture;

/// The composed resource registry, keyed by resource id.
pub type ResourceRegistry = BTreeMap<String, UiResource>;

/// Compose the bundled fixture shape with a server resource snapshot.
pub fn compose_fixture(fixture: &Fixture, server: &[UiResource]) -> ResourceRegistry {
    let expanded: ResourceRegistry = fixture
        .iter()
        .map(|(key, entry)| (key.clone(), entry.clone().into_resource(key)))
        .collect();
    compose(&expanded, server)
}

/// Compose client-declared resources with server resource schemas.
///
/// 1. Server resources seed the registry by key.
/// 2. Client entries merge over the server entry of the same key (client
///    declarations win) or stand alone when the server has no counterpart.
/// 3. Every entry whose `api_resource` differs from its key is overlaid on
///    the resource named by `api_resource`, inheriting that schema verbatim
///    plus its own declared options.
///
/// Composition is idempotent: feeding the output back in with the same
/// server snapshot yields the same registry.
pub fn compose(declared: &ResourceRegistry, server: &[UiResource]) -> ResourceRegistry {
    let mut registry: ResourceRegistry = server
        .iter()
        .map(|resource| (resource.key.clone(), resource.clone()))
        .collect();

    for (key, entry) in declared {
        match registry.remove(key) {
            Some(base) => {
                registry.insert(key.clone(), overlay(&base, entry));
            }
            None => {
                registry.insert(key.clone(), entry.clone());
            }
        }
    }

    // Virtual-resource inheritance pass.
    let virtual_keys: Vec<String> = registry
        .values()
        .filter(|resource| resource.is_virtual())
        .map(|resource| resource.key.clone())
        .collect();
    for key in virtual_keys {
        let entry = registry[&key].clone();
        let Some(base) = registry.get(&entry.api_resource) else {
            warn!(resource = %key, api_resource = %entry.api_resource,
                "virtual resource has no underlying resource");
            continue;
        };
        let inherited = overlay(base, &entry);
        debug!(resource = %key, base = %entry.api_resource,
            fields = inherited.schema.fields.len(), "inherited virtual resource schema");
        registry.insert(key, inherited);
    }

    registry
}

/// Overlay `over` onto `base`; attributes declared by `over` win, and
/// schema fields merge per key with `over` winning.
fn overlay(base: &UiResource, over: &UiResource) -> UiResource {
    let mut schema = base.schema.clone();
    for field in over.schema.fields.values() {
        schema.insert(field.clone());
    }
    UiResource {
        key: over.key.clone(),
        title: over.title.clone().or_else(|| base.title.clone()),
        route: over.route.clone().or_else(|| base.route.clone()),
        api_resource: over.api_resource.clone(),
        url_root: over.url_root.clone().or_else(|| base.url_root.clone()),
        description: over
            .description
            .clone()
            .or_else(|| base.description.clone()),
        header_message: over
            .header_message
            .clone()
            .or_else(|| base.header_message.clone()),
        schema,
        options: base.options.overlaid_with(&over.options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lims_model::{DataType, FieldSchema};

    fn server_resource(key: &str, fields: &[(&str, u32)]) -> UiResource {
        let mut resource = UiResource::new(key);
        for (field_key, ordinal) in fields {
            resource
                .schema
                .insert(FieldSchema::new(field_key, DataType::String, *ordinal));
        }
        resource
    }

    #[test]
    fn server_schema_merges_under_fixture_entry() {
        let fixture: Fixture = serde_json::from_str(
            r#"{"screen": {"title": "Screens", "options": {"rpp": 50}}}"#,
        )
        .expect("fixture");
        let server = vec![server_resource("screen", &[("title", 1), ("lab_head", 2)])];

        let registry = compose_fixture(&fixture, &server);
        let screen = &registry["screen"];
        assert_eq!(screen.display_title(), "Screens");
        assert_eq!(screen.schema.fields.len(), 2);
        assert_eq!(screen.options.rpp, Some(50));
    }

    #[test]
    fn virtual_resource_inherits_base_schema_verbatim() {
        let fixture: Fixture = serde_json::from_str(
            r#"{
                "screeners": {
                    "title": "Screeners",
                    "api_resource": "screensaveruser",
                    "options": {"search": {"screeningroomuser__isnull": "False"}}
                }
            }"#,
        )
        .expect("fixture");
        let server = vec![server_resource(
            "screensaveruser",
            &[("username", 1), ("last_name", 2)],
        )];

        let registry = compose_fixture(&fixture, &server);
        let screeners = &registry["screeners"];
        assert_eq!(screeners.schema, registry["screensaveruser"].schema);
        assert_eq!(
            screeners.options.search.get("screeningroomuser__isnull"),
            Some(&"False".to_string())
        );
        assert_eq!(screeners.api_resource, "screensaveruser");
    }

    #[test]
    fn composition_is_idempotent() {
        let fixture: Fixture = serde_json::from_str(
            r#"{
                "screen": {"title": "Screens", "options": {"rpp": 50}},
                "rnai_screens": {
                    "api_resource": "screen",
                    "options": {"search": {"screen_type__in": "rnai"}}
                }
            }"#,
        )
        .expect("fixture");
        let server = vec![server_resource("screen", &[("title", 1)])];

        let once = compose_fixture(&fixture, &server);
        let twice = compose(&once, &server);
        assert_eq!(once, twice);
    }
}
