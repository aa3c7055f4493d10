//! The server seam for state-store caches.
//!
//! The store populates its caches through [`Backend`] so views and tests
//! never see the transport. [`RestBackend`] adapts the REST client;
//! [`StaticBackend`] serves preloaded snapshots for tests and offline
//! tooling.

use serde_json::Value;
use tracing::debug;

use lims_api::{ListParams, RestClient};
use lims_model::{AppUser, LimsError, UiResource, UserGroup, VocabularyRegistry, VocabularyTerm};

/// Vocabulary listings are fetched whole; the server default page size is
/// far too small for the full term set.
const VOCABULARY_RPP: u32 = 5000;

/// Fetches the session-scoped caches.
pub trait Backend {
    fn fetch_resources(&mut self) -> Result<Vec<UiResource>, LimsError>;
    fn fetch_vocabularies(&mut self) -> Result<VocabularyRegistry, LimsError>;
    fn fetch_users(&mut self) -> Result<Vec<AppUser>, LimsError>;
    fn fetch_usergroups(&mut self) -> Result<Vec<UserGroup>, LimsError>;
}

/// Preloaded snapshots, for tests and offline tooling.
#[derive(Debug, Clone, Default)]
pub struct StaticBackend {
    pub resources: Vec<UiResource>,
    pub vocabularies: VocabularyRegistry,
    pub users: Vec<AppUser>,
    pub usergroups: Vec<UserGroup>,
}

impl Backend for StaticBackend {
    fn fetch_resources(&mut self) -> Result<Vec<UiResource>, LimsError> {
        Ok(self.resources.clone())
    }

    fn fetch_vocabularies(&mut self) -> Result<VocabularyRegistry, LimsError> {
        Ok(self.vocabularies.clone())
    }

    fn fetch_users(&mut self) -> Result<Vec<AppUser>, LimsError> {
        Ok(self.users.clone())
    }

    fn fetch_usergroups(&mut self) -> Result<Vec<UserGroup>, LimsError> {
        Ok(self.usergroups.clone())
    }
}

/// Adapts a [`RestClient`] to the cache seam.
pub struct RestBackend<C: RestClient> {
    client: C,
}

impl<C: RestClient> RestBackend<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    fn fetch_objects(&self, resource: &str, params: &ListParams) -> Result<Vec<Value>, LimsError> {
        let listing = self.client.get_list(resource, params)?;
        Ok(objects_of(listing))
    }
}

/// Pull the `objects` array out of a list response; a bare array is
/// accepted as-is.
fn objects_of(listing: Value) -> Vec<Value> {
    match listing {
        Value::Array(objects) => objects,
        Value::Object(mut map) => match map.remove("objects") {
            Some(Value::Array(objects)) => objects,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn parse_objects<T: serde::de::DeserializeOwned>(
    objects: Vec<Value>,
    what: &str,
) -> Result<Vec<T>, LimsError> {
    let total = objects.len();
    let parsed: Vec<T> = objects
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();
    if parsed.len() < total {
        debug!(what, skipped = total - parsed.len(), "skipped malformed entries");
    }
    Ok(parsed)
}

impl<C: RestClient> Backend for RestBackend<C> {
    fn fetch_resources(&mut self) -> Result<Vec<UiResource>, LimsError> {
        let objects = self.fetch_objects("resource", &ListParams::default())?;
        parse_objects(objects, "resource")
    }

    fn fetch_vocabularies(&mut self) -> Result<VocabularyRegistry, LimsError> {
        let params = ListParams {
            rpp: Some(VOCABULARY_RPP),
            ..ListParams::default()
        };
        let objects = self.fetch_objects("vocabulary", &params)?;
        let terms: Vec<VocabularyTerm> = parse_objects(objects, "vocabulary")?;
        Ok(VocabularyRegistry::from_terms(terms))
    }

    fn fetch_users(&mut self) -> Result<Vec<AppUser>, LimsError> {
        let objects = self.fetch_objects("user", &ListParams::default())?;
        parse_objects(objects, "user")
    }

    fn fetch_usergroups(&mut self) -> Result<Vec<UserGroup>, LimsError> {
        let objects = self.fetch_objects("usergroup", &ListParams::default())?;
        parse_objects(objects, "usergroup")
    }
}
