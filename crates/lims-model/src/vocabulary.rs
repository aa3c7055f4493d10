//! Controlled vocabularies.
//!
//! A vocabulary is a server-controlled enumerated value set. Terms are
//! grouped by `scope` (e.g. `screen.screen_type`) and keyed within a scope.
//! Retired terms are excluded from selection UIs but still resolve for
//! values already stored on records.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LimsError;

/// One controlled-vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyTerm {
    pub scope: String,
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub ordinal: u32,
    #[serde(default)]
    pub is_retired: bool,
}

/// All known vocabularies, scope to key to term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VocabularyRegistry {
    pub scopes: BTreeMap<String, BTreeMap<String, VocabularyTerm>>,
}

impl VocabularyRegistry {
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn insert(&mut self, term: VocabularyTerm) {
        self.scopes
            .entry(term.scope.clone())
            .or_default()
            .insert(term.key.clone(), term);
    }

    /// Build a registry from a flat term listing (the shape of the server's
    /// vocabulary resource).
    pub fn from_terms(terms: Vec<VocabularyTerm>) -> Self {
        let mut registry = Self::default();
        for term in terms {
            registry.insert(term);
        }
        registry
    }

    /// Look up a scope mapping.
    ///
    /// On an exact miss, `scope` is treated as a regex over all known
    /// scopes and the matching scopes' terms are unioned. A scope that
    /// matches nothing (or is not a valid regex) is an
    /// [`LimsError::UnknownVocabulary`].
    pub fn get(&self, scope: &str) -> Result<BTreeMap<String, VocabularyTerm>, LimsError> {
        if let Some(terms) = self.scopes.get(scope) {
            return Ok(terms.clone());
        }
        let Ok(pattern) = Regex::new(scope) else {
            return Err(LimsError::UnknownVocabulary {
                scope: scope.to_string(),
            });
        };
        let mut merged: BTreeMap<String, VocabularyTerm> = BTreeMap::new();
        for (name, terms) in &self.scopes {
            if pattern.is_match(name) {
                merged.extend(terms.clone());
            }
        }
        if merged.is_empty() {
            return Err(LimsError::UnknownVocabulary {
                scope: scope.to_string(),
            });
        }
        Ok(merged)
    }

    /// Resolve a stored key to its display title within `scope`.
    ///
    /// Retired terms resolve too; only selection UIs exclude them.
    pub fn title(&self, scope: &str, key: &str) -> Option<String> {
        let terms = self.get(scope).ok()?;
        terms.get(key).map(|term| term.title.clone())
    }

    /// Ordinal-ordered (key, title) choices for selection UIs, retired
    /// terms excluded.
    pub fn active_choices(&self, scope: &str) -> Result<Vec<(String, String)>, LimsError> {
        let terms = self.get(scope)?;
        let mut active: Vec<&VocabularyTerm> =
            terms.values().filter(|term| !term.is_retired).collect();
        active.sort_by_key(|term| (term.ordinal, term.key.clone()));
        Ok(active
            .iter()
            .map(|term| (term.key.clone(), term.title.clone()))
            .collect())
    }
}
