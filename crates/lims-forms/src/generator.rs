//! Builds editable-form definitions from resource field metadata.
//!
//! The generator never fails: malformed metadata (a select editor with no
//! choices, an invalid regex) produces a diagnostic and a degraded field
//! instead of an error, and the form still renders.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::warn;

use lims_model::{FieldSchema, ResourceSchema, VocabularyRegistry};

use crate::editor::{EditorKind, EditorRegistry};
use crate::validators::Validator;

/// Key of the audit-comment field appended to every form.
pub const COMMENT_FIELD_KEY: &str = "comment";

/// One editable form field.
#[derive(Debug, Clone)]
pub struct FormField {
    pub key: String,
    pub title: String,
    pub editor: EditorKind,
    /// (stored value, display title) pairs for choice editors.
    pub choices: Vec<(String, String)>,
    pub validators: Vec<Validator>,
    pub required: bool,
}

/// A non-fatal metadata problem found while generating a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDiagnostic {
    pub field: String,
    pub message: String,
}

/// The generated form definition.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    pub fields: Vec<FormField>,
    pub diagnostics: Vec<FormDiagnostic>,
}

impl FormSchema {
    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Validate submitted values, returning per-field messages. An empty
    /// map means the submission is valid. Never an `Err`: validation
    /// outcomes are data for the form, not failures.
    pub fn validate(&self, values: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for field in &self.fields {
            let value = values.get(&field.key).map(|v| v.as_str()).unwrap_or("");
            for validator in &field.validators {
                if let Some(message) = validator.check(value) {
                    errors.insert(field.key.clone(), message);
                    break;
                }
            }
        }
        errors
    }
}

/// Build the form definition for the given schema.
///
/// Fields appear in all-edit order (edit-visible, create, and update keys,
/// by ordinal). When `current_attribute_keys` is given, generation is
/// restricted to those keys — the generic edit view passes the attributes
/// of the record being edited. A required audit `comment` field is always
/// appended last.
pub fn build_form_schema(
    schema: &ResourceSchema,
    current_attribute_keys: Option<&[String]>,
    vocabularies: Option<&VocabularyRegistry>,
    editors: &EditorRegistry,
) -> FormSchema {
    let mut form = FormSchema::default();

    for key in schema.all_edit_keys() {
        if let Some(keys) = current_attribute_keys
            && !keys.contains(&key)
        {
            continue;
        }
        let Some(field) = schema.get(&key) else {
            continue;
        };
        let built = build_field(field, vocabularies, editors, &mut form.diagnostics);
        form.fields.push(built);
    }

    form.fields.push(comment_field());
    form
}

fn build_field(
    field: &FieldSchema,
    vocabularies: Option<&VocabularyRegistry>,
    editors: &EditorRegistry,
    diagnostics: &mut Vec<FormDiagnostic>,
) -> FormField {
    let editor = editors.resolve(field);
    let choices = resolve_choices(field, vocabularies);
    if editor.wants_choices() && choices.is_empty() {
        let message = format!("{} editor has no choices", editor);
        warn!(field = %field.key, %message, "degraded form field");
        diagnostics.push(FormDiagnostic {
            field: field.key.clone(),
            message,
        });
    }

    let mut validators = Vec::new();
    if field.required {
        validators.push(Validator::Required);
    }
    if field.data_type.is_numeric() {
        if let Some(min) = field.min {
            validators.push(Validator::Min(min));
        }
        if !field.range.is_empty() {
            validators.push(Validator::Range(field.range.clone()));
        }
    }
    if let Some(pattern) = &field.regex {
        match Regex::new(pattern) {
            Ok(regex) => validators.push(Validator::Pattern {
                regex,
                message: field.regex_message.clone(),
            }),
            Err(err) => {
                let message = format!("invalid regex {:?}: {}", pattern, err);
                warn!(field = %field.key, %message, "degraded form field");
                diagnostics.push(FormDiagnostic {
                    field: field.key.clone(),
                    message,
                });
            }
        }
    }

    FormField {
        key: field.key.clone(),
        title: field.display_title().to_string(),
        editor,
        choices,
        validators,
        required: field.required,
    }
}

/// Explicit choices win; otherwise the field's vocabulary scope supplies
/// them, retired terms excluded.
fn resolve_choices(
    field: &FieldSchema,
    vocabularies: Option<&VocabularyRegistry>,
) -> Vec<(String, String)> {
    if !field.choices.is_empty() {
        return field
            .choices
            .iter()
            .map(|choice| (choice.clone(), choice.clone()))
            .collect();
    }
    let (Some(scope), Some(registry)) = (&field.vocabulary_scope_ref, vocabularies) else {
        return Vec::new();
    };
    registry.active_choices(scope).unwrap_or_default()
}

fn comment_field() -> FormField {
    FormField {
        key: COMMENT_FIELD_KEY.to_string(),
        title: "Comment".to_string(),
        editor: EditorKind::TextArea,
        choices: Vec::new(),
        validators: vec![Validator::Required],
        required: true,
    }
}
