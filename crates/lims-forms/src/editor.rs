//! Editor kinds and the (data type, edit type) resolution table.
//!
//! The editor set is a closed tagged variant set with an explicit mapping
//! from field metadata, plus a registration interface for project-specific
//! data types, rather than an open-ended widget hierarchy.

use std::collections::BTreeMap;
use std::fmt;

use lims_model::{DataType, EditType, FieldSchema};

/// How a field is edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorKind {
    Text,
    TextArea,
    Number,
    Checkbox,
    Checkboxes,
    Select,
    Radio,
    /// A data type with no registered editor; carries the capitalized type
    /// name for the host to map.
    Other(String),
}

impl EditorKind {
    /// True for editors that present a fixed choice list.
    pub fn wants_choices(&self) -> bool {
        matches!(self, EditorKind::Select | EditorKind::Checkboxes | EditorKind::Radio)
    }
}

impl fmt::Display for EditorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditorKind::Text => "Text",
            EditorKind::TextArea => "TextArea",
            EditorKind::Number => "Number",
            EditorKind::Checkbox => "Checkbox",
            EditorKind::Checkboxes => "Checkboxes",
            EditorKind::Select => "Select",
            EditorKind::Radio => "Radio",
            EditorKind::Other(name) => name.as_str(),
        };
        write!(f, "{}", name)
    }
}

/// Maps field metadata to editor kinds.
///
/// Ships with the standard data-type table; additional data types can be
/// registered by the embedding application.
#[derive(Debug, Clone)]
pub struct EditorRegistry {
    by_data_type: BTreeMap<DataType, EditorKind>,
}

impl Default for EditorRegistry {
    fn default() -> Self {
        let mut by_data_type = BTreeMap::new();
        by_data_type.insert(DataType::Boolean, EditorKind::Checkbox);
        by_data_type.insert(DataType::String, EditorKind::Text);
        by_data_type.insert(DataType::Uri, EditorKind::Text);
        by_data_type.insert(DataType::Float, EditorKind::Number);
        by_data_type.insert(DataType::Integer, EditorKind::Number);
        by_data_type.insert(DataType::List, EditorKind::Checkboxes);
        Self { by_data_type }
    }
}

impl EditorRegistry {
    /// Register (or replace) the editor used for a data type.
    pub fn register(&mut self, data_type: DataType, editor: EditorKind) {
        self.by_data_type.insert(data_type, editor);
    }

    /// Resolve the editor for a field: the data-type table first, then the
    /// `edit_type` override.
    pub fn resolve(&self, field: &FieldSchema) -> EditorKind {
        let base = self
            .by_data_type
            .get(&field.data_type)
            .cloned()
            .unwrap_or_else(|| EditorKind::Other(capitalize(field.data_type.as_str())));
        match field.edit_type {
            Some(EditType::Select) => EditorKind::Select,
            Some(EditType::Multiselect) => EditorKind::Checkboxes,
            Some(EditType::Radio) => EditorKind::Radio,
            Some(EditType::Text) | None => base,
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_table_matches_defaults() {
        let registry = EditorRegistry::default();
        let cases = [
            (DataType::Boolean, EditorKind::Checkbox),
            (DataType::String, EditorKind::Text),
            (DataType::Uri, EditorKind::Text),
            (DataType::Float, EditorKind::Number),
            (DataType::Integer, EditorKind::Number),
            (DataType::List, EditorKind::Checkboxes),
        ];
        for (data_type, expected) in cases {
            let field = FieldSchema::new("f", data_type, 1);
            assert_eq!(registry.resolve(&field), expected);
        }
    }

    #[test]
    fn edit_type_overrides_data_type() {
        let registry = EditorRegistry::default();
        let mut field = FieldSchema::new("status", DataType::String, 1);
        field.edit_type = Some(EditType::Select);
        assert_eq!(registry.resolve(&field), EditorKind::Select);
        field.edit_type = Some(EditType::Multiselect);
        assert_eq!(registry.resolve(&field), EditorKind::Checkboxes);
    }

    #[test]
    fn unmapped_data_type_capitalizes() {
        let registry = EditorRegistry::default();
        let field = FieldSchema::new("structure", DataType::Other("molfile".to_string()), 1);
        assert_eq!(registry.resolve(&field), EditorKind::Other("Molfile".to_string()));
    }

    #[test]
    fn registration_extends_the_table() {
        let mut registry = EditorRegistry::default();
        registry.register(DataType::Other("molfile".to_string()), EditorKind::TextArea);
        let field = FieldSchema::new("structure", DataType::Other("molfile".to_string()), 1);
        assert_eq!(registry.resolve(&field), EditorKind::TextArea);
    }
}
