//! Tests for lims-model types.

use lims_model::{
    DataType, EditabilityTag, FieldSchema, ResourceSchema, UiResource, VisibilityTag,
    VocabularyRegistry, VocabularyTerm,
};

fn field_with_tags(
    key: &str,
    ordinal: u32,
    visibility: &[VisibilityTag],
    editability: &[EditabilityTag],
) -> FieldSchema {
    let mut field = FieldSchema::new(key, DataType::String, ordinal);
    field.visibility = visibility.iter().copied().collect();
    field.editability = editability.iter().copied().collect();
    field
}

#[test]
fn field_schema_deserializes_server_shape() {
    let json = r#"{
        "key": "screen_type",
        "title": "Screen Type",
        "data_type": "string",
        "edit_type": "select",
        "visibility": ["l", "d", "e"],
        "editability": ["c", "u"],
        "ordinal": 3,
        "vocabulary_scope_ref": "screen.screen_type",
        "required": true
    }"#;
    let field: FieldSchema = serde_json::from_str(json).expect("deserialize field");
    assert_eq!(field.key, "screen_type");
    assert_eq!(field.data_type, DataType::String);
    assert!(field.is_visible(VisibilityTag::List));
    assert!(field.is_editable(EditabilityTag::Create));
    assert_eq!(field.ordinal, 3);
    assert!(field.required);
}

#[test]
fn unknown_data_type_is_preserved() {
    let json = r#"{"key": "structure", "data_type": "molfile", "ordinal": 1}"#;
    let field: FieldSchema = serde_json::from_str(json).expect("deserialize field");
    assert_eq!(field.data_type, DataType::Other("molfile".to_string()));
    let round = serde_json::to_value(&field).expect("serialize field");
    assert_eq!(round["data_type"], "molfile");
}

#[test]
fn keys_where_is_strictly_ordinal_ordered() {
    let mut schema = ResourceSchema::default();
    for (key, ordinal) in [("c", 30), ("a", 10), ("b", 20), ("d", 40)] {
        schema.insert(field_with_tags(key, ordinal, &[VisibilityTag::Detail], &[]));
    }
    assert_eq!(schema.detail_keys(), vec!["a", "b", "c", "d"]);
}

#[test]
fn virtual_resource_flag() {
    let mut screeners = UiResource::new("screeners");
    screeners.api_resource = "screensaveruser".to_string();
    assert!(screeners.is_virtual());
    assert!(!UiResource::new("screen").is_virtual());
}

#[test]
fn vocabulary_regex_match_against_single_scope() {
    let registry = VocabularyRegistry::from_terms(vec![VocabularyTerm {
        scope: "screen.user_role".to_string(),
        key: "lead".to_string(),
        title: "Lead Screener".to_string(),
        ordinal: 1,
        is_retired: false,
    }]);
    // An unregistered scope that regex-matches exactly one known scope
    // resolves to that scope's mapping.
    let terms = registry.get("screen\\.user.*").expect("regex resolution");
    assert_eq!(terms["lead"].title, "Lead Screener");
    assert!(registry.get("library\\..*").is_err());
}
