//! Field metadata for resource schemas.
//!
//! Every navigable resource carries a schema of [`FieldSchema`] entries.
//! Which fields appear in a given view is decided by tag-set membership
//! (visibility and editability tags), and the display order is always the
//! field `ordinal` - never insertion or alphabetical order.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Wire-level data type of a field, as declared by the server schema.
///
/// Unrecognized type names are preserved verbatim in `Other` so a newer
/// server does not break an older client.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    String,
    Integer,
    Float,
    Boolean,
    Uri,
    List,
    Other(String),
}

impl DataType {
    pub fn as_str(&self) -> &str {
        match self {
            DataType::String => "string",
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::Uri => "uri",
            DataType::List => "list",
            DataType::Other(name) => name.as_str(),
        }
    }

    /// True for types whose values are compared numerically by validators.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }
}

impl Default for DataType {
    fn default() -> Self {
        DataType::String
    }
}

impl From<String> for DataType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "string" | "text" => DataType::String,
            "integer" => DataType::Integer,
            "float" | "decimal" => DataType::Float,
            "boolean" => DataType::Boolean,
            "uri" => DataType::Uri,
            "list" => DataType::List,
            _ => DataType::Other(value),
        }
    }
}

impl From<DataType> for String {
    fn from(value: DataType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Editor hint declared alongside the data type.
///
/// When present this overrides the editor kind derived from [`DataType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditType {
    Text,
    Select,
    Multiselect,
    Radio,
}

impl FromStr for EditType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(EditType::Text),
            "select" => Ok(EditType::Select),
            "multiselect" => Ok(EditType::Multiselect),
            "radio" => Ok(EditType::Radio),
            _ => Err(format!("Unknown edit type: {}", s)),
        }
    }
}

/// Visibility tags: which read views a field appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VisibilityTag {
    /// List (table) views.
    #[serde(rename = "l")]
    List,
    /// Detail views.
    #[serde(rename = "d")]
    Detail,
    /// Edit views.
    #[serde(rename = "e")]
    Edit,
}

/// Editability tags: which mutations a field participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EditabilityTag {
    /// Field may be set on create.
    #[serde(rename = "c")]
    Create,
    /// Field may be changed on update.
    #[serde(rename = "u")]
    Update,
}

/// One field of a resource schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub edit_type: Option<EditType>,
    #[serde(default)]
    pub visibility: BTreeSet<VisibilityTag>,
    #[serde(default)]
    pub editability: BTreeSet<EditabilityTag>,
    #[serde(default)]
    pub ordinal: u32,
    #[serde(default)]
    pub choices: Vec<String>,
    /// Vocabulary scope supplying choices and display titles for this field.
    #[serde(default)]
    pub vocabulary_scope_ref: Option<String>,
    #[serde(default)]
    pub regex: Option<String>,
    #[serde(default)]
    pub regex_message: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    /// Successive (lower, upper) bounds; a trailing unpaired value is an
    /// open lower bound.
    #[serde(default)]
    pub range: Vec<f64>,
    #[serde(default)]
    pub required: bool,
}

impl FieldSchema {
    pub fn new(key: &str, data_type: DataType, ordinal: u32) -> Self {
        Self {
            key: key.to_string(),
            data_type,
            ordinal,
            ..Self::default()
        }
    }

    pub fn is_visible(&self, tag: VisibilityTag) -> bool {
        self.visibility.contains(&tag)
    }

    pub fn is_editable(&self, tag: EditabilityTag) -> bool {
        self.editability.contains(&tag)
    }

    /// Display title, falling back to the key.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.key.as_str())
    }
}

/// Selector for [`ResourceSchema::keys_where`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSelector {
    Visibility(VisibilityTag),
    Editability(EditabilityTag),
}

/// The full field schema of one resource, keyed by field key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceSchema {
    pub fields: BTreeMap<String, FieldSchema>,
}

impl ResourceSchema {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, field: FieldSchema) {
        self.fields.insert(field.key.clone(), field);
    }

    /// Field keys whose tag set contains `selector`, ordered by ascending
    /// ordinal.
    pub fn keys_where(&self, selector: TagSelector) -> Vec<String> {
        let mut matched: Vec<&FieldSchema> = self
            .fields
            .values()
            .filter(|field| match selector {
                TagSelector::Visibility(tag) => field.is_visible(tag),
                TagSelector::Editability(tag) => field.is_editable(tag),
            })
            .collect();
        matched.sort_by_key(|field| field.ordinal);
        matched.iter().map(|field| field.key.clone()).collect()
    }

    /// Keys shown in detail views.
    pub fn detail_keys(&self) -> Vec<String> {
        self.keys_where(TagSelector::Visibility(VisibilityTag::Detail))
    }

    /// Keys shown in list views.
    pub fn list_keys(&self) -> Vec<String> {
        self.keys_where(TagSelector::Visibility(VisibilityTag::List))
    }

    /// Keys shown in edit views.
    pub fn edit_visible_keys(&self) -> Vec<String> {
        self.keys_where(TagSelector::Visibility(VisibilityTag::Edit))
    }

    /// Keys settable on create.
    pub fn create_keys(&self) -> Vec<String> {
        self.keys_where(TagSelector::Editability(EditabilityTag::Create))
    }

    /// Keys changeable on update.
    pub fn update_keys(&self) -> Vec<String> {
        self.keys_where(TagSelector::Editability(EditabilityTag::Update))
    }

    /// Union of edit-visible, create, and update keys, in ordinal order.
    pub fn all_edit_keys(&self) -> Vec<String> {
        let mut matched: Vec<&FieldSchema> = self
            .fields
            .values()
            .filter(|field| {
                field.is_visible(VisibilityTag::Edit)
                    || field.is_editable(EditabilityTag::Create)
                    || field.is_editable(EditabilityTag::Update)
            })
            .collect();
        matched.sort_by_key(|field| field.ordinal);
        matched.iter().map(|field| field.key.clone()).collect()
    }
}
