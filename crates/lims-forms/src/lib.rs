//! Dynamic form-schema generation.
//!
//! Builds editable-form definitions (editor kind, choices, validators)
//! from server field metadata, the way the generic edit views consume
//! them. Malformed metadata degrades with diagnostics; it never aborts
//! form generation.

pub mod editor;
pub mod generator;
pub mod validators;

pub use editor::{EditorKind, EditorRegistry};
pub use generator::{COMMENT_FIELD_KEY, FormDiagnostic, FormField, FormSchema, build_form_schema};
pub use validators::Validator;
