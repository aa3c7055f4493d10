pub mod error;
pub mod field;
pub mod menu;
pub mod resource;
pub mod stack;
pub mod user;
pub mod vocabulary;

pub use error::{LimsError, Result};
pub use field::{
    DataType, EditType, EditabilityTag, FieldSchema, ResourceSchema, TagSelector, VisibilityTag,
};
pub use menu::{Menu, MenuNode};
pub use resource::{ListOptions, UiResource};
pub use stack::{LIST_ARGS, NavigationStack, SEARCH_SEGMENT, is_list_argument};
pub use user::{AppUser, PermissionOption, UserGroup};
pub use vocabulary::{VocabularyRegistry, VocabularyTerm};
