//! Application state for the LIMS client session.
//!
//! The store is the single source of truth for navigation and the session
//! caches. It is constructed once and passed by reference; there is no
//! ambient global.

pub mod backend;
pub mod saved_search;
pub mod store;

pub use backend::{Backend, RestBackend, StaticBackend};
pub use saved_search::{SavedSearch, SearchStore, SearchStoreError};
pub use store::{
    AlwaysConfirm, AppState, ConfirmPort, ListenerId, MAX_MESSAGES, Message, PageChangeRequest,
    StateEvent,
};
