//! The application state store.
//!
//! One [`AppState`] is constructed at startup and passed by reference to
//! every component that needs it; it is the single source of truth for the
//! navigation stack, the current user, and the session caches. Caches are
//! populated at most once per session through the [`Backend`] seam and
//! refreshed only by explicit invalidation.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use lims_model::{
    AppUser, LimsError, Menu, NavigationStack, PermissionOption, UiResource, UserGroup,
    VocabularyRegistry, VocabularyTerm,
};
use lims_resources::{ResourceRegistry, compose};

use crate::backend::Backend;
use crate::saved_search::{SavedSearch, SearchStore};

/// Bound on the banner message ring.
pub const MAX_MESSAGES: usize = 5;

/// Permissions offered for each resource.
const GRANTABLE_PERMISSIONS: &[&str] = &["read", "write"];

/// A banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Notifications emitted by the store.
///
/// `UriStackChanged` fires on every `set_uri_stack`, including when the
/// new stack equals the current one: observers keyed on identity (the
/// menu's current-item highlight) must re-run even for a same-value
/// navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    UriStackChanged,
    MessageAdded,
    UserChanged,
    ResourcesComposed,
    VocabulariesLoaded,
}

/// Handle returned by [`AppState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&StateEvent)>;

/// Host seam for the navigation-confirmation modal.
pub trait ConfirmPort {
    /// Ask the user whether to abandon pending edits. True proceeds.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Accepts every confirmation; hosts without a modal and most tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmPort for AlwaysConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

enum PagePending {
    Clear,
    Pending {
        message: String,
        on_cancel: Option<Box<dyn FnOnce()>>,
    },
}

/// A gated navigation attempt. `ok` runs when the change may proceed;
/// `cancel` runs when a pending edit blocks it and no pending-specific
/// callback was registered.
pub struct PageChangeRequest {
    pub ok: Box<dyn FnOnce()>,
    pub cancel: Option<Box<dyn FnOnce()>>,
}

impl PageChangeRequest {
    pub fn on_ok(ok: impl FnOnce() + 'static) -> Self {
        Self {
            ok: Box::new(ok),
            cancel: None,
        }
    }
}

/// Process-wide observable state for the client session.
pub struct AppState {
    backend: Box<dyn Backend>,
    declared_resources: ResourceRegistry,
    menu: Menu,

    uri_stack: NavigationStack,
    current_view: Option<String>,
    current_resource_id: Option<String>,
    current_user: Option<AppUser>,

    vocabularies: Option<VocabularyRegistry>,
    ui_resources: Option<ResourceRegistry>,
    users: Option<Vec<AppUser>>,
    usergroups: Option<Vec<UserGroup>>,
    permission_options: Option<Vec<PermissionOption>>,

    messages: VecDeque<Message>,
    page_pending: PagePending,
    confirm: Box<dyn ConfirmPort>,
    search_store: Option<SearchStore>,

    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
    next_download_id: u64,
}

impl AppState {
    /// Construct the session store. `declared_resources` is the expanded
    /// static fixture; the server snapshot is merged in lazily.
    pub fn new(backend: Box<dyn Backend>, declared_resources: ResourceRegistry, menu: Menu) -> Self {
        Self {
            backend,
            declared_resources,
            menu,
            uri_stack: NavigationStack::default(),
            current_view: None,
            current_resource_id: None,
            current_user: None,
            vocabularies: None,
            ui_resources: None,
            users: None,
            usergroups: None,
            permission_options: None,
            messages: VecDeque::new(),
            page_pending: PagePending::Clear,
            confirm: Box::new(AlwaysConfirm),
            search_store: None,
            listeners: Vec::new(),
            next_listener_id: 0,
            next_download_id: 0,
        }
    }

    /// Replace the confirmation seam (the host modal).
    pub fn set_confirm_port(&mut self, confirm: Box<dyn ConfirmPort>) {
        self.confirm = confirm;
    }

    /// Attach client-local search persistence.
    pub fn set_search_store(&mut self, store: SearchStore) {
        self.search_store = Some(store);
    }

    // --- observation ---------------------------------------------------

    pub fn subscribe(&mut self, listener: impl FnMut(&StateEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn emit(&mut self, event: &StateEvent) {
        // Listeners may call back into the store through captured handles;
        // detach the registry for the duration of the dispatch.
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in &mut listeners {
            listener(event);
        }
        listeners.extend(std::mem::take(&mut self.listeners));
        self.listeners = listeners;
    }

    // --- navigation ----------------------------------------------------

    /// Set the navigation stack and notify observers.
    ///
    /// Always emits, even when `stack` equals the current value.
    pub fn set_uri_stack(&mut self, stack: NavigationStack) {
        self.current_view = stack.view().map(|s| s.to_string());
        self.current_resource_id = stack.resource_id().map(|s| s.to_string());
        self.uri_stack = stack;
        self.emit(&StateEvent::UriStackChanged);
    }

    pub fn uri_stack(&self) -> &NavigationStack {
        &self.uri_stack
    }

    pub fn current_view(&self) -> Option<&str> {
        self.current_view.as_deref()
    }

    pub fn current_resource_id(&self) -> Option<&str> {
        self.current_resource_id.as_deref()
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    // --- page-pending gate ---------------------------------------------

    /// Mark the page dirty. `message` is shown by the confirmation modal.
    pub fn set_page_pending(&mut self, message: &str) {
        self.page_pending = PagePending::Pending {
            message: message.to_string(),
            on_cancel: None,
        };
    }

    /// Mark the page dirty with a callback to run if the user declines to
    /// leave.
    pub fn set_page_pending_with(&mut self, message: &str, on_cancel: impl FnOnce() + 'static) {
        self.page_pending = PagePending::Pending {
            message: message.to_string(),
            on_cancel: Some(Box::new(on_cancel)),
        };
    }

    pub fn clear_page_pending(&mut self) {
        self.page_pending = PagePending::Clear;
    }

    pub fn is_page_pending(&self) -> bool {
        matches!(self.page_pending, PagePending::Pending { .. })
    }

    /// Run a navigation attempt through the dirty-page gate.
    ///
    /// With no pending change, `ok` runs immediately. Otherwise the
    /// confirmation seam decides: accept runs `ok` and clears the pending
    /// state; decline runs the pending-registered callback when one
    /// exists, else the request's `cancel`. Returns true when `ok` ran.
    pub fn request_page_change(&mut self, request: PageChangeRequest) -> bool {
        match std::mem::replace(&mut self.page_pending, PagePending::Clear) {
            PagePending::Clear => {
                (request.ok)();
                true
            }
            PagePending::Pending { message, on_cancel } => {
                if self.confirm.confirm(&message) {
                    (request.ok)();
                    true
                } else {
                    self.page_pending = PagePending::Pending {
                        message,
                        on_cancel: None,
                    };
                    match (on_cancel, request.cancel) {
                        (Some(pending_cancel), _) => pending_cancel(),
                        (None, Some(cancel)) => cancel(),
                        (None, None) => {}
                    }
                    false
                }
            }
        }
    }

    // --- messages -------------------------------------------------------

    /// Queue a banner message, dropping the oldest past [`MAX_MESSAGES`].
    pub fn error(&mut self, text: &str) {
        warn!(message = text, "application message");
        self.messages.push_back(Message {
            text: text.to_string(),
            at: Utc::now(),
        });
        while self.messages.len() > MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.emit(&StateEvent::MessageAdded);
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    // --- current user and permissions -----------------------------------

    pub fn set_current_user(&mut self, user: AppUser) {
        info!(username = %user.username, "current user set");
        self.current_user = Some(user);
        self.emit(&StateEvent::UserChanged);
    }

    pub fn current_user(&self) -> Option<&AppUser> {
        self.current_user.as_ref()
    }

    /// Permission check for the current user; false with no user set.
    pub fn has_permission(&self, resource: &str, permission: Option<&str>) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|user| user.has_permission(resource, permission))
    }

    // --- caches ----------------------------------------------------------

    /// The composed resource registry, fetching the server snapshot on
    /// first access.
    pub fn ui_resources(&mut self) -> Result<&ResourceRegistry, LimsError> {
        if self.ui_resources.is_none() {
            let server = self.backend.fetch_resources()?;
            let composed = compose(&self.declared_resources, &server);
            info!(resources = composed.len(), "composed resource registry");
            self.ui_resources = Some(composed);
            self.emit(&StateEvent::ResourcesComposed);
        }
        let Some(resources) = self.ui_resources.as_ref() else {
            // Populated above; an empty registry stands in if not.
            return Err(LimsError::Configuration {
                message: "resource registry unavailable".to_string(),
            });
        };
        Ok(resources)
    }

    /// Look up one composed resource.
    pub fn get_resource(&mut self, key: &str) -> Result<UiResource, LimsError> {
        let resources = self.ui_resources()?;
        resources
            .get(key)
            .cloned()
            .ok_or_else(|| LimsError::UnknownResource {
                key: key.to_string(),
            })
    }

    pub fn invalidate_resources(&mut self) {
        self.ui_resources = None;
        self.permission_options = None;
    }

    fn vocabulary_registry(&mut self) -> Result<&VocabularyRegistry, LimsError> {
        if self.vocabularies.is_none() {
            let registry = self.backend.fetch_vocabularies()?;
            info!(scopes = registry.scopes.len(), "loaded vocabularies");
            self.vocabularies = Some(registry);
            self.emit(&StateEvent::VocabulariesLoaded);
        }
        let Some(registry) = self.vocabularies.as_ref() else {
            return Err(LimsError::Configuration {
                message: "vocabulary cache unavailable".to_string(),
            });
        };
        Ok(registry)
    }

    /// Scope lookup with regex-union fallback (see
    /// [`VocabularyRegistry::get`]).
    pub fn get_vocabulary(
        &mut self,
        scope: &str,
    ) -> Result<BTreeMap<String, VocabularyTerm>, LimsError> {
        self.vocabulary_registry()?.get(scope)
    }

    /// Resolve a stored vocabulary key to its title.
    ///
    /// A missing vocabulary or key queues a non-fatal message and falls
    /// back to the raw value; rendering never blocks on vocabulary gaps.
    pub fn get_vocabulary_title(&mut self, scope: &str, value: &str) -> String {
        let lookup = self
            .vocabulary_registry()
            .map(|registry| registry.title(scope, value));
        match lookup {
            Ok(Some(title)) => title,
            Ok(None) => {
                self.error(&format!(
                    "no vocabulary entry for {:?} in scope {:?}",
                    value, scope
                ));
                value.to_string()
            }
            Err(err) => {
                self.error(&err.to_string());
                value.to_string()
            }
        }
    }

    /// A clone of the full vocabulary registry, for form generation.
    pub fn vocabularies(&mut self) -> Result<VocabularyRegistry, LimsError> {
        Ok(self.vocabulary_registry()?.clone())
    }

    pub fn invalidate_vocabularies(&mut self) {
        self.vocabularies = None;
    }

    /// All users, fetched once per session.
    pub fn users(&mut self) -> Result<&[AppUser], LimsError> {
        if self.users.is_none() {
            let users = self.backend.fetch_users()?;
            info!(users = users.len(), "loaded users");
            self.users = Some(users);
        }
        let Some(users) = self.users.as_ref() else {
            return Err(LimsError::Configuration {
                message: "user cache unavailable".to_string(),
            });
        };
        Ok(users)
    }

    /// Staff users only.
    pub fn admin_users(&mut self) -> Result<Vec<AppUser>, LimsError> {
        Ok(self
            .users()?
            .iter()
            .filter(|user| user.is_staff)
            .cloned()
            .collect())
    }

    pub fn usergroups(&mut self) -> Result<&[UserGroup], LimsError> {
        if self.usergroups.is_none() {
            let groups = self.backend.fetch_usergroups()?;
            self.usergroups = Some(groups);
        }
        let Some(groups) = self.usergroups.as_ref() else {
            return Err(LimsError::Configuration {
                message: "usergroup cache unavailable".to_string(),
            });
        };
        Ok(groups)
    }

    pub fn invalidate_users(&mut self) {
        self.users = None;
        self.usergroups = None;
    }

    /// The grantable permissions, derived from the composed registry.
    pub fn permission_options(&mut self) -> Result<&[PermissionOption], LimsError> {
        if self.permission_options.is_none() {
            let options: Vec<PermissionOption> = self
                .ui_resources()?
                .keys()
                .flat_map(|key| {
                    GRANTABLE_PERMISSIONS.iter().map(move |permission| PermissionOption {
                        resource: key.clone(),
                        permission: permission.to_string(),
                    })
                })
                .collect();
            self.permission_options = Some(options);
        }
        let Some(options) = self.permission_options.as_ref() else {
            return Err(LimsError::Configuration {
                message: "permission options unavailable".to_string(),
            });
        };
        Ok(options)
    }

    // --- downloads and saved searches ------------------------------------

    /// Next client-generated download id.
    pub fn next_download_id(&mut self) -> u64 {
        self.next_download_id += 1;
        self.next_download_id
    }

    pub fn save_search(&mut self, id: u64, search: &SavedSearch) -> Result<(), LimsError> {
        let Some(store) = self.search_store.as_ref() else {
            return Err(LimsError::Configuration {
                message: "no search store configured".to_string(),
            });
        };
        store.save(id, search).map_err(|err| LimsError::Configuration {
            message: err.to_string(),
        })
    }

    pub fn load_search(&mut self, id: u64) -> Result<SavedSearch, LimsError> {
        let Some(store) = self.search_store.as_ref() else {
            return Err(LimsError::Configuration {
                message: "no search store configured".to_string(),
            });
        };
        store.load(id).map_err(|err| LimsError::Configuration {
            message: err.to_string(),
        })
    }
}
