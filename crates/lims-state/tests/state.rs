//! State-store behavior tests.

use std::cell::RefCell;
use std::rc::Rc;

use lims_model::{
    AppUser, DataType, FieldSchema, LimsError, NavigationStack, UiResource, VocabularyRegistry,
    VocabularyTerm,
};
use lims_resources::{compose_fixture, default_fixture, default_menu};
use lims_state::{
    AppState, Backend, ConfirmPort, MAX_MESSAGES, PageChangeRequest, SavedSearch, SearchStore,
    StateEvent, StaticBackend,
};

fn server_resources() -> Vec<UiResource> {
    let mut user = UiResource::new("screensaveruser");
    user.schema
        .insert(FieldSchema::new("username", DataType::String, 1));
    let mut screen = UiResource::new("screen");
    screen
        .schema
        .insert(FieldSchema::new("facility_id", DataType::String, 1));
    vec![user, screen]
}

fn vocabularies() -> VocabularyRegistry {
    VocabularyRegistry::from_terms(vec![VocabularyTerm {
        scope: "screen.screen_type".to_string(),
        key: "rnai".to_string(),
        title: "RNAi".to_string(),
        ordinal: 1,
        is_retired: false,
    }])
}

fn app_state() -> AppState {
    let backend = StaticBackend {
        resources: server_resources(),
        vocabularies: vocabularies(),
        users: vec![
            AppUser {
                username: "screener1".to_string(),
                ..AppUser::default()
            },
            AppUser {
                username: "admin1".to_string(),
                is_staff: true,
                ..AppUser::default()
            },
        ],
        usergroups: Vec::new(),
    };
    let declared = compose_fixture(&default_fixture(), &[]);
    AppState::new(Box::new(backend), declared, default_menu())
}

#[test]
fn same_stack_still_notifies() {
    let mut state = app_state();
    let events: Rc<RefCell<Vec<StateEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    state.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let stack = NavigationStack::from(["list", "screen"].as_slice());
    state.set_uri_stack(stack.clone());
    state.set_uri_stack(stack);

    let seen = events.borrow();
    let stack_changes = seen
        .iter()
        .filter(|event| **event == StateEvent::UriStackChanged)
        .count();
    assert_eq!(stack_changes, 2);
}

#[test]
fn stack_derives_view_and_resource() {
    let mut state = app_state();
    state.set_uri_stack(NavigationStack::from(["list", "screen", "rpp", "50"].as_slice()));
    assert_eq!(state.current_view(), Some("list"));
    assert_eq!(state.current_resource_id(), Some("screen"));
}

#[test]
fn message_ring_keeps_five_most_recent() {
    let mut state = app_state();
    for n in 1..=6 {
        state.error(&format!("message {}", n));
    }
    let texts: Vec<&str> = state.messages().map(|m| m.text.as_str()).collect();
    assert_eq!(texts.len(), MAX_MESSAGES);
    assert_eq!(
        texts,
        vec!["message 2", "message 3", "message 4", "message 5", "message 6"]
    );
}

#[test]
fn unknown_resource_is_an_error() {
    let mut state = app_state();
    let err = state.get_resource("platemap").unwrap_err();
    assert!(matches!(err, LimsError::UnknownResource { .. }));
    // The composed registry still answers for known keys.
    let screeners = state.get_resource("screeners").expect("virtual resource");
    assert_eq!(screeners.api_resource, "screensaveruser");
    assert!(!screeners.schema.is_empty());
}

#[test]
fn vocabulary_title_falls_back_with_a_message() {
    let mut state = app_state();
    assert_eq!(state.get_vocabulary_title("screen.screen_type", "rnai"), "RNAi");
    assert!(state.messages().next().is_none());

    // Unknown key: raw value comes back and a banner message is queued.
    assert_eq!(
        state.get_vocabulary_title("screen.screen_type", "crispr"),
        "crispr"
    );
    assert_eq!(state.messages().count(), 1);
}

#[test]
fn permission_checks_use_the_current_user() {
    let mut state = app_state();
    assert!(!state.has_permission("screen", None));

    state.set_current_user(AppUser {
        username: "screener1".to_string(),
        permissions: vec!["permission/resource/screen/read".to_string()],
        ..AppUser::default()
    });
    assert!(state.has_permission("screen", None));
    assert!(state.has_permission("screen", Some("read")));
    assert!(!state.has_permission("well", None));
}

#[test]
fn admin_users_filter_staff() {
    let mut state = app_state();
    let admins = state.admin_users().expect("admin users");
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].username, "admin1");
}

struct CountingBackend {
    fetches: Rc<RefCell<u32>>,
}

impl Backend for CountingBackend {
    fn fetch_resources(&mut self) -> Result<Vec<UiResource>, LimsError> {
        *self.fetches.borrow_mut() += 1;
        Ok(Vec::new())
    }

    fn fetch_vocabularies(&mut self) -> Result<VocabularyRegistry, LimsError> {
        *self.fetches.borrow_mut() += 1;
        Ok(VocabularyRegistry::default())
    }

    fn fetch_users(&mut self) -> Result<Vec<AppUser>, LimsError> {
        *self.fetches.borrow_mut() += 1;
        Ok(Vec::new())
    }

    fn fetch_usergroups(&mut self) -> Result<Vec<lims_model::UserGroup>, LimsError> {
        *self.fetches.borrow_mut() += 1;
        Ok(Vec::new())
    }
}

#[test]
fn caches_fetch_at_most_once_until_invalidated() {
    let fetches = Rc::new(RefCell::new(0));
    let backend = CountingBackend {
        fetches: Rc::clone(&fetches),
    };
    let declared = compose_fixture(&default_fixture(), &[]);
    let mut state = AppState::new(Box::new(backend), declared, default_menu());

    state.ui_resources().expect("resources");
    state.ui_resources().expect("resources");
    assert_eq!(*fetches.borrow(), 1);

    state.invalidate_resources();
    state.ui_resources().expect("resources");
    assert_eq!(*fetches.borrow(), 2);
}

struct DenyConfirm;

impl ConfirmPort for DenyConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }
}

#[test]
fn page_change_runs_immediately_when_clean() {
    let mut state = app_state();
    let ran = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&ran);
    let proceeded = state.request_page_change(PageChangeRequest::on_ok(move || {
        *flag.borrow_mut() = true;
    }));
    assert!(proceeded);
    assert!(*ran.borrow());
}

#[test]
fn declined_page_change_runs_pending_callback_and_stays_pending() {
    let mut state = app_state();
    state.set_confirm_port(Box::new(DenyConfirm));

    let cancel_ran = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&cancel_ran);
    state.set_page_pending_with("unsaved edits", move || {
        *flag.borrow_mut() = true;
    });

    let ok_ran = Rc::new(RefCell::new(false));
    let ok_flag = Rc::clone(&ok_ran);
    let proceeded = state.request_page_change(PageChangeRequest::on_ok(move || {
        *ok_flag.borrow_mut() = true;
    }));

    assert!(!proceeded);
    assert!(!*ok_ran.borrow());
    assert!(*cancel_ran.borrow());
    assert!(state.is_page_pending());
}

#[test]
fn accepted_page_change_clears_pending() {
    let mut state = app_state();
    state.set_page_pending("unsaved edits");
    let proceeded = state.request_page_change(PageChangeRequest::on_ok(|| {}));
    assert!(proceeded);
    assert!(!state.is_page_pending());
}

#[test]
fn saved_searches_round_trip_through_the_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut state = app_state();
    state.set_search_store(SearchStore::new(dir.path()));

    let id = state.next_download_id();
    let search = SavedSearch::new("well", serde_json::json!({"well_id__in": "A01,B02"}));
    state.save_search(id, &search).expect("save");
    assert_eq!(state.load_search(id).expect("load"), search);
}
