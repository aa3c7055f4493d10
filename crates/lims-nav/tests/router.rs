//! Router binding tests with a fake history port.

use std::cell::RefCell;
use std::rc::Rc;

use lims_model::NavigationStack;
use lims_nav::{Router, UrlPort, encode};
use lims_resources::{compose_fixture, default_fixture, default_menu};
use lims_state::{AppState, ConfirmPort, StateEvent, StaticBackend};

#[derive(Default)]
struct FakeHistory {
    path: String,
    pushes: Vec<String>,
    replaces: Vec<String>,
}

impl UrlPort for FakeHistory {
    fn path(&self) -> String {
        self.path.clone()
    }

    fn push(&mut self, path: &str) {
        self.path = path.to_string();
        self.pushes.push(path.to_string());
    }

    fn replace(&mut self, path: &str) {
        self.path = path.to_string();
        self.replaces.push(path.to_string());
    }
}

struct DenyConfirm;

impl ConfirmPort for DenyConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }
}

fn app_state() -> AppState {
    AppState::new(
        Box::new(StaticBackend::default()),
        compose_fixture(&default_fixture(), &[]),
        default_menu(),
    )
}

#[test]
fn url_changes_flow_into_the_stack() {
    let mut state = app_state();
    let mut history = FakeHistory::default();
    let mut router = Router::new("Screensaver LIMS");

    router.handle_url_change(&mut state, &mut history, "list/screen/rpp/50");
    assert_eq!(
        state.uri_stack(),
        &NavigationStack::from(["list", "screen", "rpp", "50"].as_slice())
    );
    // No echo push for a URL-originated change.
    assert!(history.pushes.is_empty());
}

#[test]
fn navigate_pushes_the_encoded_path() {
    let mut state = app_state();
    let mut history = FakeHistory::default();
    let mut router = Router::new("Screensaver LIMS");

    let stack = NavigationStack::from(["list", "library"].as_slice());
    assert!(router.navigate(&mut state, &mut history, stack.clone()));
    assert_eq!(history.pushes, vec!["list/library".to_string()]);
    assert_eq!(history.path, encode(&stack));

    // The port reporting our own push back is not treated as a new
    // navigation.
    let before = state.uri_stack().clone();
    router.handle_url_change(&mut state, &mut history, "list/library");
    assert_eq!(state.uri_stack(), &before);
}

#[test]
fn pending_edits_block_url_navigation_and_restore_the_path() {
    let mut state = app_state();
    state.set_confirm_port(Box::new(DenyConfirm));
    let mut history = FakeHistory::default();
    let mut router = Router::new("Screensaver LIMS");

    router.handle_url_change(&mut state, &mut history, "list/screen");
    state.set_page_pending("unsaved screen edits");

    // Back-button to another resource; the user declines to leave.
    router.handle_url_change(&mut state, &mut history, "list/library");
    assert_eq!(
        state.uri_stack(),
        &NavigationStack::from(["list", "screen"].as_slice())
    );
    assert_eq!(history.replaces, vec!["list/screen".to_string()]);
    assert!(state.is_page_pending());
}

#[test]
fn same_stack_navigation_still_notifies_observers() {
    let mut state = app_state();
    let events: Rc<RefCell<Vec<StateEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    state.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let mut history = FakeHistory::default();
    let mut router = Router::new("Screensaver LIMS");
    let stack = NavigationStack::from(["list", "screen"].as_slice());

    assert!(router.navigate(&mut state, &mut history, stack.clone()));
    assert!(router.navigate(&mut state, &mut history, stack));

    let stack_changes = events
        .borrow()
        .iter()
        .filter(|event| **event == StateEvent::UriStackChanged)
        .count();
    assert_eq!(stack_changes, 2);
}

#[test]
fn titles_name_the_current_resource() {
    let mut state = app_state();
    let router = Router::new("Screensaver LIMS");

    let stack = NavigationStack::from(["list", "screen"].as_slice());
    assert_eq!(
        router.title_for(&mut state, &stack),
        "Screensaver LIMS - Screens"
    );
    let unknown = NavigationStack::from(["list", "platemap"].as_slice());
    assert_eq!(router.title_for(&mut state, &unknown), "Screensaver LIMS");
}
