//! Binds browser URL changes to the state store and mirrors state changes
//! back into the URL.

use tracing::debug;

use lims_model::NavigationStack;
use lims_state::{AppState, PageChangeRequest};

use crate::codec::{decode, encode};

/// The browser-history seam: reading and writing the visible path.
pub trait UrlPort {
    fn path(&self) -> String;
    /// Push a new history entry.
    fn push(&mut self, path: &str);
    /// Replace the current entry without growing history.
    fn replace(&mut self, path: &str);
}

/// Two-way binding between the URL and the store's navigation stack.
pub struct Router {
    base_title: String,
    /// Path this router last wrote itself; used to break the URL-change
    /// echo when the host reports our own push back to us.
    last_written: Option<String>,
}

impl Router {
    pub fn new(base_title: &str) -> Self {
        Self {
            base_title: base_title.to_string(),
            last_written: None,
        }
    }

    /// Handle a path change reported by the host.
    ///
    /// Gated by the dirty-page check: a declined navigation restores the
    /// previous path via `replace`, so the back button does not strand the
    /// URL away from the actual view.
    pub fn handle_url_change(
        &mut self,
        state: &mut AppState,
        port: &mut dyn UrlPort,
        path: &str,
    ) {
        if self.last_written.as_deref() == Some(path) {
            self.last_written = None;
            return;
        }
        let stack = decode(path);
        debug!(%path, stack = %stack, "url change");
        if state.request_page_change(PageChangeRequest::on_ok(|| {})) {
            state.set_uri_stack(stack);
        } else {
            let current = encode(state.uri_stack());
            self.last_written = Some(current.clone());
            port.replace(&current);
        }
    }

    /// Navigate programmatically, through the same dirty-page gate.
    /// Returns false when a pending edit blocked the change.
    pub fn navigate(
        &mut self,
        state: &mut AppState,
        port: &mut dyn UrlPort,
        stack: NavigationStack,
    ) -> bool {
        if !state.request_page_change(PageChangeRequest::on_ok(|| {})) {
            return false;
        }
        state.set_uri_stack(stack);
        self.sync(state, port);
        true
    }

    /// Mirror the store's stack into the URL when they disagree.
    pub fn sync(&mut self, state: &AppState, port: &mut dyn UrlPort) {
        let path = encode(state.uri_stack());
        if port.path() != path {
            debug!(%path, "sync url");
            self.last_written = Some(path.clone());
            port.push(&path);
        }
    }

    /// Document title for a stack: the base title, plus the resource title
    /// when the head of the stack names a known resource.
    pub fn title_for(&self, state: &mut AppState, stack: &NavigationStack) -> String {
        let resource_title = stack
            .resource_id()
            .and_then(|key| state.get_resource(key).ok())
            .map(|resource| resource.display_title().to_string());
        match resource_title {
            Some(title) => format!("{} - {}", self.base_title, title),
            None => self.base_title.clone(),
        }
    }
}
