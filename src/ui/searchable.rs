//! Clickable fact values that start a new search.
//!
//! A label never holds search state itself. Clicking it asks the host to show
//! a loading indicator, runs the search on the tokio runtime, hands the result
//! to the host and finally clears the indicator.

use std::fmt;
use std::sync::Arc;

use eframe::egui;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::api::{SearchClient, SearchResult};

/// Query key and display label for one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Query key sent to the collaborator
    pub term: String,
    /// Label shown to the user
    pub value: String,
}

impl SearchRequest {
    /// Request whose term and value are the same text.
    pub fn same(value: &str) -> Self {
        Self {
            term: value.to_string(),
            value: value.to_string(),
        }
    }

    /// Request whose term is the lower-cased value.
    pub fn lowercased(value: &str) -> Self {
        Self {
            term: value.to_lowercase(),
            value: value.to_string(),
        }
    }
}

/// State transitions the host accepts from a label.
///
/// The host owns "is loading" and "current results"; labels only request
/// changes through these two callbacks.
#[derive(Clone)]
pub struct HostSetters {
    pub set_is_loading: Arc<dyn Fn(bool) + Send + Sync>,
    pub set_search_results: Arc<dyn Fn(SearchResult) + Send + Sync>,
}

impl HostSetters {
    pub fn new(
        set_is_loading: impl Fn(bool) + Send + Sync + 'static,
        set_search_results: impl Fn(SearchResult) + Send + Sync + 'static,
    ) -> Self {
        Self {
            set_is_loading: Arc::new(set_is_loading),
            set_search_results: Arc::new(set_search_results),
        }
    }

    /// Turn the loading flag on and return the guard that turns it off.
    pub(crate) fn begin_loading(&self) -> LoadingGuard {
        (self.set_is_loading)(true);
        LoadingGuard(Arc::clone(&self.set_is_loading))
    }
}

impl fmt::Debug for HostSetters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostSetters").finish_non_exhaustive()
    }
}

/// Clears the loading flag when dropped, so the reset happens exactly once
/// per click whether the search succeeds, fails, panics or never runs.
pub(crate) struct LoadingGuard(Arc<dyn Fn(bool) + Send + Sync>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        (self.0)(false);
    }
}

/// A fact value that re-runs the search when clicked.
#[derive(Clone)]
pub struct SearchableLabel {
    request: SearchRequest,
    client: Arc<dyn SearchClient>,
    setters: HostSetters,
}

impl SearchableLabel {
    pub fn new(request: SearchRequest, client: Arc<dyn SearchClient>, setters: HostSetters) -> Self {
        Self {
            request,
            client,
            setters,
        }
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Text shown for this label.
    pub fn text(&self) -> &str {
        &self.request.value
    }

    /// Handle a click.
    ///
    /// Sets loading before returning, then spawns the search. Callers are not
    /// expected to join the returned handle; concurrent clicks race and the
    /// last one to finish wins.
    pub fn activate(&self, runtime: &Handle) -> JoinHandle<()> {
        let guard = self.setters.begin_loading();
        let set_search_results = Arc::clone(&self.setters.set_search_results);
        let client = Arc::clone(&self.client);
        let request = self.request.clone();

        runtime.spawn(async move {
            let _guard = guard;
            match client.search(&request.term, &request.value).await {
                Ok(result) => set_search_results(result),
                Err(e) => {
                    tracing::error!(
                        term = %request.term,
                        value = %request.value,
                        "Search failed: {}",
                        e
                    );
                }
            }
        })
    }

    /// Draw the label. Uses `link` rather than `hyperlink`, so clicking never
    /// navigates anywhere.
    pub fn show(&self, ui: &mut egui::Ui, runtime: &Handle) -> egui::Response {
        let response = ui.link(self.text());
        if response.clicked() {
            self.activate(runtime);
        }
        response
    }
}

impl fmt::Debug for SearchableLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchableLabel")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}
