//! Main viewer window.
//!
//! Implements eframe::App: a keyword search bar, the preview list of results,
//! and the feature panel for the selected record. The app owns the loading
//! flag and the current results; labels change them only through the
//! `HostSetters` built here.

use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use eframe::egui;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::api::{MuseumClient, SearchClient, SearchResult};
use crate::model::FeaturedItem;
use crate::ui::feature::FeaturePanel;
use crate::ui::preview::{PreviewAction, PreviewView};
use crate::ui::searchable::{HostSetters, SearchRequest, SearchableLabel};
use crate::Result;

/// Query key used by the search bar.
const KEYWORD_TERM: &str = "keyword";

/// Width of the preview side panel.
const PREVIEW_WIDTH: f32 = 320.0;

/// A state change requested by a label or page fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Loading(bool),
    Results(SearchResult),
}

/// State owned by the host on behalf of the labels.
#[derive(Debug, Default)]
pub struct HostState {
    pub is_loading: bool,
    pub results: Option<SearchResult>,
    /// Records of `results`, decoded once when the results arrive
    pub records: Vec<FeaturedItem>,
}

impl HostState {
    pub fn apply(&mut self, event: HostEvent) {
        match event {
            HostEvent::Loading(flag) => self.is_loading = flag,
            HostEvent::Results(results) => {
                self.records = results.records();
                self.results = Some(results);
            }
        }
    }
}

/// Build setters that forward to the frame loop over a channel.
///
/// Every call wakes the UI so the change shows up without input.
pub fn host_channel(ctx: &egui::Context) -> (HostSetters, Receiver<HostEvent>) {
    let (tx, rx) = mpsc::channel();

    let loading_tx = tx.clone();
    let loading_ctx = ctx.clone();
    let results_ctx = ctx.clone();

    let setters = HostSetters::new(
        move |flag| {
            let _ = loading_tx.send(HostEvent::Loading(flag));
            loading_ctx.request_repaint();
        },
        move |results| {
            let _ = tx.send(HostEvent::Results(results));
            results_ctx.request_repaint();
        },
    );

    (setters, rx)
}

/// Fetch a page URL with the same loading lifecycle as a label click.
pub fn spawn_page_fetch(
    runtime: &Handle,
    client: Arc<MuseumClient>,
    setters: HostSetters,
    url: String,
) -> JoinHandle<()> {
    let guard = setters.begin_loading();

    runtime.spawn(async move {
        let _guard = guard;
        match client.fetch_page(&url).await {
            Ok(results) => (setters.set_search_results)(results),
            Err(e) => tracing::error!("Page fetch failed: {}", e),
        }
    })
}

/// Read a featured item from a JSON file (an object API record).
pub fn load_featured(path: &Path) -> Result<FeaturedItem> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// The viewer application.
pub struct ViewerApp {
    /// Search bar text.
    query: String,
    /// Record shown in the feature panel.
    featured: Option<FeaturedItem>,
    /// Loading flag and current results.
    host: HostState,
    /// Receiver for setter calls made by async tasks.
    events: Receiver<HostEvent>,
    /// Setters handed to every searchable label.
    setters: HostSetters,
    /// Object API client (also used for paging).
    client: Arc<MuseumClient>,
    /// Tokio runtime handle for async operations.
    runtime: Handle,
    /// Whether this is the first frame (for initial focus).
    first_frame: bool,
}

impl ViewerApp {
    /// Create the viewer.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: Handle,
        client: MuseumClient,
        featured: Option<FeaturedItem>,
    ) -> Self {
        let (setters, events) = host_channel(&cc.egui_ctx);

        Self {
            query: String::new(),
            featured,
            host: HostState::default(),
            events,
            setters,
            client: Arc::new(client),
            runtime,
            first_frame: true,
        }
    }

    fn search_client(&self) -> Arc<dyn SearchClient> {
        self.client.clone()
    }

    /// Apply setter calls made since the last frame.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.host.apply(event);
        }
    }

    /// Run the search bar query through the same lifecycle as a fact label.
    fn submit_query(&self) {
        let query = self.query.trim();
        if query.is_empty() {
            return;
        }

        let request = SearchRequest {
            term: KEYWORD_TERM.to_string(),
            value: query.to_string(),
        };
        SearchableLabel::new(request, self.search_client(), self.setters.clone())
            .activate(&self.runtime);
    }

    /// Fetch another page of the current results.
    fn fetch_page(&self, url: String) {
        spawn_page_fetch(&self.runtime, Arc::clone(&self.client), self.setters.clone(), url);
    }

    fn handle_preview(&mut self, action: PreviewAction) {
        match action {
            PreviewAction::Select(record) => {
                tracing::debug!("Featuring object {:?}", record.objectid);
                self.featured = Some(record);
            }
            PreviewAction::Page(url) => self.fetch_page(url),
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::TopBottomPanel::top("search").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Search:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.query)
                        .desired_width(ui.available_width() - 40.0)
                        .hint_text("Keyword..."),
                );

                if self.first_frame {
                    response.request_focus();
                    self.first_frame = false;
                }

                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    self.submit_query();
                }

                if self.host.is_loading {
                    ui.spinner();
                }
            });
        });

        let mut preview_action = None;
        egui::SidePanel::left("preview")
            .default_width(PREVIEW_WIDTH)
            .show(ctx, |ui| {
                preview_action = PreviewView::show(
                    ui,
                    self.host.results.as_ref(),
                    &self.host.records,
                    self.host.is_loading,
                );
            });
        if let Some(action) = preview_action {
            self.handle_preview(action);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            FeaturePanel::new(self.featured.as_ref(), self.search_client(), self.setters.clone())
                .show(ui, &self.runtime);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::config::ApiConfig;

    #[test]
    fn test_host_state_apply() {
        let mut state = HostState::default();
        state.apply(HostEvent::Loading(true));
        assert!(state.is_loading);

        let results = SearchResult(json!({"records": []}));
        state.apply(HostEvent::Results(results.clone()));
        state.apply(HostEvent::Loading(false));

        assert!(!state.is_loading);
        assert_eq!(state.results, Some(results));
    }

    #[test]
    fn test_host_state_decodes_records_once() {
        let mut state = HostState::default();
        state.apply(HostEvent::Results(SearchResult(json!({
            "records": [{"objectid": 1, "title": "Amphora"}, {"objectid": 2, "dated": 1900}]
        }))));

        assert_eq!(state.records.len(), 2);
        assert_eq!(state.records[0].title.as_deref(), Some("Amphora"));

        // Loading changes leave the decoded records alone.
        state.apply(HostEvent::Loading(true));
        assert_eq!(state.records.len(), 2);

        state.apply(HostEvent::Results(SearchResult(json!({"records": []}))));
        assert!(state.records.is_empty());
    }

    #[test]
    fn test_failed_search_keeps_previous_results() {
        let mut state = HostState::default();
        let previous = SearchResult(json!({"info": {"totalrecords": 4}}));
        state.apply(HostEvent::Results(previous.clone()));

        // A failed search only toggles loading.
        state.apply(HostEvent::Loading(true));
        state.apply(HostEvent::Loading(false));

        assert_eq!(state.results, Some(previous));
    }

    #[test]
    fn test_host_channel_forwards_in_order() {
        let ctx = egui::Context::default();
        let (setters, rx) = host_channel(&ctx);

        (setters.set_is_loading)(true);
        (setters.set_search_results)(SearchResult(json!({"page": 1})));
        (setters.set_is_loading)(false);

        let events: Vec<HostEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                HostEvent::Loading(true),
                HostEvent::Results(SearchResult(json!({"page": 1}))),
                HostEvent::Loading(false),
            ]
        );
    }

    fn page_client() -> Arc<MuseumClient> {
        Arc::new(MuseumClient::new(&ApiConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_page_fetch_failure_clears_loading() {
        let ctx = egui::Context::default();
        let (setters, rx) = host_channel(&ctx);

        spawn_page_fetch(&Handle::current(), page_client(), setters, "::not-a-url".to_string())
            .await
            .unwrap();

        let events: Vec<HostEvent> = rx.try_iter().collect();
        assert_eq!(events, vec![HostEvent::Loading(true), HostEvent::Loading(false)]);
    }

    #[tokio::test]
    async fn test_page_fetch_dropped_task_clears_loading() {
        let ctx = egui::Context::default();
        let (setters, rx) = host_channel(&ctx);

        let handle = spawn_page_fetch(
            &Handle::current(),
            page_client(),
            setters,
            "http://127.0.0.1:1/object?page=2".to_string(),
        );
        assert_eq!(rx.try_recv().unwrap(), HostEvent::Loading(true));

        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());

        let events: Vec<HostEvent> = rx.try_iter().collect();
        assert_eq!(events, vec![HostEvent::Loading(false)]);
    }

    #[test]
    fn test_load_featured() {
        let path = std::env::temp_dir().join(format!("feature-view-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"title": "Amphora", "culture": "Greek"}"#).unwrap();

        let item = load_featured(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(item.title.as_deref(), Some("Amphora"));
        assert_eq!(item.culture.as_deref(), Some("Greek"));
    }

    #[test]
    fn test_load_featured_missing_file() {
        assert!(load_featured(Path::new("/nonexistent/featured.json")).is_err());
    }
}
