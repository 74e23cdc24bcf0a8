//! Preview list of the current search results.
//!
//! Shows one row per record; clicking a row makes it the featured item.
//! Previous/Next follow the page URLs the API returns.

use eframe::egui::{self, ScrollArea};

use crate::api::SearchResult;
use crate::model::{present, FeaturedItem};

/// Something the user asked for in the preview.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewAction {
    /// Feature this record
    Select(FeaturedItem),
    /// Fetch another page by URL
    Page(String),
}

/// View for displaying search results.
pub struct PreviewView;

impl PreviewView {
    /// Display the preview list.
    ///
    /// Returns the action the user triggered this frame, if any.
    pub fn show(
        ui: &mut egui::Ui,
        result: Option<&SearchResult>,
        records: &[FeaturedItem],
        is_loading: bool,
    ) -> Option<PreviewAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.label(status_text(result, is_loading));
            if let Some(result) = result {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(next) = result.next_url() {
                        if ui.add_enabled(!is_loading, egui::Button::new("Next")).clicked() {
                            action = Some(PreviewAction::Page(next.to_string()));
                        }
                    }
                    if let Some(prev) = result.prev_url() {
                        if ui.add_enabled(!is_loading, egui::Button::new("Previous")).clicked() {
                            action = Some(PreviewAction::Page(prev.to_string()));
                        }
                    }
                });
            }
        });

        ui.separator();

        if records.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.weak("No results. Search, or click a fact in the feature panel.");
            });
            return action;
        }

        ScrollArea::vertical()
            .id_salt("preview")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (i, record) in records.iter().enumerate() {
                    let key = record.objectid.unwrap_or(i as i64);
                    ui.push_id(key, |ui| {
                        let response = ui.selectable_label(false, record_title(record));
                        if let Some(description) = record.description.as_deref() {
                            response.clone().on_hover_text(description);
                        }
                        if response.clicked() {
                            action = Some(PreviewAction::Select(record.clone()));
                        }
                    });
                }
            });

        action
    }
}

/// Status line above the list.
pub fn status_text(result: Option<&SearchResult>, is_loading: bool) -> String {
    if is_loading {
        return "Searching...".to_string();
    }

    match result {
        None => "Ready".to_string(),
        Some(result) if result.pages() > 1 => format!(
            "{} results (page {} of {})",
            result.total_records(),
            result.page(),
            result.pages()
        ),
        Some(result) => format!("{} results", result.total_records()),
    }
}

/// Title shown for a record in the list.
pub fn record_title(record: &FeaturedItem) -> String {
    let title = present(&record.title).unwrap_or("Untitled");
    match present(&record.dated) {
        Some(dated) => format!("{} ({})", title, dated),
        None => title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(None, false), "Ready");
        assert_eq!(status_text(None, true), "Searching...");

        let single = SearchResult(json!({"info": {"totalrecords": 3, "page": 1, "pages": 1}}));
        assert_eq!(status_text(Some(&single), false), "3 results");
        assert_eq!(status_text(Some(&single), true), "Searching...");

        let paged = SearchResult(json!({"info": {"totalrecords": 25, "page": 2, "pages": 3}}));
        assert_eq!(status_text(Some(&paged), false), "25 results (page 2 of 3)");
    }

    #[test]
    fn test_record_title() {
        let mut record = FeaturedItem {
            title: Some("Kylix".to_string()),
            dated: Some("500 BCE".to_string()),
            ..FeaturedItem::default()
        };
        assert_eq!(record_title(&record), "Kylix (500 BCE)");

        record.dated = None;
        assert_eq!(record_title(&record), "Kylix");

        assert_eq!(record_title(&FeaturedItem::default()), "Untitled");
    }
}
