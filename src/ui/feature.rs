//! Detail panel for the featured collection object.
//!
//! Rendering happens in two steps: `FeaturePanel::view` turns the item into a
//! `PanelView` (header, ordered fact rows, photos) and `FeaturePanel::show`
//! draws that view with egui.

use std::sync::Arc;

use eframe::egui;
use tokio::runtime::Handle;

use crate::api::SearchClient;
use crate::model::{present, FeaturedItem};
use crate::ui::actions;
use crate::ui::searchable::{HostSetters, SearchRequest, SearchableLabel};

/// Maximum edge of a gallery thumbnail, in points.
const PHOTO_MAX_SIZE: f32 = 240.0;

/// How a fact's value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FactKind {
    /// Plain text
    Text,
    /// Searchable, term equals value
    Search,
    /// Searchable, term is the lower-cased value
    SearchLowercase,
}

/// One entry of the fact table.
struct FactField {
    label: &'static str,
    read: fn(&FeaturedItem) -> &Option<String>,
    kind: FactKind,
}

/// Fact rows in display order. People follow the table; photos follow people.
static FACT_FIELDS: &[FactField] = &[
    FactField { label: "Primary Image Url", read: |item| &item.primaryimageurl, kind: FactKind::Text },
    FactField { label: "Description", read: |item| &item.description, kind: FactKind::Text },
    FactField { label: "Dimensions", read: |item| &item.dimensions, kind: FactKind::Text },
    FactField { label: "Style", read: |item| &item.style, kind: FactKind::Text },
    FactField { label: "Department", read: |item| &item.department, kind: FactKind::Text },
    FactField { label: "Division", read: |item| &item.division, kind: FactKind::Text },
    FactField { label: "Contact", read: |item| &item.contact, kind: FactKind::Text },
    FactField { label: "Credit Line", read: |item| &item.creditline, kind: FactKind::Text },
    FactField { label: "Technique", read: |item| &item.technique, kind: FactKind::Search },
    FactField { label: "Culture", read: |item| &item.culture, kind: FactKind::Search },
    FactField { label: "Medium", read: |item| &item.medium, kind: FactKind::SearchLowercase },
];

const PEOPLE_LABEL: &str = "People";

/// Title block, shown even when both parts are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub dated: String,
}

/// A person's searchable name, keyed by `personid`.
#[derive(Debug, Clone)]
pub struct PersonLabel {
    pub personid: i64,
    pub label: SearchableLabel,
}

/// Value side of a fact row.
#[derive(Debug, Clone)]
pub enum FactValue {
    Text(String),
    Searchable(SearchableLabel),
    People(Vec<PersonLabel>),
}

/// One label/value pair.
#[derive(Debug, Clone)]
pub struct FactRow {
    pub label: &'static str,
    pub value: FactValue,
}

/// One gallery image, keyed by `imageid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub imageid: i64,
    /// Image source; empty if the record has no URL
    pub src: String,
    /// Alternative text: the item's description, shared by every photo
    pub alt: String,
}

/// Everything the panel draws for one frame.
#[derive(Debug, Clone, Default)]
pub struct PanelView {
    pub header: Option<Header>,
    pub rows: Vec<FactRow>,
    pub photos: Vec<Photo>,
}

impl PanelView {
    /// True for the empty container shown when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.rows.is_empty() && self.photos.is_empty()
    }

    /// Row labels in display order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.rows.iter().map(|row| row.label).collect()
    }

    pub fn row(&self, label: &str) -> Option<&FactRow> {
        self.rows.iter().find(|row| row.label == label)
    }
}

/// Detail panel for the featured item.
pub struct FeaturePanel<'a> {
    featured: Option<&'a FeaturedItem>,
    client: Arc<dyn SearchClient>,
    setters: HostSetters,
}

impl<'a> FeaturePanel<'a> {
    /// `client` and `setters` are handed unchanged to every searchable label.
    pub fn new(
        featured: Option<&'a FeaturedItem>,
        client: Arc<dyn SearchClient>,
        setters: HostSetters,
    ) -> Self {
        Self {
            featured,
            client,
            setters,
        }
    }

    fn searchable(&self, request: SearchRequest) -> SearchableLabel {
        SearchableLabel::new(request, Arc::clone(&self.client), self.setters.clone())
    }

    /// Build the view for the current item.
    pub fn view(&self) -> PanelView {
        let Some(item) = self.featured else {
            return PanelView::default();
        };

        let header = Header {
            title: item.title.clone().unwrap_or_default(),
            dated: item.dated.clone().unwrap_or_default(),
        };

        let mut rows: Vec<FactRow> = FACT_FIELDS
            .iter()
            .filter_map(|field| {
                let value = present((field.read)(item))?;
                let value = match field.kind {
                    FactKind::Text => FactValue::Text(value.to_string()),
                    FactKind::Search => FactValue::Searchable(self.searchable(SearchRequest::same(value))),
                    FactKind::SearchLowercase => {
                        FactValue::Searchable(self.searchable(SearchRequest::lowercased(value)))
                    }
                };
                Some(FactRow {
                    label: field.label,
                    value,
                })
            })
            .collect();

        if let Some(people) = &item.people {
            let labels = people
                .iter()
                .map(|person| PersonLabel {
                    personid: person.personid,
                    label: self.searchable(SearchRequest::same(&person.displayname)),
                })
                .collect();
            rows.push(FactRow {
                label: PEOPLE_LABEL,
                value: FactValue::People(labels),
            });
        }

        let alt = item.description.clone().unwrap_or_default();
        let photos = item
            .images
            .iter()
            .flatten()
            .map(|image| Photo {
                imageid: image.imageid,
                src: image.baseimageurl.clone().unwrap_or_default(),
                alt: alt.clone(),
            })
            .collect();

        PanelView {
            header: Some(header),
            rows,
            photos,
        }
    }

    /// Draw the panel into `ui`.
    pub fn show(&self, ui: &mut egui::Ui, runtime: &Handle) {
        let view = self.view();
        let Some(header) = &view.header else {
            return;
        };

        egui::ScrollArea::vertical()
            .id_salt("feature")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(&header.title);
                ui.label(egui::RichText::new(&header.dated).italics());
                ui.separator();

                egui::Grid::new("facts")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for row in &view.rows {
                            ui.strong(row.label);
                            show_value(ui, &row.value, runtime);
                            ui.end_row();
                        }
                    });

                ui.separator();
                show_photos(ui, &view.photos);
            });
    }
}

fn show_value(ui: &mut egui::Ui, value: &FactValue, runtime: &Handle) {
    match value {
        FactValue::Text(text) => {
            ui.add(egui::Label::new(text).wrap());
        }
        FactValue::Searchable(label) => {
            label.show(ui, runtime);
        }
        FactValue::People(people) => {
            ui.vertical(|ui| {
                for person in people {
                    ui.push_id(person.personid, |ui| {
                        person.label.show(ui, runtime);
                    });
                }
            });
        }
    }
}

fn show_photos(ui: &mut egui::Ui, photos: &[Photo]) {
    ui.horizontal_wrapped(|ui| {
        for photo in photos {
            ui.push_id(photo.imageid, |ui| {
                if photo.src.is_empty() {
                    ui.weak(&photo.alt);
                    return;
                }

                let response = ui
                    .add(
                        egui::Image::new(photo.src.as_str())
                            .max_size(egui::vec2(PHOTO_MAX_SIZE, PHOTO_MAX_SIZE))
                            .sense(egui::Sense::click()),
                    )
                    .on_hover_text(&photo.alt);

                if response.clicked() {
                    if let Err(e) = actions::open_url(&photo.src) {
                        tracing::error!("Failed to open image: {}", e);
                    }
                }
            });
        }
    });
}
