//! Viewer UI components.
//!
//! The feature panel and its searchable labels, the results preview, and the
//! eframe application that hosts them.

pub mod actions;
pub mod app;
pub mod feature;
pub mod preview;
pub mod searchable;

pub use app::ViewerApp;
pub use feature::FeaturePanel;
pub use searchable::{HostSetters, SearchRequest, SearchableLabel};
