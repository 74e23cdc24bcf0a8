//! FeatureView - detail panel for museum collection objects.
//!
//! This library provides the feature panel (facts, people, photos), the
//! click-to-search labels embedded in it, and the HTTP search collaborator
//! used by the `feature-viewer` desktop application.

pub mod api;
pub mod config;
pub mod model;
pub mod ui;

use thiserror::Error;

/// FeatureView error types covering all failure modes.
#[derive(Error, Debug)]
pub enum FeatureError {
    /// Search request failed (bad status, unreachable API, bad payload)
    #[error("Search error: {0}")]
    Search(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading errors
    #[error("Config error: {0}")]
    Config(String),

    /// I/O errors (config and data files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using FeatureError
pub type Result<T> = std::result::Result<T, FeatureError>;
