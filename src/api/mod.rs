//! Search collaborator for the feature panel.
//!
//! The panel only knows the `SearchClient` trait; `MuseumClient` is the
//! HTTP implementation talking to the museum object API.

pub mod client;
pub mod protocol;

use async_trait::async_trait;

use crate::Result;

pub use client::MuseumClient;
pub use protocol::*;

/// Runs a search for a fact value.
///
/// `term` is the query key and `value` the label the user clicked.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, term: &str, value: &str) -> Result<SearchResult>;
}
