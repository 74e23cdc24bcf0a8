//! External actions for the panel.
//!
//! Opening an image URL hands it to the system browser.

use crate::{FeatureError, Result};

/// Open a URL with the system's default handler.
///
/// # Errors
/// Returns error if the URL is empty or no handler could be launched.
pub fn open_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(FeatureError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Cannot open an empty URL",
        )));
    }

    tracing::info!("Opening URL: {}", url);

    opener::open_browser(url).map_err(|e| {
        FeatureError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to open URL: {}", e),
        ))
    })
}
