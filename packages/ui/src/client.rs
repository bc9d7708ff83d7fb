//! Shared HTTP store constructor for all platforms.
//!
//! - **Web** (WASM): an empty `base_url` resolves to the page origin, so the
//!   client talks to whatever server delivered it.
//! - **Native**: an empty `base_url` falls back to [`DEFAULT_BASE_URL`].

use api::HttpStore;
use store::config::ApiConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Create the store for the configured backend.
pub fn make_store(config: &ApiConfig) -> HttpStore {
    let base_url = resolve_base_url(&config.base_url);
    tracing::info!(%base_url, "using poll backend");
    HttpStore::new(base_url)
}

/// The configured base URL, or the platform default when it is empty.
pub fn resolve_base_url(configured: &str) -> String {
    let configured = configured.trim();
    if !configured.is_empty() {
        return configured.to_string();
    }
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            return origin;
        }
    }
    DEFAULT_BASE_URL.to_string()
}
