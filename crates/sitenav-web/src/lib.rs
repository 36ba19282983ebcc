#![forbid(unsafe_code)]

//! Browser binding for the site navigation controller.
//!
//! On `wasm32` this crate wires [`sitenav_core::NavSession`] to the page:
//! it locates the toggle control and link container, registers the click
//! and keydown observers, renders menu state into class membership and the
//! body scroll lock, and marks the current page's link once at load.
//!
//! The module start function runs the whole setup automatically, deferring
//! to `DOMContentLoaded` when the document is still parsing. Hosts that
//! manage load timing themselves can call [`install`] directly.

use sitenav_core::NavConfig;
use tracing::warn;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{DomSurface, install, mark_current_links};

/// Id of the optional `<script type="application/json">` block holding a
/// [`sitenav_core::NavConfig`] override.
pub const CONFIG_ELEMENT_ID: &str = "site-nav-config";

pub(crate) const LOG_TARGET: &str = "sitenav.web";

/// Resolve the page's config block into a [`NavConfig`].
///
/// A missing or blank block yields the defaults. An invalid block is
/// logged and also yields the defaults, so a broken override never disables
/// the menu.
#[must_use]
pub fn resolve_config(raw: Option<&str>) -> NavConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return NavConfig::default();
    };
    match NavConfig::from_json(raw) {
        Ok(config) => config,
        Err(err) => {
            warn!(target: LOG_TARGET, error = %err, "invalid navigation config; using defaults");
            NavConfig::default()
        }
    }
}
