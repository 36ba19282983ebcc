#![forbid(unsafe_code)]

//! `sitenav-core` holds the platform-free half of the site navigation
//! controller.
//!
//! Design goals:
//! - **Explicit state**: the menu-open flag lives in [`MenuController`];
//!   CSS class membership and the body scroll lock are projections of it.
//! - **Host-driven**: the embedding environment (the `sitenav-web` binding,
//!   or a test) classifies DOM events into [`NavEvent`] values and applies
//!   the resulting render through a [`NavSurface`].
//! - **No DOM dependency**: everything here runs on native targets, so the
//!   invariants are covered by ordinary unit and property tests.

pub mod active_link;
pub mod config;
pub mod controller;
pub mod markup;
pub mod surface;

pub use active_link::{current_page_id, is_current_link, matching_links};
pub use config::{ConfigError, NavConfig};
pub use controller::{
    ClickOrigin, MenuController, MenuState, NavDispatch, NavEvent, NavIgnoredReason, NavKey,
    NavOutcome, Propagation,
};
pub use markup::{NavItem, SiteNav};
pub use surface::{MenuPart, NavSession, NavSurface, RecordingSurface, render_menu};
