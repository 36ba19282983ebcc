#![forbid(unsafe_code)]

//! Deterministic menu state machine.
//!
//! The controller owns the single menu-open flag and maps the four UI
//! triggers onto it:
//! - toggle-button clicks flip the state and stop propagation,
//! - link clicks force the menu closed,
//! - document clicks outside the menu force it closed (not gated on the
//!   menu being open),
//! - Escape closes an open menu and is otherwise a no-op.
//!
//! Dispatch is pure: the caller decides how to render the resulting state
//! (see [`crate::surface`]).

use tracing::{debug, trace};

const LOG_TARGET: &str = "sitenav.menu";

/// Logical menu state. Class membership and scroll lock are projections of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
        }
    }
}

/// Where a document-level click landed relative to the menu elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOrigin {
    /// Inside (or on) the toggle control.
    Toggle,
    /// Inside (or on) the link container.
    Links,
    /// Anywhere else, including targets that are not DOM nodes.
    Outside,
}

/// Keys the controller distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Escape,
    Other,
}

impl NavKey {
    /// Normalize a DOM `KeyboardEvent.key` value.
    ///
    /// `"Esc"` is the legacy name some engines report for the same key.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// One UI trigger, already classified by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    ToggleClick,
    LinkClick,
    DocumentClick(ClickOrigin),
    KeyDown(NavKey),
}

impl NavEvent {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ToggleClick => "toggle_click",
            Self::LinkClick => "link_click",
            Self::DocumentClick(_) => "document_click",
            Self::KeyDown(_) => "key_down",
        }
    }
}

/// Whether the host must stop the DOM event from bubbling further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    /// The document-level observer must not see this event.
    Stop,
}

/// Why an event left the state and the surface untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIgnoredReason {
    /// Document click landed inside the toggle control or link container.
    InsideMenu,
    /// Escape pressed while the menu was already closed.
    MenuClosed,
    /// Key other than Escape.
    NotDismissKey,
}

impl NavIgnoredReason {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InsideMenu => "inside_menu",
            Self::MenuClosed => "menu_closed",
            Self::NotDismissKey => "not_dismiss_key",
        }
    }
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Toggle click flipped the state.
    Toggled,
    /// Menu forced closed. `was` may already be [`MenuState::Closed`].
    Dismissed { was: MenuState },
    Ignored(NavIgnoredReason),
}

/// Result of dispatching one [`NavEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavDispatch {
    pub outcome: NavOutcome,
    pub propagation: Propagation,
    /// State after the dispatch.
    pub state: MenuState,
}

impl NavDispatch {
    /// True when the host should re-render the menu projection.
    #[must_use]
    pub const fn needs_render(&self) -> bool {
        !matches!(self.outcome, NavOutcome::Ignored(_))
    }

    const fn ignored(reason: NavIgnoredReason, state: MenuState) -> Self {
        Self {
            outcome: NavOutcome::Ignored(reason),
            propagation: Propagation::Continue,
            state,
        }
    }
}

/// Owner of the menu-open flag.
#[derive(Debug, Clone, Default)]
pub struct MenuController {
    state: MenuState,
}

impl MenuController {
    /// New controller with the menu closed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: MenuState::Closed,
        }
    }

    #[must_use]
    pub const fn state(&self) -> MenuState {
        self.state
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn dispatch(&mut self, event: NavEvent) -> NavDispatch {
        let before = self.state;
        let dispatch = match event {
            NavEvent::ToggleClick => {
                self.state = before.toggled();
                NavDispatch {
                    outcome: NavOutcome::Toggled,
                    propagation: Propagation::Stop,
                    state: self.state,
                }
            }
            NavEvent::LinkClick | NavEvent::DocumentClick(ClickOrigin::Outside) => {
                self.dismiss(before)
            }
            NavEvent::DocumentClick(ClickOrigin::Toggle | ClickOrigin::Links) => {
                NavDispatch::ignored(NavIgnoredReason::InsideMenu, before)
            }
            NavEvent::KeyDown(NavKey::Escape) if before.is_open() => self.dismiss(before),
            NavEvent::KeyDown(NavKey::Escape) => {
                NavDispatch::ignored(NavIgnoredReason::MenuClosed, before)
            }
            NavEvent::KeyDown(NavKey::Other) => {
                NavDispatch::ignored(NavIgnoredReason::NotDismissKey, before)
            }
        };

        match dispatch.outcome {
            NavOutcome::Ignored(reason) => trace!(
                target: LOG_TARGET,
                event = event.label(),
                reason = reason.label(),
                state = before.label(),
                "nav event ignored"
            ),
            _ => debug!(
                target: LOG_TARGET,
                event = event.label(),
                from = before.label(),
                to = dispatch.state.label(),
                "menu state updated"
            ),
        }
        dispatch
    }

    fn dismiss(&mut self, was: MenuState) -> NavDispatch {
        self.state = MenuState::Closed;
        NavDispatch {
            outcome: NavOutcome::Dismissed { was },
            propagation: Propagation::Continue,
            state: self.state,
        }
    }
}
