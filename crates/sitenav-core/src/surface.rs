#![forbid(unsafe_code)]

//! Render side of the controller.
//!
//! A [`NavSurface`] is whatever displays the menu: the DOM in the browser,
//! or a [`RecordingSurface`] in tests. [`render_menu`] is the only writer,
//! so the toggle class, the container class and the scroll lock are always
//! written from the same [`MenuState`].

use crate::controller::{MenuController, MenuState, NavDispatch, NavEvent, Propagation};

/// The two elements that mirror the menu state through the active class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPart {
    Toggle,
    Links,
}

/// Host capability for displaying menu state.
pub trait NavSurface {
    /// Add (`true`) or remove (`false`) the active class on `part`.
    fn set_active(&mut self, part: MenuPart, active: bool);

    /// Engage or release the body scroll lock.
    fn set_scroll_lock(&mut self, locked: bool);
}

impl<S: NavSurface + ?Sized> NavSurface for &mut S {
    fn set_active(&mut self, part: MenuPart, active: bool) {
        (**self).set_active(part, active);
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        (**self).set_scroll_lock(locked);
    }
}

/// Project `state` onto `surface`.
pub fn render_menu<S: NavSurface + ?Sized>(state: MenuState, surface: &mut S) {
    let open = state.is_open();
    surface.set_active(MenuPart::Links, open);
    surface.set_active(MenuPart::Toggle, open);
    surface.set_scroll_lock(open);
}

/// In-memory surface for headless hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSurface {
    pub toggle_active: bool,
    pub links_active: bool,
    pub scroll_locked: bool,
    /// Number of [`render_menu`] passes observed (counted on scroll-lock writes).
    pub renders: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when both classes and the scroll lock agree.
    #[must_use]
    pub const fn is_coherent(&self) -> bool {
        self.toggle_active == self.links_active && self.links_active == self.scroll_locked
    }

    #[must_use]
    pub const fn shows_open(&self) -> bool {
        self.toggle_active && self.links_active && self.scroll_locked
    }
}

impl NavSurface for RecordingSurface {
    fn set_active(&mut self, part: MenuPart, active: bool) {
        match part {
            MenuPart::Toggle => self.toggle_active = active,
            MenuPart::Links => self.links_active = active,
        }
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        self.scroll_locked = locked;
        self.renders += 1;
    }
}

/// A controller bound to the surface it renders to.
#[derive(Debug, Clone, Default)]
pub struct NavSession<S> {
    controller: MenuController,
    surface: S,
}

impl<S: NavSurface> NavSession<S> {
    /// Bind a fresh (closed) controller to `surface`. Nothing is rendered
    /// until the first event.
    pub fn new(surface: S) -> Self {
        Self {
            controller: MenuController::new(),
            surface,
        }
    }

    /// Dispatch one event and render if the state machine asks for it.
    pub fn dispatch(&mut self, event: NavEvent) -> NavDispatch {
        let dispatch = self.controller.dispatch(event);
        if dispatch.needs_render() {
            render_menu(dispatch.state, &mut self.surface);
        }
        dispatch
    }

    /// Convenience over [`Self::dispatch`] for hosts that only need the
    /// propagation decision.
    pub fn handle(&mut self, event: NavEvent) -> Propagation {
        self.dispatch(event).propagation
    }

    #[must_use]
    pub const fn state(&self) -> MenuState {
        self.controller.state()
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ClickOrigin, NavKey};

    #[test]
    fn render_open_sets_everything() {
        let mut surface = RecordingSurface::new();
        render_menu(MenuState::Open, &mut surface);
        assert!(surface.shows_open());
        assert_eq!(surface.renders, 1);

        render_menu(MenuState::Closed, &mut surface);
        assert_eq!(surface, RecordingSurface {
            renders: 2,
            ..RecordingSurface::default()
        });
    }

    #[test]
    fn session_renders_toggle() {
        let mut session = NavSession::new(RecordingSurface::new());
        assert_eq!(session.handle(NavEvent::ToggleClick), Propagation::Stop);
        assert!(session.surface().shows_open());
        assert_eq!(session.state(), MenuState::Open);
    }

    #[test]
    fn session_skips_render_for_ignored_events() {
        let mut session = NavSession::new(RecordingSurface::new());
        session.dispatch(NavEvent::KeyDown(NavKey::Escape));
        session.dispatch(NavEvent::KeyDown(NavKey::Other));
        session.dispatch(NavEvent::DocumentClick(ClickOrigin::Links));
        assert_eq!(session.surface().renders, 0);
    }

    #[test]
    fn session_works_through_borrowed_surface() {
        let mut surface = RecordingSurface::new();
        {
            let mut session = NavSession::new(&mut surface);
            session.dispatch(NavEvent::ToggleClick);
            session.dispatch(NavEvent::DocumentClick(ClickOrigin::Outside));
        }
        assert!(surface.is_coherent());
        assert!(!surface.scroll_locked);
        assert_eq!(surface.renders, 2);
    }
}
