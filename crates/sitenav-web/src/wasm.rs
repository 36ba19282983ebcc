#![forbid(unsafe_code)]

//! DOM wiring. Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::rc::Rc;

use sitenav_core::{
    ClickOrigin, MenuPart, NavConfig, NavEvent, NavKey, NavSession, NavSurface, Propagation,
    matching_links,
};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent,
    Node,
};

use crate::{CONFIG_ELEMENT_ID, LOG_TARGET, resolve_config};

type SharedSession = Rc<RefCell<NavSession<DomSurface>>>;

/// Route panics to `console.error`; without a hook a wasm panic only
/// surfaces as an opaque `unreachable` trap.
fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let location = info
                .location()
                .map(|loc| format!(" ({}:{})", loc.file(), loc.line()))
                .unwrap_or_default();
            web_sys::console::error_1(&JsValue::from_str(&format!(
                "sitenav: {info}{location}"
            )));
        }));
    });
}

/// DOM-backed [`NavSurface`]: the toggle control, the link container and
/// the document body.
#[derive(Debug, Clone)]
pub struct DomSurface {
    toggle: Element,
    links: Element,
    body: Option<HtmlElement>,
    active_class: String,
    scroll_lock_overflow: String,
}

impl DomSurface {
    pub fn new(
        toggle: Element,
        links: Element,
        body: Option<HtmlElement>,
        config: &NavConfig,
    ) -> Self {
        Self {
            toggle,
            links,
            body,
            active_class: config.active_class.clone(),
            scroll_lock_overflow: config.scroll_lock_overflow.clone(),
        }
    }
}

impl NavSurface for DomSurface {
    fn set_active(&mut self, part: MenuPart, active: bool) {
        let element = match part {
            MenuPart::Toggle => &self.toggle,
            MenuPart::Links => &self.links,
        };
        if let Err(err) = element
            .class_list()
            .toggle_with_force(&self.active_class, active)
        {
            warn!(target: LOG_TARGET, part = ?part, error = ?err, "active class update failed");
        }
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        let Some(body) = &self.body else {
            return;
        };
        let style = body.style();
        let result = if locked {
            style.set_property("overflow", &self.scroll_lock_overflow)
        } else {
            style.remove_property("overflow").map(drop)
        };
        if let Err(err) = result {
            warn!(target: LOG_TARGET, locked, error = ?err, "scroll lock update failed");
        }
    }
}

fn find(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // Observers live as long as the page.
    closure.forget();
    Ok(())
}

fn dispatch(session: &SharedSession, event: NavEvent) -> Propagation {
    match session.try_borrow_mut() {
        Ok(mut session) => session.handle(event),
        Err(_) => {
            warn!(target: LOG_TARGET, event = event.label(), "re-entrant nav dispatch dropped");
            Propagation::Continue
        }
    }
}

fn classify_click(toggle: &Node, links: &Node, target: Option<EventTarget>) -> ClickOrigin {
    let Some(node) = target.and_then(|target| target.dyn_into::<Node>().ok()) else {
        return ClickOrigin::Outside;
    };
    if toggle.contains(Some(&node)) {
        ClickOrigin::Toggle
    } else if links.contains(Some(&node)) {
        ClickOrigin::Links
    } else {
        ClickOrigin::Outside
    }
}

fn wire_menu(
    document: &Document,
    config: &NavConfig,
    toggle: Element,
    links: Element,
) -> Result<(), JsValue> {
    let surface = DomSurface::new(toggle.clone(), links.clone(), document.body(), config);
    let session: SharedSession = Rc::new(RefCell::new(NavSession::new(surface)));

    {
        let session = Rc::clone(&session);
        listen(&toggle, "click", move |event| {
            if dispatch(&session, NavEvent::ToggleClick) == Propagation::Stop {
                event.stop_propagation();
            }
        })?;
    }

    let anchors = links.query_selector_all("a")?;
    for idx in 0..anchors.length() {
        let Some(anchor) = anchors.item(idx) else {
            continue;
        };
        let session = Rc::clone(&session);
        listen(&anchor, "click", move |_event| {
            dispatch(&session, NavEvent::LinkClick);
        })?;
    }

    {
        let session = Rc::clone(&session);
        let (toggle, links) = (toggle.clone(), links.clone());
        listen(document, "click", move |event| {
            let origin = classify_click(&toggle, &links, event.target());
            dispatch(&session, NavEvent::DocumentClick(origin));
        })?;
    }

    listen(document, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        dispatch(&session, NavEvent::KeyDown(NavKey::from_dom_key(&key)));
    })?;

    debug!(
        target: LOG_TARGET,
        links = anchors.length(),
        "menu observers registered"
    );
    Ok(())
}

/// Add the active class to every link in the link container(s) whose
/// `href` matches the page at `path`. Returns the number of links marked.
pub fn mark_current_links(document: &Document, config: &NavConfig, path: &str) -> usize {
    let Ok(nodes) = document.query_selector_all(&config.link_anchor_selector()) else {
        return 0;
    };
    let anchors: Vec<Element> = (0..nodes.length())
        .filter_map(|idx| nodes.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();
    let hrefs: Vec<Option<String>> = anchors
        .iter()
        .map(|anchor| anchor.get_attribute("href"))
        .collect();

    let matches = matching_links(
        path,
        &config.index_document,
        hrefs.iter().map(Option::as_deref),
    );
    for &idx in &matches {
        if let Err(err) = anchors[idx].class_list().add_1(&config.active_class) {
            warn!(target: LOG_TARGET, error = ?err, "active link marking failed");
        }
    }
    matches.len()
}

/// Wire the menu observers (when both menu elements exist) and mark the
/// current page's link.
///
/// Call once per page, after the navigation markup is parsed.
pub fn install(document: &Document, config: &NavConfig) -> Result<(), JsValue> {
    let toggle = find(document, &config.toggle_selector());
    let links = find(document, &config.links_selector());
    let wired = match (toggle, links) {
        (Some(toggle), Some(links)) => wire_menu(document, config, toggle, links),
        (toggle, links) => {
            debug!(
                target: LOG_TARGET,
                toggle_found = toggle.is_some(),
                links_found = links.is_some(),
                "menu wiring skipped"
            );
            Ok(())
        }
    };
    if let Err(err) = &wired {
        warn!(target: LOG_TARGET, error = ?err, "menu wiring failed");
    }

    // Link marking does not depend on the menu being wired.
    let path = document
        .location()
        .and_then(|location| location.pathname().ok())
        .unwrap_or_default();
    mark_current_links(document, config, &path);
    wired
}

fn install_from_page(document: &Document) {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    let config = resolve_config(raw.as_deref());
    // Failures are already logged by `install`.
    let _ = install(document, &config);
}

fn defer_until_ready(document: &Document) -> Result<(), JsValue> {
    let ready_document = document.clone();
    let on_ready: Closure<dyn FnMut(Event)> =
        Closure::once(move |_event: Event| install_from_page(&ready_document));
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        on_ready.as_ref().unchecked_ref(),
        &options,
    )?;
    on_ready.forget();
    Ok(())
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        if let Err(err) = defer_until_ready(&document) {
            warn!(target: LOG_TARGET, error = ?err, "DOMContentLoaded registration failed");
        }
    } else {
        install_from_page(&document);
    }
}
