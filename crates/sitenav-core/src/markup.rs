#![forbid(unsafe_code)]

//! Header navigation markup.
//!
//! Renders the `<nav>` block the controller binds to, with the current
//! page's link already carrying the active class. The browser-side pass
//! only ever adds that class, so server-side pre-marking and the runtime
//! pass agree.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::active_link::{current_page_id, is_current_link};
use crate::config::NavConfig;

const NAV_CLASS: &str = "main-nav";
const TITLE_CLASS: &str = "site-title";
const BURGER_LINE_CLASS: &str = "burger-line";
const BURGER_LINES: usize = 3;
const TOGGLE_ARIA_LABEL: &str = "Toggle menu";

/// One navigation destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub href: String,
    pub label: String,
}

impl NavItem {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// Site header navigation: title link plus the ordered link list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteNav {
    pub title: String,
    pub title_href: String,
    pub items: Vec<NavItem>,
}

impl SiteNav {
    /// Render the `<nav>` block for the page at `path`.
    ///
    /// Output is indented for inclusion inside `<header>`; labels are
    /// upper-cased.
    #[must_use]
    pub fn render(&self, config: &NavConfig, path: &str) -> String {
        let page_id = current_page_id(path, &config.index_document);
        let mut html = String::new();

        let _ = writeln!(html, "    <nav class=\"{NAV_CLASS}\">");
        let _ = writeln!(
            html,
            "      <a href=\"{}\" class=\"{TITLE_CLASS}\">{}</a>",
            escape(&self.title_href),
            escape(&self.title.to_uppercase()),
        );
        let _ = writeln!(html, "      <ul class=\"{}\">", escape(&config.links_class));
        for item in &self.items {
            let href = escape(&item.href);
            let label = escape(&item.label.to_uppercase());
            if is_current_link(Some(item.href.as_str()), page_id) {
                let _ = writeln!(
                    html,
                    "        <li><a href=\"{href}\" class=\"{}\">{label}</a></li>",
                    escape(&config.active_class),
                );
            } else {
                let _ = writeln!(html, "        <li><a href=\"{href}\">{label}</a></li>");
            }
        }
        html.push_str("      </ul>\n");
        let _ = writeln!(
            html,
            "      <button class=\"{}\" aria-label=\"{TOGGLE_ARIA_LABEL}\">",
            escape(&config.toggle_class),
        );
        for _ in 0..BURGER_LINES {
            let _ = writeln!(html, "        <span class=\"{BURGER_LINE_CLASS}\"></span>");
        }
        html.push_str("      </button>\n");
        html.push_str("    </nav>\n");
        html
    }
}

fn escape(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn portfolio() -> SiteNav {
        SiteNav {
            title: "Studio Portfolio".to_owned(),
            title_href: "index.html".to_owned(),
            items: vec![
                NavItem::new("index.html", "Home"),
                NavItem::new("projects.html", "Projects"),
                NavItem::new("press.html", "Press"),
            ],
        }
    }

    #[test]
    fn renders_full_block_with_current_page_marked() {
        let html = portfolio().render(&NavConfig::default(), "/projects.html");
        let expected = r#"    <nav class="main-nav">
      <a href="index.html" class="site-title">STUDIO PORTFOLIO</a>
      <ul class="nav-links">
        <li><a href="index.html">HOME</a></li>
        <li><a href="projects.html" class="active">PROJECTS</a></li>
        <li><a href="press.html">PRESS</a></li>
      </ul>
      <button class="mobile-menu-toggle" aria-label="Toggle menu">
        <span class="burger-line"></span>
        <span class="burger-line"></span>
        <span class="burger-line"></span>
      </button>
    </nav>
"#;
        assert_eq!(html, expected);
    }

    #[test]
    fn root_path_marks_index() {
        let html = portfolio().render(&NavConfig::default(), "/");
        assert!(html.contains("<li><a href=\"index.html\" class=\"active\">HOME</a></li>"));
        assert_eq!(html.matches("class=\"active\"").count(), 1);
    }

    #[test]
    fn unknown_page_marks_nothing() {
        let html = portfolio().render(&NavConfig::default(), "/missing.html");
        assert!(!html.contains("class=\"active\""));
    }

    #[test]
    fn custom_classes_flow_into_markup() {
        let config = NavConfig {
            toggle_class: "burger".to_owned(),
            links_class: "menu".to_owned(),
            active_class: "current".to_owned(),
            ..NavConfig::default()
        };
        let html = portfolio().render(&config, "/press.html");
        assert!(html.contains("<ul class=\"menu\">"));
        assert!(html.contains("<button class=\"burger\""));
        assert!(html.contains("<a href=\"press.html\" class=\"current\">PRESS</a>"));
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let nav = SiteNav {
            title: "A & B".to_owned(),
            title_href: "index.html?a=1&b=2".to_owned(),
            items: vec![NavItem::new("q.html\"x", "<Loans>")],
        };
        let html = nav.render(&NavConfig::default(), "/");
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("index.html?a=1&amp;b=2"));
        assert!(html.contains("&lt;LOANS&gt;"));
        assert!(!html.contains("q.html\"x"));
    }

    #[test]
    fn site_nav_loads_from_json() {
        let nav: SiteNav = serde_json::from_str(
            r#"{"title":"T","title_href":"index.html","items":[{"href":"a.html","label":"A"}]}"#,
        )
        .unwrap();
        assert_eq!(nav.items, vec![NavItem::new("a.html", "A")]);
    }
}
