#![forbid(unsafe_code)]

//! Structural markers and class names the controller binds to.
//!
//! The defaults match the markup produced by [`crate::markup::SiteNav`]. A
//! page can override any field through a JSON block; missing fields keep
//! their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TOGGLE_CLASS: &str = "mobile-menu-toggle";
pub const DEFAULT_LINKS_CLASS: &str = "nav-links";
pub const DEFAULT_ACTIVE_CLASS: &str = "active";
pub const DEFAULT_SCROLL_LOCK_OVERFLOW: &str = "hidden";
pub const DEFAULT_INDEX_DOCUMENT: &str = "index.html";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse navigation config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid navigation config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Navigation controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Class carried by the menu toggle button.
    pub toggle_class: String,
    /// Class carried by the element holding the navigation anchors.
    pub links_class: String,
    /// Class marking both the open menu and the current page's link.
    pub active_class: String,
    /// Inline `overflow` value applied to the body while the menu is open.
    pub scroll_lock_overflow: String,
    /// Page identifier used when the location path ends in `/` or is empty.
    pub index_document: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toggle_class: DEFAULT_TOGGLE_CLASS.to_owned(),
            links_class: DEFAULT_LINKS_CLASS.to_owned(),
            active_class: DEFAULT_ACTIVE_CLASS.to_owned(),
            scroll_lock_overflow: DEFAULT_SCROLL_LOCK_OVERFLOW.to_owned(),
            index_document: DEFAULT_INDEX_DOCUMENT.to_owned(),
        }
    }
}

impl NavConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field can be used verbatim in a selector or style.
    pub fn validate(&self) -> Result<()> {
        validate_class_name("toggle_class", &self.toggle_class)?;
        validate_class_name("links_class", &self.links_class)?;
        validate_class_name("active_class", &self.active_class)?;

        if self.scroll_lock_overflow.trim().is_empty() {
            return Err(invalid("scroll_lock_overflow", "must not be empty"));
        }
        if self.index_document.is_empty() {
            return Err(invalid("index_document", "must not be empty"));
        }
        if self.index_document.contains('/') {
            return Err(invalid(
                "index_document",
                "must be a single path segment without `/`",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn toggle_selector(&self) -> String {
        format!(".{}", self.toggle_class)
    }

    #[must_use]
    pub fn links_selector(&self) -> String {
        format!(".{}", self.links_class)
    }

    /// Selector for every anchor inside any link container.
    #[must_use]
    pub fn link_anchor_selector(&self) -> String {
        format!(".{} a", self.links_class)
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_owned(),
    }
}

fn validate_class_name(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    if let Some(bad) = value
        .chars()
        .find(|&ch| !(ch.is_alphanumeric() || ch == '-' || ch == '_'))
    {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("unsupported character {bad:?} in class name {value:?}"),
        });
    }
    if value.starts_with(|ch: char| ch.is_ascii_digit()) {
        return Err(invalid(field, "class name must not start with a digit"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_markup() {
        let config = NavConfig::default();
        assert_eq!(config.toggle_selector(), ".mobile-menu-toggle");
        assert_eq!(config.links_selector(), ".nav-links");
        assert_eq!(config.link_anchor_selector(), ".nav-links a");
        assert_eq!(config.active_class, "active");
        assert_eq!(config.scroll_lock_overflow, "hidden");
        assert_eq!(config.index_document, "index.html");
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = NavConfig::from_json(r#"{"links_class":"menu-items"}"#).unwrap();
        assert_eq!(config.links_class, "menu-items");
        assert_eq!(config.toggle_class, DEFAULT_TOGGLE_CLASS);
        assert_eq!(config.index_document, DEFAULT_INDEX_DOCUMENT);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(NavConfig::from_json("{}").unwrap(), NavConfig::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = NavConfig::from_json(r#"{"toggle":"x"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = NavConfig::from_json("not json").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn selector_punctuation_in_class_is_rejected() {
        for bad in [".nav-links", "nav links", "nav>links", ""] {
            let json = format!(r#"{{"links_class":{bad:?}}}"#);
            let err = NavConfig::from_json(&json).unwrap_err();
            assert!(
                matches!(
                    err,
                    ConfigError::Invalid {
                        field: "links_class",
                        ..
                    }
                ),
                "{bad:?} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn leading_digit_class_is_rejected() {
        let config = NavConfig {
            active_class: "1st".to_owned(),
            ..NavConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn index_document_must_be_one_segment() {
        let config = NavConfig {
            index_document: "pages/index.html".to_owned(),
            ..NavConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("index_document"));

        let config = NavConfig {
            index_document: String::new(),
            ..NavConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_overflow_is_rejected() {
        let config = NavConfig {
            scroll_lock_overflow: "  ".to_owned(),
            ..NavConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
