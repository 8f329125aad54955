//! Browser session capabilities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a browser driver failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverErrorKind {
    /// No element matched the selector.
    NoSuchElement,
    /// The element was detached from the DOM between lookups.
    StaleElementReference,
    /// The element exists but cannot be used yet.
    ElementNotInteractable,
    /// The selector itself is malformed.
    InvalidSelector,
    /// Script evaluation in the page failed.
    JavascriptError,
    /// The browser session is gone.
    SessionClosed,
    /// Anything else the driver reports.
    Unknown,
}

impl DriverErrorKind {
    /// Every kind, for conditions that treat any driver failure as "not yet".
    pub const ALL: &'static [DriverErrorKind] = &[
        Self::NoSuchElement,
        Self::StaleElementReference,
        Self::ElementNotInteractable,
        Self::InvalidSelector,
        Self::JavascriptError,
        Self::SessionClosed,
        Self::Unknown,
    ];

    /// Human-readable name, as WebDriver reports it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoSuchElement => "no such element",
            Self::StaleElementReference => "stale element reference",
            Self::ElementNotInteractable => "element not interactable",
            Self::InvalidSelector => "invalid selector",
            Self::JavascriptError => "javascript error",
            Self::SessionClosed => "session closed",
            Self::Unknown => "unknown error",
        }
    }
}

impl fmt::Display for DriverErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A failure reported by the browser driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct DriverError {
    pub kind: DriverErrorKind,
    pub message: String,
}

impl DriverError {
    /// Create a new driver error.
    pub fn new(kind: DriverErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// No element matches `selector`.
    pub fn no_such_element(selector: &str) -> Self {
        Self::new(
            DriverErrorKind::NoSuchElement,
            format!("unable to locate element: {}", selector),
        )
    }
}

/// An element handle returned by [`BrowserDriver::find_element`].
pub trait WebElement {
    /// Visible text content.
    fn text(&self) -> Result<String, DriverError>;

    /// Attribute or property value, `None` when absent.
    fn attribute(&self, name: &str) -> Result<Option<String>, DriverError>;

    /// Computed value of a CSS property.
    fn css_value(&self, property: &str) -> Result<String, DriverError>;
}

/// A browser session owned by the test harness.
pub trait BrowserDriver {
    type Element: WebElement;

    /// First element matching a CSS selector.
    fn find_element(&self, selector: &str) -> Result<Self::Element, DriverError>;
}
