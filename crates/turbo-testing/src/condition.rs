//! Wait conditions.

use turbo_observability::StructuredLogger;

use crate::driver::{BrowserDriver, DriverError, DriverErrorKind, WebElement};

/// Truthiness of a poll result.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl<T> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.is_some()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for &str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

macro_rules! truthy_int {
    ($($t:ty),*) => {
        $(impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

truthy_int!(u32, u64, usize, i32, i64);

/// Something a wait polls against a browser session.
pub trait WaitCondition<D: BrowserDriver> {
    type Output: Truthy;

    /// Run the check once.
    fn check(&self, driver: &D, logger: &StructuredLogger) -> Result<Self::Output, DriverError>;

    /// Driver error kinds that mean "not satisfied yet" instead of failure.
    fn transient_errors(&self) -> &[DriverErrorKind];

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Element text (or its `value`) contains a substring.
#[derive(Debug, Clone)]
pub struct ContainsText {
    pub selector: String,
    pub text: String,
}

impl ContainsText {
    /// Wait for `selector` to contain `text`.
    pub fn new(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            text: text.into(),
        }
    }
}

impl<D: BrowserDriver> WaitCondition<D> for ContainsText {
    type Output = bool;

    fn check(&self, driver: &D, logger: &StructuredLogger) -> Result<bool, DriverError> {
        let element = driver.find_element(&self.selector)?;
        let text = element.text()?;
        logger.debug_with(
            "contains text",
            &[("actual", &text), ("expected", &self.text)],
        );
        if text.contains(&self.text) {
            return Ok(true);
        }
        Ok(element
            .attribute("value")?
            .is_some_and(|value| value.contains(&self.text)))
    }

    fn transient_errors(&self) -> &[DriverErrorKind] {
        DriverErrorKind::ALL
    }

    fn describe(&self) -> String {
        format!("contains_text({:?}, {:?})", self.selector, self.text)
    }
}

/// Element text (or its `value`) equals a string.
#[derive(Debug, Clone)]
pub struct TextToEqual {
    pub selector: String,
    pub text: String,
}

impl TextToEqual {
    /// Wait for `selector` to read exactly `text`.
    pub fn new(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            text: text.into(),
        }
    }
}

impl<D: BrowserDriver> WaitCondition<D> for TextToEqual {
    type Output = bool;

    fn check(&self, driver: &D, logger: &StructuredLogger) -> Result<bool, DriverError> {
        let element = driver.find_element(&self.selector)?;
        let text = element.text()?;
        logger.debug_with(
            "text to equal",
            &[("actual", &text), ("expected", &self.text)],
        );
        if text == self.text {
            return Ok(true);
        }
        Ok(element.attribute("value")?.as_deref() == Some(self.text.as_str()))
    }

    fn transient_errors(&self) -> &[DriverErrorKind] {
        DriverErrorKind::ALL
    }

    fn describe(&self) -> String {
        format!("text_to_equal({:?}, {:?})", self.selector, self.text)
    }
}

/// A computed CSS property equals a value.
#[derive(Debug, Clone)]
pub struct StyleToEqual {
    pub selector: String,
    pub property: String,
    pub value: String,
}

impl StyleToEqual {
    /// Wait for the computed `property` of `selector` to equal `value`.
    pub fn new(
        selector: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            selector: selector.into(),
            property: property.into(),
            value: value.into(),
        }
    }
}

impl<D: BrowserDriver> WaitCondition<D> for StyleToEqual {
    type Output = bool;

    fn check(&self, driver: &D, logger: &StructuredLogger) -> Result<bool, DriverError> {
        let element = driver.find_element(&self.selector)?;
        let actual = element.css_value(&self.property)?;
        logger.debug_with(
            "style to equal",
            &[("property", &self.property), ("actual", &actual), ("expected", &self.value)],
        );
        Ok(actual == self.value)
    }

    fn transient_errors(&self) -> &[DriverErrorKind] {
        DriverErrorKind::ALL
    }

    fn describe(&self) -> String {
        format!(
            "style_to_equal({:?}, {:?}, {:?})",
            self.selector, self.property, self.value
        )
    }
}

/// A closure condition.
///
/// No driver error is transient unless added with [`FnCondition::retry_on`].
pub struct FnCondition<F> {
    description: String,
    check: F,
    transient: Vec<DriverErrorKind>,
}

impl<F> FnCondition<F> {
    /// Create a closure condition with a description for logs.
    pub fn new(description: impl Into<String>, check: F) -> Self {
        Self {
            description: description.into(),
            check,
            transient: Vec::new(),
        }
    }

    /// Treat these error kinds as "not yet".
    pub fn retry_on(mut self, kinds: &[DriverErrorKind]) -> Self {
        self.transient.extend_from_slice(kinds);
        self
    }
}

impl<D, F, T> WaitCondition<D> for FnCondition<F>
where
    D: BrowserDriver,
    F: Fn(&D) -> Result<T, DriverError>,
    T: Truthy,
{
    type Output = T;

    fn check(&self, driver: &D, _logger: &StructuredLogger) -> Result<T, DriverError> {
        (self.check)(driver)
    }

    fn transient_errors(&self) -> &[DriverErrorKind] {
        &self.transient
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}
