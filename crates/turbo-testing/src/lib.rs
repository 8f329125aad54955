//! Wait helpers for browser-driven end-to-end tests.
//!
//! This crate provides:
//! - `BrowserDriver` / `WebElement` - The browser session capabilities a wait needs
//! - `WaitCondition` - A check plus the driver errors it treats as "not yet"
//! - `ContainsText`, `TextToEqual`, `StyleToEqual`, `FnCondition` - Built-in conditions
//! - `Wait` - Timeout/poll options with `until` and `until_not`
//!
//! Waits block the calling thread and sleep between polls. Run them on the
//! test thread, never inside an event loop.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use turbo_testing::{TextToEqual, Wait};
//!
//! Wait::new(Duration::from_secs(5))
//!     .with_message("counter never reached 3")
//!     .until(&driver, &TextToEqual::new("#counter", "3"))?;
//! ```

mod condition;
mod driver;
mod error;
mod wait;

pub use condition::*;
pub use driver::*;
pub use error::WaitError;
pub use wait::*;
