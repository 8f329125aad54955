//! Blocking poll loops.

use std::thread;
use std::time::{Duration, Instant};

use turbo_observability::StructuredLogger;

use crate::condition::{Truthy, WaitCondition};
use crate::driver::{BrowserDriver, DriverError};
use crate::error::WaitError;

/// Default time allowed for a condition.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default sleep between polls.
pub const DEFAULT_POLL: Duration = Duration::from_millis(100);

const UNTIL_MESSAGE: &str = "expected condition not met within timeout";
const UNTIL_NOT_MESSAGE: &str = "expected condition met within timeout";

/// Timeout and poll settings for a wait.
#[derive(Debug, Clone)]
pub struct Wait {
    /// Time allowed before giving up.
    pub timeout: Duration,
    /// Sleep between attempts.
    pub poll: Duration,
    /// Message carried by the timeout error.
    pub message: Option<String>,
    logger: StructuredLogger,
}

impl Default for Wait {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

/// One attempt's outcome.
enum Attempt<T> {
    Value(T),
    Transient(DriverError),
}

impl Wait {
    /// Create a wait with the default poll interval.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll: DEFAULT_POLL,
            message: None,
            logger: StructuredLogger::new("wait"),
        }
    }

    /// Set the poll interval.
    pub fn with_poll(mut self, poll: Duration) -> Self {
        self.poll = poll;
        self
    }

    /// Set the timeout message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the logger handle.
    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger;
        self
    }

    fn attempt<D, C>(&self, driver: &D, condition: &C) -> Result<Attempt<C::Output>, WaitError>
    where
        D: BrowserDriver,
        C: WaitCondition<D>,
    {
        match condition.check(driver, &self.logger) {
            Ok(value) => Ok(Attempt::Value(value)),
            Err(err) if condition.transient_errors().contains(&err.kind) => {
                Ok(Attempt::Transient(err))
            }
            Err(err) => Err(WaitError::Driver(err)),
        }
    }

    fn log_start<D, C>(&self, op: &str, condition: &C)
    where
        D: BrowserDriver,
        C: WaitCondition<D>,
    {
        self.logger
            .debug_builder(format!("start {}", op))
            .field("condition", condition.describe())
            .duration_ms("timeout_ms", self.timeout)
            .duration_ms("poll_ms", self.poll)
            .emit();
    }

    fn sleep(&self, started: Instant, attempts: u32) {
        thread::sleep(self.poll);
        self.logger
            .debug_builder("poll")
            .field_i64("attempt", i64::from(attempts) + 1)
            .duration_ms("elapsed_ms", started.elapsed())
            .emit();
    }

    /// Poll until the condition is truthy; returns the truthy value.
    ///
    /// Transient driver errors count as "not yet". Any other driver error
    /// ends the wait immediately.
    pub fn until<D, C>(&self, driver: &D, condition: &C) -> Result<C::Output, WaitError>
    where
        D: BrowserDriver,
        C: WaitCondition<D>,
    {
        self.log_start::<D, C>("until", condition);
        let started = Instant::now();
        let mut attempts = 0u32;
        let mut last_error: Option<DriverError> = None;

        loop {
            attempts += 1;
            match self.attempt(driver, condition)? {
                Attempt::Value(value) if value.is_truthy() => return Ok(value),
                Attempt::Value(_) => {}
                Attempt::Transient(err) => last_error = Some(err),
            }

            let elapsed = started.elapsed();
            if elapsed > self.timeout {
                let message = self.message.clone().unwrap_or_else(|| UNTIL_MESSAGE.to_string());
                if let Some(err) = &last_error {
                    self.logger
                        .error_with(&message, &[("last_error", err), ("attempts", &attempts)]);
                }
                return Err(WaitError::Timeout {
                    message,
                    elapsed,
                    attempts,
                    last_error,
                });
            }

            self.sleep(started, attempts);
        }
    }

    /// Poll until the condition is falsy.
    ///
    /// Returns the falsy value, or `None` when a transient driver error
    /// stood in for "false".
    pub fn until_not<D, C>(&self, driver: &D, condition: &C) -> Result<Option<C::Output>, WaitError>
    where
        D: BrowserDriver,
        C: WaitCondition<D>,
    {
        self.log_start::<D, C>("until_not", condition);
        let started = Instant::now();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            match self.attempt(driver, condition)? {
                Attempt::Value(value) if !value.is_truthy() => return Ok(Some(value)),
                Attempt::Value(_) => {}
                Attempt::Transient(_) => return Ok(None),
            }

            let elapsed = started.elapsed();
            if elapsed > self.timeout {
                return Err(WaitError::Timeout {
                    message: self
                        .message
                        .clone()
                        .unwrap_or_else(|| UNTIL_NOT_MESSAGE.to_string()),
                    elapsed,
                    attempts,
                    last_error: None,
                });
            }

            self.sleep(started, attempts);
        }
    }
}

/// Block until `condition` is truthy or `timeout` elapses.
pub fn until<D, C>(
    driver: &D,
    condition: &C,
    timeout: Duration,
    poll: Duration,
    message: &str,
) -> Result<C::Output, WaitError>
where
    D: BrowserDriver,
    C: WaitCondition<D>,
{
    Wait::new(timeout)
        .with_poll(poll)
        .with_message(message)
        .until(driver, condition)
}

/// Block until `condition` is falsy or `timeout` elapses.
pub fn until_not<D, C>(
    driver: &D,
    condition: &C,
    timeout: Duration,
    poll: Duration,
    message: &str,
) -> Result<Option<C::Output>, WaitError>
where
    D: BrowserDriver,
    C: WaitCondition<D>,
{
    Wait::new(timeout)
        .with_poll(poll)
        .with_message(message)
        .until_not(driver, condition)
}
