use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::{Logger, Severity};

/// An optional logger together with a default category, for embedding in a component.
///
/// The logger is held through any pointer-like type `L`: an `Arc`, an `Rc`, a `Box` or a plain
/// reference. Without a logger, every `log_*()` call is a no-op and every `can_log_*()` call
/// returns `false`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use listeners::{Loggable, TracingLogger};
///
/// struct Downloader {
///     log: Loggable,
/// }
///
/// let downloader = Downloader {
///     log: Loggable::with_category(Some(Arc::new(TracingLogger::new())), "downloader"),
/// };
///
/// if downloader.log.can_log_info() {
///     downloader.log.log_info("starting");
/// }
/// ```
pub struct Loggable<L = Arc<dyn Logger + Send + Sync>>
where
    L: Deref,
    L::Target: Logger,
{
    logger: Option<L>,
    category: Cow<'static, str>,
}

impl<L> Loggable<L>
where
    L: Deref,
    L::Target: Logger,
{
    /// Creates an instance that logs without a category.
    #[must_use]
    pub fn new(logger: Option<L>) -> Self {
        Self {
            logger,
            category: Cow::Borrowed(""),
        }
    }

    /// Creates an instance that logs with `category` unless told otherwise.
    #[must_use]
    pub fn with_category(logger: Option<L>, category: impl Into<Cow<'static, str>>) -> Self {
        Self {
            logger,
            category: category.into(),
        }
    }

    /// The logger, if there is one.
    #[must_use]
    pub fn logger(&self) -> Option<&L::Target> {
        self.logger.as_deref()
    }

    /// Replaces the logger.
    pub fn set_logger(&mut self, logger: Option<L>) {
        self.logger = logger;
    }

    /// The category used by [`log()`][Self::log] and the `log_*()` shorthands.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Whether there is a logger and it is interested in `severity`.
    #[must_use]
    pub fn can_log(&self, severity: Severity) -> bool {
        self.logger().is_some_and(|logger| logger.can_log(severity))
    }

    /// Forwards a message with the default category to the logger, if there is one.
    pub fn log(&self, severity: Severity, message: &str) {
        self.log_with_category(severity, message, &self.category);
    }

    /// Forwards a message with an explicit category to the logger, if there is one.
    pub fn log_with_category(&self, severity: Severity, message: &str, category: &str) {
        if let Some(logger) = self.logger() {
            logger.log(severity, message, category);
        }
    }

    /// Logs a [`Severity::Verbose`] message with the default category.
    pub fn log_verbose(&self, message: &str) {
        self.log(Severity::Verbose, message);
    }

    /// Logs a [`Severity::Info`] message with the default category.
    pub fn log_info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    /// Logs a [`Severity::Warning`] message with the default category.
    pub fn log_warning(&self, message: &str) {
        self.log(Severity::Warning, message);
    }

    /// Logs a [`Severity::Error`] message with the default category.
    pub fn log_error(&self, message: &str) {
        self.log(Severity::Error, message);
    }

    /// Whether [`Severity::Verbose`] messages would be recorded.
    #[must_use]
    pub fn can_log_verbose(&self) -> bool {
        self.can_log(Severity::Verbose)
    }

    /// Whether [`Severity::Info`] messages would be recorded.
    #[must_use]
    pub fn can_log_info(&self) -> bool {
        self.can_log(Severity::Info)
    }

    /// Whether [`Severity::Warning`] messages would be recorded.
    #[must_use]
    pub fn can_log_warning(&self) -> bool {
        self.can_log(Severity::Warning)
    }

    /// Whether [`Severity::Error`] messages would be recorded.
    #[must_use]
    pub fn can_log_error(&self) -> bool {
        self.can_log(Severity::Error)
    }
}

impl<L> Default for Loggable<L>
where
    L: Deref,
    L::Target: Logger,
{
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg_attr(test, mutants::skip)] // No API contract to test.
impl<L> fmt::Debug for Loggable<L>
where
    L: Deref,
    L::Target: Logger,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loggable")
            .field("has_logger", &self.logger.is_some())
            .field("category", &self.category)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use mockall::predicate::eq;
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::MockLogger;

    assert_impl_all!(Loggable: Send, Sync);
    assert_not_impl_any!(Loggable<Rc<MockLogger>>: Send, Sync);

    #[test]
    fn without_logger_does_nothing() {
        let loggable = Loggable::<Box<MockLogger>>::default();

        assert!(loggable.logger().is_none());
        assert!(Severity::ALL.into_iter().all(|severity| !loggable.can_log(severity)));

        loggable.log_error("nobody hears this");
    }

    #[test]
    fn uses_default_category() {
        let mut logger = MockLogger::new();
        logger
            .expect_log()
            .with(eq(Severity::Info), eq("ready"), eq("engine"))
            .times(1)
            .return_const(());

        let loggable = Loggable::with_category(Some(Box::new(logger)), "engine");

        assert_eq!(loggable.category(), "engine");
        loggable.log_info("ready");
    }

    #[test]
    fn empty_category_by_default() {
        let mut logger = MockLogger::new();
        logger
            .expect_log()
            .with(eq(Severity::Verbose), eq("tick"), eq(""))
            .times(1)
            .return_const(());

        let loggable = Loggable::new(Some(Box::new(logger)));

        loggable.log_verbose("tick");
    }

    #[test]
    fn explicit_category_overrides_default() {
        let mut logger = MockLogger::new();
        logger
            .expect_log()
            .with(eq(Severity::Warning), eq("slow"), eq("network"))
            .times(1)
            .return_const(());

        let loggable = Loggable::with_category(Some(Box::new(logger)), "engine");

        loggable.log_with_category(Severity::Warning, "slow", "network");
    }

    #[test]
    fn can_log_asks_logger() {
        let mut logger = MockLogger::new();
        logger
            .expect_can_log()
            .returning(|severity| severity == Severity::Error);

        let loggable = Loggable::new(Some(Box::new(logger)));

        assert!(!loggable.can_log_verbose());
        assert!(!loggable.can_log_info());
        assert!(!loggable.can_log_warning());
        assert!(loggable.can_log_error());
    }

    #[test]
    fn borrowed_logger() {
        let mut logger = MockLogger::new();
        logger.expect_log().times(2).return_const(());

        let loggable = Loggable::<&MockLogger>::with_category(Some(&logger), "borrowed");
        loggable.log_warning("first");
        loggable.log(Severity::Error, "second");
    }

    #[test]
    fn set_logger_replaces() {
        let mut logger = MockLogger::new();
        logger.expect_log().times(1).return_const(());

        let mut loggable = Loggable::<Box<MockLogger>>::default();
        loggable.log_info("dropped");

        loggable.set_logger(Some(Box::new(logger)));
        loggable.log_info("recorded");
    }
}
