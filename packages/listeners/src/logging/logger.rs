use crate::Severity;

/// Receives log messages.
///
/// Implementations that are shared between threads must be `Send + Sync` themselves; the trait
/// does not require it so that single-threaded loggers remain possible.
#[cfg_attr(test, mockall::automock)]
pub trait Logger {
    /// Whether messages of the given severity are of interest.
    ///
    /// Callers may use this to skip building expensive messages. The default accepts everything.
    fn can_log(&self, _severity: Severity) -> bool {
        true
    }

    /// Records a message. The category may be empty.
    fn log(&self, severity: Severity, message: &str, category: &str);
}

/// Shorthands for logging at a fixed severity, available on every [`Logger`].
pub trait LoggerExt: Logger {
    /// Records a [`Severity::Verbose`] message.
    fn log_verbose(&self, message: &str, category: &str) {
        self.log(Severity::Verbose, message, category);
    }

    /// Records a [`Severity::Info`] message.
    fn log_info(&self, message: &str, category: &str) {
        self.log(Severity::Info, message, category);
    }

    /// Records a [`Severity::Warning`] message.
    fn log_warning(&self, message: &str, category: &str) {
        self.log(Severity::Warning, message, category);
    }

    /// Records a [`Severity::Error`] message.
    fn log_error(&self, message: &str, category: &str) {
        self.log(Severity::Error, message, category);
    }

    /// Whether [`Severity::Verbose`] messages are of interest.
    fn can_log_verbose(&self) -> bool {
        self.can_log(Severity::Verbose)
    }

    /// Whether [`Severity::Info`] messages are of interest.
    fn can_log_info(&self) -> bool {
        self.can_log(Severity::Info)
    }

    /// Whether [`Severity::Warning`] messages are of interest.
    fn can_log_warning(&self) -> bool {
        self.can_log(Severity::Warning)
    }

    /// Whether [`Severity::Error`] messages are of interest.
    fn can_log_error(&self) -> bool {
        self.can_log(Severity::Error)
    }
}

impl<L: Logger + ?Sized> LoggerExt for L {}
