use tracing::{Level, event};

use crate::{Logger, Severity};

const TARGET: &str = "listeners";

/// A [`Logger`] that emits every message as a `tracing` event.
///
/// The severity maps to the event level (`Verbose` becomes `DEBUG`) and the category is attached
/// as the `category` field. Whether an event is actually recorded is up to the installed
/// subscriber; the minimum severity given here only filters before that.
#[derive(Clone, Copy, Debug)]
pub struct TracingLogger {
    min_severity: Severity,
}

impl TracingLogger {
    /// Creates a logger that forwards all severities.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_min_severity(Severity::Verbose)
    }

    /// Creates a logger that drops messages less severe than `min_severity`.
    #[must_use]
    pub const fn with_min_severity(min_severity: Severity) -> Self {
        Self { min_severity }
    }

    /// The least severe level that is forwarded.
    #[must_use]
    pub const fn min_severity(self) -> Severity {
        self.min_severity
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for TracingLogger {
    fn can_log(&self, severity: Severity) -> bool {
        severity >= self.min_severity
    }

    fn log(&self, severity: Severity, message: &str, category: &str) {
        if !self.can_log(severity) {
            return;
        }

        match severity {
            Severity::Verbose => {
                event!(target: TARGET, Level::DEBUG, category, message = %message);
            }
            Severity::Info => {
                event!(target: TARGET, Level::INFO, category, message = %message);
            }
            Severity::Warning => {
                event!(target: TARGET, Level::WARN, category, message = %message);
            }
            Severity::Error => {
                event!(target: TARGET, Level::ERROR, category, message = %message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::Arc;

    use parking_lot::Mutex;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::SubscriberBuilder;

    use super::*;
    use crate::LoggerExt;

    #[derive(Clone, Default)]
    struct CaptureWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl CaptureWriter {
        fn contents(&self) -> String {
            String::from_utf8(self.buffer.lock().clone()).unwrap()
        }
    }

    impl Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let writer = CaptureWriter::default();

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::TRACE)
            .with_writer({
                let writer = writer.clone();
                move || writer.clone()
            })
            .finish();

        with_default(subscriber, f);

        writer.contents()
    }

    #[test]
    fn forwards_to_tracing() {
        let output = capture(|| {
            let logger = TracingLogger::new();
            logger.log_warning("disk almost full", "storage");
        });

        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("disk almost full"), "{output}");
        assert!(output.contains("category=\"storage\""), "{output}");
    }

    #[test]
    fn verbose_maps_to_debug() {
        let output = capture(|| {
            TracingLogger::new().log_verbose("details", "");
        });

        assert!(output.contains("DEBUG"), "{output}");
        assert!(output.contains("details"), "{output}");
    }

    #[test]
    fn min_severity_filters() {
        let logger = TracingLogger::with_min_severity(Severity::Warning);

        assert_eq!(logger.min_severity(), Severity::Warning);
        assert!(!logger.can_log_info());
        assert!(logger.can_log_warning());
        assert!(logger.can_log_error());

        let output = capture(|| {
            logger.log_info("hidden", "test");
            logger.log_error("shown", "test");
        });

        assert!(!output.contains("hidden"), "{output}");
        assert!(output.contains("shown"), "{output}");
    }
}
