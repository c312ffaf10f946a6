//! A component that reports diagnostics through an embedded `Loggable` while it dispatches
//! events, with the messages ending up in `tracing`.

use std::sync::Arc;

use listeners::{Listener, Loggable, Logger, Severity, TracingLogger};

type ProgressReport = Arc<dyn Fn(u8) + Send + Sync>;

struct Downloader {
    log: Loggable,
    progress: Listener<Option<ProgressReport>>,
}

impl Downloader {
    fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            log: Loggable::with_category(Some(logger), "downloader"),
            progress: Listener::new(),
        }
    }

    fn run(&self) {
        self.log.log_info("download started");

        for percent in (0..=100_u8).step_by(25) {
            if self.log.can_log_verbose() {
                self.log.log_verbose(&format!("{percent}% done"));
            }

            if self.progress.is_empty() {
                self.log
                    .log_with_category(Severity::Warning, "nobody is watching", "progress");
            }

            self.progress.invoke(|report| report(percent));
        }

        self.log.log_info("download finished");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let downloader = Downloader::new(Arc::new(TracingLogger::with_min_severity(
        Severity::Info,
    )));

    downloader.run();

    let report: ProgressReport = Arc::new(|percent| println!("progress: {percent}%"));
    downloader.progress.set(Some(report));

    downloader.run();
}
