//! A small logging facade for components that want to report diagnostics alongside dispatch.
//!
//! * [`Logger`] is the sink: it decides per [`Severity`] whether it is interested and receives
//!   messages together with a category.
//! * [`Loggable`] is a field that a component embeds to gain forwarding `log_*()` methods with a
//!   default category, tolerating the absence of a logger.
//! * [`TracingLogger`] forwards everything into the `tracing` ecosystem.

mod loggable;
mod logger;
mod severity;
mod tracing_logger;

pub use loggable::*;
pub use logger::*;
pub use severity::*;
pub use tracing_logger::*;
