use std::fmt;

/// How important a log message is. Ordered from least to most severe.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[expect(
    clippy::exhaustive_enums,
    reason = "loggers match on the full set of levels, adding one is a breaking change anyway"
)]
pub enum Severity {
    /// Detailed diagnostic data, usually only of interest while investigating a problem.
    Verbose,

    /// Normal operational messages.
    Info,

    /// Something unexpected happened but operation continues.
    Warning,

    /// An operation failed.
    Error,
}

impl Severity {
    /// All levels, from least to most severe.
    pub const ALL: [Self; 4] = [Self::Verbose, Self::Info, Self::Warning, Self::Error];

    /// Lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
