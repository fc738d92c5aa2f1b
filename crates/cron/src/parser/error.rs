//! Parse error type.

/// Errors produced while turning expression text into a schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Blank expression.
    #[error("cron expression is empty")]
    Empty,

    /// `TZ=` / `CRON_TZ=` named a zone that does not exist.
    #[error("unknown timezone '{0}'")]
    Location(String),

    /// Unknown `@descriptor`, or descriptors are not enabled.
    #[error("unsupported descriptor '{0}'")]
    Descriptor(String),

    /// Wrong number of whitespace-separated fields.
    #[error("expected {expected} fields but found {found} in '{spec}'")]
    FieldCount {
        expected: String,
        found: usize,
        spec: String,
    },

    /// A single field could not be read.
    #[error("bad {field} field '{expr}': {reason}")]
    Field {
        field: &'static str,
        expr: String,
        reason: String,
    },

    /// The parser itself was configured inconsistently.
    #[error("parser misconfigured: {0}")]
    Options(String),
}
