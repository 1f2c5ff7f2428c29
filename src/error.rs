//! Error types for route handling.
//!
//! The formatting path itself defines no error taxonomy: every absence
//! there is a presence check that selects "omit the field" or "emit
//! nothing", never a failure. The one fallible operation the crate owns
//! is parsing a route string out of host settings.

use thiserror::Error;

/// Error parsing a `page/operation` route string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteParseError {
    #[error("route \"{0}\" is missing the '/' between page and operation")]
    MissingSeparator(String),

    #[error("route \"{0}\" has an empty page or operation segment")]
    EmptySegment(String),

    #[error("route \"{0}\" has more than one '/'")]
    ExtraSeparator(String),
}
