//! Cron expression parser.
//!
//! Turns expression text into a [`Schedule`](crate::Schedule). Which fields
//! are expected is configured with [`ParseOptions`]; the standard parser
//! takes the classic five fields (`min hour dom month dow`) plus `@daily`
//! style descriptors.

mod core;
mod error;
mod options;


pub use self::core::{parse_standard, Parser};
pub use self::error::ParseError;
pub use self::options::ParseOptions;
