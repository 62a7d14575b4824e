//! Lingua Core
//!
//! Shared foundation for the Lingua platform: the error taxonomy used across
//! crates, logging setup, and the search filter applied by list screens.

pub mod error;
pub mod logging;
pub mod search;

pub use error::{FieldError, LinguaError, LinguaResult};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use search::{filter_by_term, matches_term, Searchable};
