//! Configuration module for pagesift
//!
//! All configuration enters through the command line; there is no config
//! file. This module holds the option types and the pre-run validation that
//! turns bad input into a fatal error before any network activity.

mod types;
mod validation;

// Re-export types
pub use types::{CrawlOptions, DEFAULT_EXCLUDE_PATTERNS};

// Re-export validation functions
pub use validation::{validate, validate_seed, MAX_DELAY_SECONDS};
