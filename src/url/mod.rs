//! URL handling for PageSift
//!
//! This module provides URL normalization, authority extraction, and the
//! link filter that decides which discovered URLs enter the frontier.

mod domain;
mod filter;
mod normalize;

pub use domain::extract_authority;
pub use filter::LinkFilter;
pub use normalize::normalize_url;
