//! CSS-like selector types, parsing and matching.

mod matcher;
mod parser;
mod types;

pub use matcher::{MatchContext, SelectorMatcher};
pub use types::*;
