//! Read-only views derived from a version's content.

pub mod compare;
pub mod keywords;

pub use compare::{compare, Comparison};
pub use keywords::{analyze, KeywordCount, KeywordReport};
