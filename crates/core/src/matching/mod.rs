//! Album title matching.
//!
//! Exact matching compares case-folded titles. Fuzzy matching normalizes
//! both sides (see [`normalize`]) and falls back to a similarity ratio with a
//! fixed cutoff of [`FUZZY_CUTOFF`].

mod matcher;
mod normalize;
mod similarity;

pub use matcher::{find_album, find_title_match, MatchPolicy, FUZZY_CUTOFF};
pub use normalize::normalize;
pub use similarity::similarity_ratio;
