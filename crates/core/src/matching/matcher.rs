use std::collections::HashMap;

use crate::catalog::AlbumRecord;

use super::{normalize, similarity_ratio};

/// Minimum similarity for a fuzzy match.
pub const FUZZY_CUTOFF: f64 = 0.8;

/// How album titles are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Case-insensitive equality.
    Exact,
    /// Normalized equality, then best similarity at or above [`FUZZY_CUTOFF`].
    Fuzzy,
}

impl MatchPolicy {
    pub fn from_fuzzy(fuzzy: bool) -> Self {
        if fuzzy {
            MatchPolicy::Fuzzy
        } else {
            MatchPolicy::Exact
        }
    }
}

/// Index of the title that matches `target`, if any.
///
/// Exact mode returns the first case-insensitive hit. Fuzzy mode returns the
/// first title whose normalized form equals the normalized target; failing
/// that, the single best-scoring title at or above the cutoff. Titles that
/// normalize to the same string are scored once, for their first occurrence.
pub fn find_title_match<'a, I>(target: &str, titles: I, policy: MatchPolicy) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    match policy {
        MatchPolicy::Exact => {
            let target = target.to_lowercase();
            titles
                .into_iter()
                .position(|title| title.to_lowercase() == target)
        }
        MatchPolicy::Fuzzy => {
            let target = normalize(target);

            let mut candidates: Vec<(usize, String)> = Vec::new();
            let mut seen: HashMap<String, usize> = HashMap::new();
            for (idx, title) in titles.into_iter().enumerate() {
                let normalized = normalize(title);
                if normalized == target {
                    return Some(idx);
                }
                if !seen.contains_key(&normalized) {
                    seen.insert(normalized.clone(), idx);
                    candidates.push((idx, normalized));
                }
            }

            let mut best: Option<(usize, f64)> = None;
            for (idx, normalized) in &candidates {
                let score = similarity_ratio(&target, normalized);
                if score < FUZZY_CUTOFF {
                    continue;
                }
                if best.map_or(true, |(_, best_score)| score > best_score) {
                    best = Some((*idx, score));
                }
            }
            best.map(|(idx, _)| idx)
        }
    }
}

/// The album whose title matches `target` under `policy`.
pub fn find_album<'a>(
    target: &str,
    albums: &'a [AlbumRecord],
    policy: MatchPolicy,
) -> Option<&'a AlbumRecord> {
    find_title_match(target, albums.iter().map(|a| a.title.as_str()), policy).map(|idx| &albums[idx])
}
