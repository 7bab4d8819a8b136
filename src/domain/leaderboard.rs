//! The published, capped, ordered result of one pipeline run.

use std::cmp::Ordering;

use serde::Serialize;

use super::outcome::{Outcome, Verdict};
use super::score::ScoredCandidate;

/// Scored candidates sorted by composite score, highest first.
///
/// Built only through [`Leaderboard::rank`], which guarantees the ordering and
/// the size cap. A leaderboard is replaced wholesale on each run, never edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<ScoredCandidate>,
}

impl Leaderboard {
    /// Discard rejections, sort by composite descending and keep at most
    /// `max_size` entries.
    ///
    /// Equal composites keep their input order (`Outcome::index`), so the
    /// result does not depend on the order in which evaluations finished.
    #[must_use]
    pub fn rank(outcomes: Vec<Outcome>, max_size: usize) -> Self {
        let mut scored: Vec<(usize, ScoredCandidate)> = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome.verdict {
                Verdict::Scored(entry) => Some((outcome.index, entry)),
                Verdict::Rejected(_) => None,
            })
            .collect();

        scored.sort_by(|(index_a, a), (index_b, b)| {
            compare_composite(b.composite, a.composite).then(index_a.cmp(index_b))
        });
        scored.truncate(max_size);

        Self {
            entries: scored.into_iter().map(|(_, entry)| entry).collect(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[ScoredCandidate] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest-ranked entry.
    #[must_use]
    pub fn top(&self) -> Option<&ScoredCandidate> {
        self.entries.first()
    }
}

fn compare_composite(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}
