//! Match-history filtering.
//!
//! Pure filters over an immutable record slice: direct meetings between two
//! teams, a single team's full history, and the recent-form window. Nothing
//! here mutates or copies the underlying history; results are borrowed views
//! in the original chronological (input) order.

use crate::domain::{MatchRecord, TeamKey};

/// Every record where the two keys met directly, either side home.
///
/// An empty result means "no prior meetings", which is a normal outcome,
/// not an error.
pub fn head_to_head<'a>(
    records: &'a [MatchRecord],
    a: &TeamKey,
    b: &TeamKey,
) -> Vec<&'a MatchRecord> {
    records.iter().filter(|r| r.is_between(a, b)).collect()
}

/// Every record where the team appears, home or away, in input order.
pub fn team_history<'a>(records: &'a [MatchRecord], key: &TeamKey) -> Vec<&'a MatchRecord> {
    records.iter().filter(|r| r.involves(key)).collect()
}

/// The `window` most recent records from a team's history.
///
/// Recency is by match date, descending; records sharing a date are ordered
/// by their position in the input, the later row counting as more recent.
/// Histories shorter than the window are returned whole.
pub fn recent_form<'a>(history: &[&'a MatchRecord], window: usize) -> Vec<&'a MatchRecord> {
    let mut indexed: Vec<(usize, &MatchRecord)> = history.iter().copied().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| b.date.cmp(&a.date).then(ib.cmp(ia)));
    indexed.into_iter().take(window).map(|(_, r)| r).collect()
}
