//! Operator-facing summaries of a processed statement.

use reconcile_core::JournalEntry;

/// "Statement period: <first> to <last>" over the entries' raw date tokens.
///
/// Dates are compared as written (string order), which is correct for the
/// zero-padded MM/DD tokens the statement prints. `None` when no entry has a date.
pub fn period_summary(entries: &[JournalEntry]) -> Option<String> {
    let mut dates = entries.iter().map(|e| e.date.as_str()).filter(|d| !d.is_empty());
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(format!("Statement period: {min} to {max}"))
}

/// One line per entry that needs manual review, e.g. `Line 12: ACME WIDGETS`.
pub fn review_lines(entries: &[JournalEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.needs_review())
        .map(|e| format!("Line {}: {}", e.source_line, e.description))
        .collect()
}
