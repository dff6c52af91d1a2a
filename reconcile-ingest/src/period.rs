//! Statement period detection.
//!
//! Looks for the date range printed on the statement and keys the output by
//! the month/year the period ends in, e.g.
//!   "February 29, 2024 through March 28, 2024"
//!   "Statement Period: Mar 1, 2024 - Mar 31, 2024"
//!   "03/01/2024 through 03/31/2024"

use anyhow::Result;
use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};

use reconcile_core::PeriodKey;

const NAMED_DATE: &str = r"[a-z]{3,9}\s+\d{1,2},\s+\d{4}";
const SLASH_DATE: &str = r"\d{1,2}/\d{1,2}/\d{4}";

pub struct StatementPeriodExtractor {
    patterns: Vec<Regex>,
}

impl StatementPeriodExtractor {
    pub fn new() -> Result<Self> {
        let sources = [
            format!(r"({NAMED_DATE})\s+through\s+({NAMED_DATE})"),
            format!(r"Statement\s+Period:\s*({NAMED_DATE})\s*-\s*({NAMED_DATE})"),
            format!(r"({SLASH_DATE})\s+through\s+({SLASH_DATE})"),
        ];

        let patterns = sources
            .iter()
            .map(|src| RegexBuilder::new(src).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Month/year of the statement's closing date, if a range is printed.
    ///
    /// Patterns are tried in order; a range whose end date does not parse
    /// falls through to the next pattern.
    pub fn find(&self, text: &str) -> Option<PeriodKey> {
        self.patterns.iter().find_map(|re| {
            let caps = re.captures(text)?;
            parse_end_date(&caps[2]).map(PeriodKey::from_date)
        })
    }

    /// Like [`find`](Self::find), falling back to `today`'s month/year.
    pub fn key_or(&self, text: &str, today: NaiveDate) -> PeriodKey {
        self.find(text).unwrap_or_else(|| {
            tracing::debug!("no statement period found, using current month");
            PeriodKey::from_date(today)
        })
    }
}

fn parse_end_date(raw: &str) -> Option<NaiveDate> {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    // %B accepts both "Mar" and "March".
    let format = if normalized.contains('/') {
        "%m/%d/%Y"
    } else {
        "%B %d, %Y"
    };
    NaiveDate::parse_from_str(&normalized, format).ok()
}
