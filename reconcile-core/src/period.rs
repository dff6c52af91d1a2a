//! Statement period naming key: the month/year an export is filed under.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Month and year a statement closes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    pub year: i32,
    pub month: u32,
}

impl PeriodKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// "MM-YYYY", used as the default export file stem.
    pub fn file_stem(&self) -> String {
        format!("{:02}-{}", self.month, self.year)
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.file_stem())
    }
}
