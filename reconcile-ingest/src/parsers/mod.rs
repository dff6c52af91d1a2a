//! Line-level transaction extraction.

pub mod chase_checking;
pub mod generic;

use anyhow::Result;

use crate::types::TransactionCandidate;
use chase_checking::ChaseCheckingFormats;
use generic::GenericFormats;

/// Turns one raw statement line into a candidate transaction.
///
/// Statement-specific formats are tried before the generic orderings.
/// Header and blank-line filtering is the caller's job.
pub struct LineParser {
    statement: ChaseCheckingFormats,
    generic: GenericFormats,
}

impl LineParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            statement: ChaseCheckingFormats::new()?,
            generic: GenericFormats::new()?,
        })
    }

    pub fn parse(&self, line: &str) -> Option<TransactionCandidate> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        self.statement
            .parse(line)
            .or_else(|| self.generic.parse(line))
    }
}

/// Parse a single line with a freshly compiled parser.
///
/// Convenient for one-off lines; build a [`LineParser`] once when parsing a document.
pub fn parse_line(line: &str) -> Result<Option<TransactionCandidate>> {
    Ok(LineParser::new()?.parse(line))
}
