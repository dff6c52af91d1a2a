//! Generic fallback for lines no statement format recognizes.
//!
//! Three orderings of (date, amount, text) separated by whitespace are tried.
//! Each captured group is then assigned a role by its own shape: date shape
//! first, then amount shape, otherwise description. A later group overwrites
//! an earlier one with the same role, so a description that itself looks like
//! a date or an amount can knock a line out. This is best-effort on purpose.

use anyhow::Result;
use regex::Regex;

use reconcile_core::coerce_amount;

use crate::types::{LineFormat, TransactionCandidate};

const DATE: &str = r"\d{1,2}[-/]\d{1,2}[-/]?\d{2,4}";
const AMOUNT: &str = r"[+-]?\$?[\d,]+\.?\d*";

pub struct GenericFormats {
    orderings: Vec<Regex>,
    date_shape: Regex,
    amount_shape: Regex,
}

impl GenericFormats {
    pub fn new() -> Result<Self> {
        let orderings = vec![
            // date amount description
            Regex::new(&format!(r"({DATE})\s+({AMOUNT})\s+(.+)"))?,
            // amount date description
            Regex::new(&format!(r"({AMOUNT})\s+({DATE})\s+(.+)"))?,
            // description amount date
            Regex::new(&format!(r"(.+?)\s+({AMOUNT})\s+({DATE})"))?,
        ];

        Ok(Self {
            orderings,
            date_shape: Regex::new(&format!("^{DATE}"))?,
            amount_shape: Regex::new(&format!("^{AMOUNT}"))?,
        })
    }

    pub fn parse(&self, line: &str) -> Option<TransactionCandidate> {
        self.orderings.iter().find_map(|re| {
            let caps = re.captures(line)?;
            let groups: Vec<&str> = caps.iter().skip(1).flatten().map(|m| m.as_str()).collect();
            self.assign_roles(&groups)
        })
    }

    fn assign_roles(&self, groups: &[&str]) -> Option<TransactionCandidate> {
        let mut date = None;
        let mut amount = None;
        let mut description = None;

        for group in groups {
            if self.date_shape.is_match(group) {
                date = Some(*group);
            } else if self.amount_shape.is_match(group) {
                amount = Some(*group);
            } else {
                description = Some(*group);
            }
        }

        let description = description.map(str::trim).filter(|d| !d.is_empty())?;

        Some(TransactionCandidate {
            date: date?.to_string(),
            amount: coerce_amount(amount?),
            description: description.to_string(),
            check_number: None,
            format: LineFormat::Generic,
        })
    }
}
