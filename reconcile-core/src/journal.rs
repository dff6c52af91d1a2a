//! Journal entry types: the output unit of a reconciled statement line

use serde::{Deserialize, Serialize};

/// Catch-all vendor code. Never matched by pattern search.
pub const MISC_VENDOR_CODE: u32 = 200;
/// Display name of the catch-all vendor.
pub const MISC_VENDOR_NAME: &str = "Misc. Vendors";
/// Global miscellaneous account code.
pub const MISC_ACCOUNT_CODE: u32 = 410;

/// Note rendered for entries nothing could be recognized about.
pub const MANUAL_REVIEW_NOTE: &str = "NEEDS MANUAL REVIEW";

/// Debit or credit, derived from the sign of the amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntryType {
    Debit,
    Credit,
}

impl EntryType {
    /// Negative amounts are outflows. Zero counts as a credit.
    pub fn from_amount(amount: f64) -> Self {
        if amount < 0.0 {
            EntryType::Debit
        } else {
            EntryType::Credit
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryType::Debit => "Debit",
            EntryType::Credit => "Credit",
        }
    }
}

/// One parsed and classified statement line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    /// 1-based line number in the source document text
    pub source_line: usize,
    /// Raw date token as it appeared on the statement (e.g. "03/13")
    pub date: String,
    pub entry_type: EntryType,
    pub check_number: Option<String>,
    pub vendor_code: u32,
    pub vendor_name: String,
    pub description: String,
    /// Positive = inflow, negative = outflow
    pub amount: f64,
    pub account_code: u32,
}

impl JournalEntry {
    /// Magnitude of an outflow, `None` for inflows and zero amounts.
    pub fn debit(&self) -> Option<f64> {
        (self.amount < 0.0).then(|| self.amount.abs())
    }

    /// Magnitude of an inflow, `None` for outflows and zero amounts.
    pub fn credit(&self) -> Option<f64> {
        (self.amount > 0.0).then_some(self.amount)
    }

    /// True when neither the vendor nor the account was recognized.
    pub fn needs_review(&self) -> bool {
        needs_manual_review(self.vendor_code, self.account_code)
    }

    pub fn classification_note(&self) -> &'static str {
        if self.needs_review() {
            MANUAL_REVIEW_NOTE
        } else {
            ""
        }
    }
}

/// Manual review is required exactly when both codes are the fallbacks.
pub fn needs_manual_review(vendor_code: u32, account_code: u32) -> bool {
    vendor_code == MISC_VENDOR_CODE && account_code == MISC_ACCOUNT_CODE
}
