//! Deterministic vendor and account classification over the rule tables.
//!
//! Account precedence: account rules (content) > vendor default > misc account.
//! Content wins so that e.g. a "parking" line posts to parking even when the
//! vendor it was identified as defaults somewhere else.

use reconcile_core::{needs_manual_review, MISC_ACCOUNT_CODE, MISC_VENDOR_CODE};

use crate::rules::RuleTables;

/// Result of classifying one description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub vendor_code: u32,
    pub vendor_name: String,
    pub account_code: u32,
}

impl Classification {
    pub fn needs_review(&self) -> bool {
        needs_manual_review(self.vendor_code, self.account_code)
    }
}

pub struct Classifier<'a> {
    tables: &'a RuleTables,
}

impl<'a> Classifier<'a> {
    pub fn new(tables: &'a RuleTables) -> Self {
        Self { tables }
    }

    /// First vendor in table order with a matching pattern, skipping the
    /// catch-all. Falls back to the catch-all vendor; never fails.
    pub fn identify_vendor(&self, description: &str) -> (u32, &'a str) {
        self.tables
            .vendors()
            .iter()
            .filter(|v| !v.is_catch_all())
            .find(|v| v.matches(description))
            .map(|v| (v.code, v.name.as_str()))
            .unwrap_or_else(|| (MISC_VENDOR_CODE, self.tables.catch_all_name()))
    }

    pub fn classify_account(&self, description: &str, vendor_code: u32) -> u32 {
        if let Some(rule) = self.tables.accounts().iter().find(|a| a.matches(description)) {
            return rule.code;
        }

        self.tables
            .vendor(vendor_code)
            .and_then(|v| v.default_account)
            .unwrap_or(MISC_ACCOUNT_CODE)
    }

    /// Vendor first, then account (which needs the vendor's default).
    pub fn classify(&self, description: &str) -> Classification {
        let (vendor_code, vendor_name) = self.identify_vendor(description);
        let account_code = self.classify_account(description, vendor_code);

        tracing::trace!(description, vendor_code, account_code, "classified");

        Classification {
            vendor_code,
            vendor_name: vendor_name.to_string(),
            account_code,
        }
    }
}
