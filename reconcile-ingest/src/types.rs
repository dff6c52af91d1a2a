use serde::{Deserialize, Serialize};

/// Which recognizer produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineFormat {
    CardPurchase,
    CardPurchaseWithPin,
    Deposit,
    Check,
    ElectronicWithdrawal,
    /// Date/amount/description in one of the generic orderings
    Generic,
}

/// A transaction recognized on a single statement line, before classification.
///
/// Only ever built from a line that matched a known format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCandidate {
    /// Raw date token, not normalized (e.g. "03/13" or "1/5/24")
    pub date: String,
    /// Negative means outflow; positive means inflow.
    pub amount: f64,
    pub description: String,
    /// Only set for check lines.
    pub check_number: Option<String>,
    pub format: LineFormat,
}
