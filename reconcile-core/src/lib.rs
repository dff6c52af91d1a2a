//! reconcile-core: journal entry types and shared numeric/date helpers

pub mod amount;
pub mod journal;
pub mod period;

pub use amount::coerce_amount;
pub use journal::{
    needs_manual_review, EntryType, JournalEntry, MANUAL_REVIEW_NOTE, MISC_ACCOUNT_CODE,
    MISC_VENDOR_CODE, MISC_VENDOR_NAME,
};
pub use period::PeriodKey;
