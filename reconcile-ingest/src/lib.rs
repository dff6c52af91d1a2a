//! reconcile-ingest: statement text acquisition, line parsers, and statement period detection.

pub mod document;
pub mod parsers;
pub mod period;
pub mod types;

pub use document::{provider_for, DocumentError, PdfTextProvider, PlainTextProvider, TextProvider};
pub use parsers::{parse_line, LineParser};
pub use period::StatementPeriodExtractor;
pub use types::{LineFormat, TransactionCandidate};
