//! reconcile-ledger: rule tables, classifier, statement pipeline, and ledger export

pub mod classifier;
pub mod export;
pub mod pipeline;
pub mod rules;
pub mod summary;

pub use classifier::{Classification, Classifier};
pub use export::{write_csv_file, write_entries, ExportError, COLUMNS};
pub use pipeline::{is_header_line, LineStats, Pipeline, StatementRun, HEADER_KEYWORDS};
pub use rules::{RuleError, RuleSet, RuleTables};
pub use summary::{period_summary, review_lines};
