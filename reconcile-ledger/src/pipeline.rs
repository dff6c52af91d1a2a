//! Statement pipeline: document text -> filtered lines -> candidates -> journal entries.

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use reconcile_core::{EntryType, JournalEntry, PeriodKey};
use reconcile_ingest::{LineParser, StatementPeriodExtractor, TextProvider, TransactionCandidate};

use crate::classifier::Classifier;
use crate::rules::RuleTables;

/// Lines containing any of these (case-insensitive) are statement headers or
/// boilerplate and are never parsed.
pub const HEADER_KEYWORDS: &[&str] = &[
    "date",
    "description",
    "amount",
    "balance",
    "statement",
    "account",
    "customer service",
];

pub fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    HEADER_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Where each input line ended up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineStats {
    pub total: usize,
    pub blank: usize,
    pub header: usize,
    /// Non-blank, non-header lines no format recognized. Dropped from output.
    pub unparsed: usize,
    pub parsed: usize,
}

/// Everything one statement produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementRun {
    /// In source line order.
    pub entries: Vec<JournalEntry>,
    pub stats: LineStats,
    pub period: PeriodKey,
    /// Set when the document could not be read; `entries` is then empty.
    pub acquisition_error: Option<String>,
}

impl StatementRun {
    /// False is the "no transactions found" signal.
    pub fn has_transactions(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn needs_review(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter().filter(|e| e.needs_review())
    }
}

pub struct Pipeline<'a> {
    parser: LineParser,
    periods: StatementPeriodExtractor,
    classifier: Classifier<'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(tables: &'a RuleTables) -> Result<Self> {
        Ok(Self {
            parser: LineParser::new()?,
            periods: StatementPeriodExtractor::new()?,
            classifier: Classifier::new(tables),
        })
    }

    /// Parse and classify every line of `text`.
    ///
    /// A line never contributes more than one entry, and a line that fails to
    /// parse never stops the lines after it.
    pub fn process_text(&self, text: &str) -> (Vec<JournalEntry>, LineStats) {
        let mut stats = LineStats::default();
        let mut entries = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            stats.total += 1;

            let line = raw.trim();
            if line.is_empty() {
                stats.blank += 1;
                continue;
            }
            if is_header_line(line) {
                stats.header += 1;
                continue;
            }

            match self.parser.parse(line) {
                Some(candidate) => {
                    stats.parsed += 1;
                    entries.push(self.assemble(line_no, candidate));
                }
                None => {
                    stats.unparsed += 1;
                    tracing::debug!(line_no, line, "no transaction format matched");
                }
            }
        }

        (entries, stats)
    }

    fn assemble(&self, source_line: usize, candidate: TransactionCandidate) -> JournalEntry {
        let class = self.classifier.classify(&candidate.description);

        JournalEntry {
            source_line,
            entry_type: EntryType::from_amount(candidate.amount),
            date: candidate.date,
            check_number: candidate.check_number,
            vendor_code: class.vendor_code,
            vendor_name: class.vendor_name,
            description: candidate.description,
            amount: candidate.amount,
            account_code: class.account_code,
        }
    }

    /// Run the whole pipeline over already-acquired text.
    pub fn run(&self, text: &str, today: NaiveDate) -> StatementRun {
        let (entries, stats) = self.process_text(text);
        let period = self.periods.key_or(text, today);

        tracing::info!(
            lines = stats.total,
            parsed = stats.parsed,
            unparsed = stats.unparsed,
            period = %period,
            "statement processed"
        );

        StatementRun {
            entries,
            stats,
            period,
            acquisition_error: None,
        }
    }

    /// Acquire the document text and run the pipeline over it.
    ///
    /// An unreadable document is logged and produces an empty run rather
    /// than an error.
    pub fn process_document(
        &self,
        provider: &dyn TextProvider,
        source: &Path,
        today: NaiveDate,
    ) -> StatementRun {
        match provider.provide_text(source) {
            Ok(text) => self.run(&text, today),
            Err(e) => {
                tracing::error!(source = %source.display(), error = %e, "could not read statement");
                StatementRun {
                    entries: Vec::new(),
                    stats: LineStats::default(),
                    period: PeriodKey::from_date(today),
                    acquisition_error: Some(e.to_string()),
                }
            }
        }
    }
}
