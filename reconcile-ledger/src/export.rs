//! Ledger spreadsheet export (CSV).
//!
//! Columns, in order:
//! Date, Type, Check #, Vendor/Bank, Description, Cleared, Debit (-), Credit (+),
//! Balance, VNbr, AcctNbr, Classification_Note, Source_Line

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use reconcile_core::JournalEntry;

pub const COLUMNS: [&str; 13] = [
    "Date",
    "Type",
    "Check #",
    "Vendor/Bank",
    "Description",
    "Cleared",
    "Debit (-)",
    "Credit (+)",
    "Balance",
    "VNbr",
    "AcctNbr",
    "Classification_Note",
    "Source_Line",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "Type")]
    entry_type: &'static str,
    #[serde(rename = "Check #")]
    check_number: Option<&'a str>,
    #[serde(rename = "Vendor/Bank")]
    vendor: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Cleared")]
    cleared: &'a str,
    #[serde(rename = "Debit (-)")]
    debit: Option<String>,
    #[serde(rename = "Credit (+)")]
    credit: Option<String>,
    /// Running balances are not computed.
    #[serde(rename = "Balance")]
    balance: Option<String>,
    #[serde(rename = "VNbr")]
    vendor_code: u32,
    #[serde(rename = "AcctNbr")]
    account_code: u32,
    #[serde(rename = "Classification_Note")]
    note: &'static str,
    #[serde(rename = "Source_Line")]
    source_line: usize,
}

impl<'a> From<&'a JournalEntry> for ExportRow<'a> {
    fn from(e: &'a JournalEntry) -> Self {
        Self {
            date: &e.date,
            entry_type: e.entry_type.label(),
            check_number: e.check_number.as_deref(),
            vendor: &e.vendor_name,
            description: &e.description,
            cleared: &e.date,
            debit: e.debit().map(money),
            credit: e.credit().map(money),
            balance: None,
            vendor_code: e.vendor_code,
            account_code: e.account_code,
            note: e.classification_note(),
            source_line: e.source_line,
        }
    }
}

fn money(v: f64) -> String {
    format!("{v:.2}")
}

/// Write entries, header row first, in the order given.
pub fn write_entries<W: Write>(entries: &[JournalEntry], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    if entries.is_empty() {
        wtr.write_record(COLUMNS)?;
    }
    for entry in entries {
        wtr.serialize(ExportRow::from(entry))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_csv_file(entries: &[JournalEntry], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_entries(entries, file)
}
