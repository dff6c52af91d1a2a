use chrono::NaiveDate;
use reconcile_core::{EntryType, MISC_ACCOUNT_CODE, MISC_VENDOR_CODE};
use reconcile_ingest::PlainTextProvider;
use reconcile_ledger::{
    period_summary, review_lines, write_entries, LineStats, Pipeline, RuleTables, StatementRun,
};
use std::path::PathBuf;

fn statement_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join("sample_statement.txt")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn run_fixture(tables: &RuleTables) -> StatementRun {
    let pipeline = Pipeline::new(tables).unwrap();
    pipeline.process_document(&PlainTextProvider, &statement_path(), today())
}

fn export(run: &StatementRun) -> Vec<u8> {
    let mut buf = Vec::new();
    write_entries(&run.entries, &mut buf).unwrap();
    buf
}

/// Every line is accounted for, including the ones silently dropped.
#[test]
fn test_fixture_line_accounting() {
    let tables = RuleTables::builtin().unwrap();
    let run = run_fixture(&tables);

    assert!(run.acquisition_error.is_none());
    assert_eq!(
        run.stats,
        LineStats {
            total: 24,
            blank: 0,
            header: 5,
            unparsed: 8,
            parsed: 11,
        }
    );
    assert_eq!(run.entries.len(), run.stats.parsed);
    assert_eq!(
        run.stats.blank + run.stats.header + run.stats.unparsed + run.stats.parsed,
        run.stats.total
    );
}

#[test]
fn test_fixture_classification() {
    let tables = RuleTables::builtin().unwrap();
    let run = run_fixture(&tables);

    let got: Vec<(usize, u32, u32)> = run
        .entries
        .iter()
        .map(|e| (e.source_line, e.vendor_code, e.account_code))
        .collect();

    assert_eq!(
        got,
        vec![
            (11, 100, 374), // airport parking
            (12, 200, 375), // Wawa
            (13, 200, 201), // deposit
            (14, 200, 201), // deposit without $
            (15, 108, 175), // check
            (16, 101, 352), // Epcor
            (17, 106, 360), // Cox
            (18, 200, 373), // Starbucks
            (19, 200, 410), // unknown
            (21, 200, 372), // inn before garden
            (22, 200, 410), // unknown
        ]
    );
}

#[test]
fn test_signs_follow_line_format() {
    let tables = RuleTables::builtin().unwrap();
    let run = run_fixture(&tables);

    for e in &run.entries {
        if e.description.starts_with("Deposit ") {
            assert!(e.amount > 0.0, "deposit should be inflow: {:?}", e);
            assert_eq!(e.entry_type, EntryType::Credit);
        } else {
            assert!(e.amount < 0.0, "expected outflow: {:?}", e);
            assert_eq!(e.entry_type, EntryType::Debit);
        }
    }
}

#[test]
fn test_output_preserves_line_order() {
    let tables = RuleTables::builtin().unwrap();
    let run = run_fixture(&tables);

    assert!(run.entries.windows(2).all(|w| w[0].source_line < w[1].source_line));
}

#[test]
fn test_rerun_is_byte_identical() {
    let tables = RuleTables::builtin().unwrap();
    let first = run_fixture(&tables);
    let second = run_fixture(&tables);

    assert_eq!(first, second);
    assert_eq!(export(&first), export(&second));
}

#[test]
fn test_review_flag_iff_both_fallbacks() {
    let tables = RuleTables::builtin().unwrap();
    let run = run_fixture(&tables);

    for e in &run.entries {
        let both = e.vendor_code == MISC_VENDOR_CODE && e.account_code == MISC_ACCOUNT_CODE;
        assert_eq!(e.needs_review(), both);
    }
    assert_eq!(
        review_lines(&run.entries),
        vec![
            "Line 19: ACME WIDGETS CO".to_string(),
            "Line 22: Pet Supermarket 0441".to_string(),
        ]
    );
}

#[test]
fn test_period_key_and_clipboard_summary() {
    let tables = RuleTables::builtin().unwrap();
    let run = run_fixture(&tables);

    assert_eq!(run.period.file_stem(), "03-2024");
    assert_eq!(
        period_summary(&run.entries).unwrap(),
        "Statement period: 02/29 to 03/24"
    );
}

#[test]
fn test_custom_rules_change_classification() {
    let toml = r#"
[[vendors]]
code = 200
name = "Misc. Vendors"
default_account = 410

[[vendors]]
code = 310
name = "Acme Widgets"
patterns = ["acme.*widgets"]
default_account = 380

[[accounts]]
code = 373
patterns = ["starbucks"]
"#;
    let tables = RuleTables::from_toml(toml).unwrap();
    let run = run_fixture(&tables);

    let acme = run.entries.iter().find(|e| e.source_line == 19).unwrap();
    assert_eq!((acme.vendor_code, acme.account_code), (310, 380));
    assert_eq!(acme.vendor_name, "Acme Widgets");
    assert!(!acme.needs_review());
}

#[test]
fn test_blank_document() {
    let tables = RuleTables::builtin().unwrap();
    let pipeline = Pipeline::new(&tables).unwrap();
    let run = pipeline.run("\n\n   \n", today());

    assert!(!run.has_transactions());
    assert_eq!(run.stats.blank, 3);
    assert_eq!(run.period.file_stem(), "10-2026");
}
