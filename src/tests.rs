use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

use crate::config::Assignment;
use crate::domain::entities::status::{derive_note, QuoteStatus};
use crate::headless::run_headless;
use crate::usecase::ports::table::{LoadError, SourceFormat};
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::import_service::ImportService;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("quote-desk-{prefix}-{nanos}"))
}

fn quotes_xlsx(rows: &[(&str, &str, &str)]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["QUOTE#", "CUSTOMER", "STATUS"].iter().enumerate() {
        sheet
            .write_string(0, col as u16, *header)
            .expect("should write header");
    }
    for (idx, (quote, customer, status)) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, *quote).expect("should write quote");
        sheet
            .write_string(row, 1, *customer)
            .expect("should write customer");
        sheet.write_string(row, 2, *status).expect("should write status");
    }
    workbook.save_to_buffer().expect("should build xlsx fixture")
}

#[test]
fn end_to_end_lost_quote_is_merged_into_csv() {
    let bytes = quotes_xlsx(&[("Q1", "Acme", "open"), ("Q2", "Beta", "open")]);
    let mut session = ImportService::default()
        .load_bytes("NANCY_OPEN_QUOTES", &bytes, SourceFormat::Workbook)
        .expect("xlsx should load");

    let edit = session
        .confirm_update("Q1", QuoteStatus::Lost)
        .expect("Q1 should be updatable");
    assert_eq!(edit.note, derive_note("LOST"));

    let artifact = ExportService::default()
        .export(&session)
        .expect("export should succeed");

    assert_eq!(artifact.file_name, "NANCY_OPEN_QUOTES_UPDATED.csv");
    assert_eq!(
        String::from_utf8(artifact.bytes).expect("csv should be utf-8"),
        "QUOTE#,CUSTOMER,STATUS,suggested_note\n\
         Q1,Acme,LOST,Quote marked as lost.\n\
         Q2,Beta,open,\n"
    );
}

#[test]
fn workbook_dates_pass_through_as_iso_text() {
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let quoted_on = ExcelDateTime::from_ymd(2024, 3, 15).expect("should build date");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["QUOTE#", "STATUS", "DATE"].iter().enumerate() {
        sheet
            .write_string(0, col as u16, *header)
            .expect("should write header");
    }
    sheet.write_string(1, 0, "Q1").expect("should write quote");
    sheet.write_string(1, 1, "open").expect("should write status");
    sheet
        .write_datetime_with_format(1, 2, &quoted_on, &date_format)
        .expect("should write date");
    let bytes = workbook.save_to_buffer().expect("should build xlsx fixture");

    let session = ImportService::default()
        .load_bytes("quotes", &bytes, SourceFormat::Workbook)
        .expect("xlsx should load");
    let artifact = ExportService::default()
        .export(&session)
        .expect("export should succeed");

    assert_eq!(
        String::from_utf8(artifact.bytes).expect("csv should be utf-8"),
        "QUOTE#,STATUS,DATE,suggested_note\nQ1,open,2024-03-15,\n"
    );
}

#[test]
fn export_twice_is_byte_identical() {
    let bytes = quotes_xlsx(&[("Q1", "Acme", " open "), ("Q2", "Beta", "FOLLOW UP")]);
    let mut session = ImportService::default()
        .load_bytes("quotes", &bytes, SourceFormat::Workbook)
        .expect("xlsx should load");
    session
        .confirm_update("Q2", QuoteStatus::ClosedOrdered)
        .expect("Q2 should be updatable");
    let export_service = ExportService::default();

    let first = export_service.export(&session).expect("first export");
    let second = export_service.export(&session).expect("second export");

    assert_eq!(first, second);
}

#[test]
fn later_update_for_same_quote_wins() {
    let bytes = quotes_xlsx(&[("Q1", "Acme", "open")]);
    let mut session = ImportService::default()
        .load_bytes("quotes", &bytes, SourceFormat::Workbook)
        .expect("xlsx should load");

    session
        .confirm_update("Q1", QuoteStatus::Lost)
        .expect("first update");
    session
        .confirm_update("Q1", QuoteStatus::ClosedOrdered)
        .expect("second update");

    let csv = String::from_utf8(
        ExportService::default()
            .export(&session)
            .expect("export should succeed")
            .bytes,
    )
    .expect("csv should be utf-8");
    assert_eq!(
        csv,
        "QUOTE#,CUSTOMER,STATUS,suggested_note\n\
         Q1,Acme,CLOSED (ORDERED),Order placed: Z-stamped and closed.\n"
    );
    assert_eq!(session.pending_edits().len(), 1);
}

#[test]
fn non_spreadsheet_bytes_fail_to_load() {
    let result = ImportService::default().load_bytes(
        "quotes",
        b"%PDF-1.4 definitely not a workbook",
        SourceFormat::Workbook,
    );

    assert!(matches!(result, Err(LoadError::Workbook(_))), "{result:?}");
}

#[test]
fn reloading_starts_with_empty_edits() {
    let service = ImportService::default();
    let bytes = quotes_xlsx(&[("Q1", "Acme", "open")]);
    let mut session = service
        .load_bytes("quotes", &bytes, SourceFormat::Workbook)
        .expect("xlsx should load");
    session
        .confirm_update("Q1", QuoteStatus::Lost)
        .expect("update should succeed");

    let reloaded = service
        .load_bytes("quotes", &bytes, SourceFormat::Workbook)
        .expect("xlsx should reload");

    assert!(reloaded.pending_edits().is_empty());
    assert!(!reloaded.is_updated("Q1"));
}

#[test]
fn headless_run_writes_updated_csv_into_directory() {
    let temp_dir = unique_test_dir("headless");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let input = temp_dir.join("OPEN_QUOTES.csv");
    fs::write(&input, "QUOTE#,STATUS,AMOUNT\nQ1,open,10\nQ2,open,20\n")
        .expect("should write csv fixture");

    let written = run_headless(
        &ImportService::default(),
        &ExportService::default(),
        &input,
        &temp_dir,
        &[Assignment {
            quote_id: "Q2".to_string(),
            status: QuoteStatus::FollowUp,
        }],
    )
    .expect("headless run should succeed");

    assert_eq!(written, temp_dir.join("OPEN_QUOTES_UPDATED.csv"));
    let contents = fs::read_to_string(&written).expect("should read output");
    assert_eq!(
        contents,
        "QUOTE#,STATUS,AMOUNT,suggested_note\n\
         Q1,open,10,\n\
         Q2,FOLLOW UP,20,Pending customer reply. Follow-up needed.\n"
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn headless_run_rejects_unknown_quote() {
    let temp_dir = unique_test_dir("headless-unknown");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let input = temp_dir.join("quotes.csv");
    fs::write(&input, "QUOTE#,STATUS\nQ1,open\n").expect("should write csv fixture");
    let output = temp_dir.join("out.csv");

    let result = run_headless(
        &ImportService::default(),
        &ExportService::default(),
        &input,
        &output,
        &[Assignment {
            quote_id: "Q9".to_string(),
            status: QuoteStatus::Lost,
        }],
    );

    assert!(result.is_err(), "unknown quote should fail the run");
    assert!(!output.exists(), "nothing should be written on failure");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}
