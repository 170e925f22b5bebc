//! Exports written through the directory sink.

use burner::core::export::{DirectorySink, ExportFormat, ExportSink};
use burner::{TestDir, seeded_store};

#[test]
fn json_export_round_trips_the_sequence() {
    let dir = TestDir::new();
    let store = seeded_store(3);
    let artifact = store.export(ExportFormat::Json).unwrap();
    let path = DirectorySink::new(dir.path()).save(&artifact).unwrap();

    assert_eq!(path, dir.file_path("disposable_accounts.json"));
    let parsed: Vec<burner::core::models::Account> =
        serde_json::from_str(&dir.read_file("disposable_accounts.json").unwrap()).unwrap();
    assert_eq!(parsed, store.accounts());
}

#[test]
fn pdf_export_is_a_pdf_document() {
    let dir = TestDir::new();
    let artifact = seeded_store(5).export(ExportFormat::Pdf).unwrap();
    let path = DirectorySink::new(dir.path()).save(&artifact).unwrap();

    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn xlsx_export_is_a_zip_container() {
    let dir = TestDir::new();
    let artifact = seeded_store(5).export(ExportFormat::Xlsx).unwrap();
    let path = DirectorySink::new(dir.path().join("nested")).save(&artifact).unwrap();

    assert!(path.ends_with("nested/disposable_accounts.xlsx"));
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn empty_store_still_exports_every_format() {
    let store = seeded_store(0);
    for &format in ExportFormat::ALL {
        let artifact = store.export(format).unwrap();
        assert!(!artifact.bytes.is_empty(), "{format} export should not be empty");
        assert_eq!(artifact.format, format);
    }
}

#[test]
fn repeated_export_overwrites_previous_file() {
    let dir = TestDir::new();
    let mut sink = DirectorySink::new(dir.path());
    sink.save(&seeded_store(4).export(ExportFormat::Json).unwrap())
        .unwrap();
    sink.save(&seeded_store(1).export(ExportFormat::Json).unwrap())
        .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&dir.read_file("disposable_accounts.json").unwrap()).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}
