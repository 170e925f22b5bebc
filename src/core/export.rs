//! Export of the full account sequence to JSON, PDF and XLSX.
//!
//! The exporter builds one in-memory artifact per call and has no side
//! effects. Writing the artifact somewhere is the job of an [`ExportSink`].
//!
//! PDF and XLSX share a [`TableDocument`]: fixed columns
//! `Name, Email, Username, Password, Group`, one row per account in store
//! order. Byte encoding is delegated to `printpdf` and `rust_xlsxwriter`.

use std::fmt;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use rust_xlsxwriter::{Format, Workbook};

use crate::core::models::{Account, AccountField};
use crate::error::{BurnerError, Result};
use crate::storage::kv::write_atomic;

/// Base name shared by every export file.
pub const EXPORT_BASE_NAME: &str = "disposable_accounts";

/// Worksheet name used in spreadsheet exports.
pub const SHEET_NAME: &str = "Accounts";

/// Title written at the top of the PDF.
pub const DOCUMENT_TITLE: &str = "Disposable Accounts";

// =============================================================================
// Format
// =============================================================================

/// Supported export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Structured text: the snapshot array as pretty JSON.
    Json,
    /// Tabular document.
    Pdf,
    /// Spreadsheet.
    Xlsx,
}

impl ExportFormat {
    pub const ALL: &'static [Self] = &[Self::Json, Self::Pdf, Self::Xlsx];

    /// CLI name, also the file extension.
    #[must_use]
    pub const fn cli_name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pdf => "pdf",
            Self::Xlsx => "xlsx",
        }
    }

    #[must_use]
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Pdf => "application/pdf",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// `disposable_accounts.<ext>`.
    #[must_use]
    pub fn default_file_name(self) -> String {
        format!("{EXPORT_BASE_NAME}.{}", self.cli_name())
    }

    /// Parse from CLI argument (case-insensitive).
    pub fn from_cli_name(name: &str) -> Result<Self> {
        let lower = name.to_lowercase();
        Self::ALL
            .iter()
            .find(|f| f.cli_name() == lower)
            .copied()
            .ok_or_else(|| BurnerError::InvalidExportFormat(name.to_string()))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

// =============================================================================
// Table structure
// =============================================================================

/// Column order for tabular exports.
pub const EXPORT_COLUMNS: [AccountField; 5] = [
    AccountField::Name,
    AccountField::Email,
    AccountField::Username,
    AccountField::Password,
    AccountField::Group,
];

/// Encoder-independent table handed to the PDF and XLSX writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDocument {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl TableDocument {
    /// One row per account, cells in [`EXPORT_COLUMNS`] order.
    #[must_use]
    pub fn from_accounts(accounts: &[Account]) -> Self {
        Self {
            title: DOCUMENT_TITLE.to_string(),
            columns: EXPORT_COLUMNS.iter().map(|f| f.heading()).collect(),
            rows: accounts
                .iter()
                .map(|account| {
                    EXPORT_COLUMNS
                        .iter()
                        .map(|&field| account.field(field).to_string())
                        .collect()
                })
                .collect(),
        }
    }
}

// =============================================================================
// Artifact
// =============================================================================

/// A complete, self-contained export document.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Serialize the full sequence into `format`.
///
/// # Errors
/// Returns an error if the encoder fails; with well-formed account data this
/// does not happen in practice.
pub fn export(accounts: &[Account], format: ExportFormat) -> Result<ExportArtifact> {
    let bytes = match format {
        ExportFormat::Json => serde_json::to_string_pretty(accounts)?.into_bytes(),
        ExportFormat::Pdf => render_pdf(&TableDocument::from_accounts(accounts))?,
        ExportFormat::Xlsx => render_xlsx(&TableDocument::from_accounts(accounts))?,
    };
    tracing::debug!(%format, accounts = accounts.len(), bytes = bytes.len(), "Built export");
    Ok(ExportArtifact {
        format,
        file_name: format.default_file_name(),
        bytes,
    })
}

// =============================================================================
// PDF
// =============================================================================

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const TITLE_SIZE_PT: f32 = 14.0;
const TITLE_GAP_MM: f32 = 14.0;
const CELL_SIZE_PT: f32 = 9.0;
const LINE_HEIGHT_MM: f32 = 4.0;
const ROW_PADDING_MM: f32 = 3.0;
/// Height of a row whose cells all fit on one line.
const ROW_HEIGHT_MM: f32 = LINE_HEIGHT_MM + ROW_PADDING_MM;
/// Rough average Helvetica glyph width at [`CELL_SIZE_PT`].
const CHAR_WIDTH_MM: f32 = 1.75;
const COLUMN_WIDTHS_MM: [f32; 5] = [38.0, 42.0, 40.0, 45.0, 25.0];
const LAYER_NAME: &str = "Table";

/// A table row split into per-column lines.
type RowLines = Vec<Vec<String>>;

fn pdf_error(err: impl fmt::Debug) -> BurnerError {
    BurnerError::Export {
        format: ExportFormat::Pdf.to_string(),
        message: format!("{err:?}"),
    }
}

/// Break `text` into lines that fit a column.
///
/// Lines break at spaces; a word wider than the column is split across
/// lines. Every character of `text` ends up on some line.
fn wrap_cell(text: &str, width_mm: f32) -> Vec<String> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max_chars = ((width_mm / CHAR_WIDTH_MM).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;
    let mut started = false;

    for word in text.split(' ') {
        let word_len = word.chars().count();
        let needed = if started { line_len + 1 + word_len } else { word_len };
        if needed <= max_chars {
            if started {
                line.push(' ');
                line_len += 1;
            }
            line.push_str(word);
            line_len += word_len;
            started = true;
            continue;
        }

        if started {
            lines.push(std::mem::take(&mut line));
        }
        let chars: Vec<char> = word.chars().collect();
        let mut chunks = chars.chunks(max_chars).peekable();
        line_len = 0;
        while let Some(chunk) = chunks.next() {
            if chunks.peek().is_some() {
                lines.push(chunk.iter().collect());
            } else {
                line = chunk.iter().collect();
                line_len = chunk.len();
            }
        }
        started = true;
    }

    lines.push(line);
    lines
}

fn layout_row(cells: &[String]) -> RowLines {
    cells
        .iter()
        .zip(COLUMN_WIDTHS_MM)
        .map(|(cell, width)| wrap_cell(cell, width))
        .collect()
}

fn row_height_mm(row: &[Vec<String>]) -> f32 {
    let lines = row.iter().map(Vec::len).max().unwrap_or(1);
    #[allow(clippy::cast_precision_loss)]
    let extra = lines.saturating_sub(1) as f32;
    extra.mul_add(LINE_HEIGHT_MM, ROW_HEIGHT_MM)
}

/// Page index and first baseline for each body row.
///
/// A row moves to a new page when its last line would fall into the bottom
/// margin, unless it is already the first row on its page.
fn place_rows(heights: &[f32], header_height: f32) -> Vec<(usize, f32)> {
    let top = PAGE_HEIGHT_MM - MARGIN_MM;
    let mut page = 0;
    let mut y = top - TITLE_GAP_MM - header_height;
    let mut rows_on_page = 0;

    heights
        .iter()
        .map(|&height| {
            if rows_on_page > 0 && y - (height - ROW_HEIGHT_MM) < MARGIN_MM {
                page += 1;
                y = top - header_height;
                rows_on_page = 0;
            }
            let placed = (page, y);
            y -= height;
            rows_on_page += 1;
            placed
        })
        .collect()
}

fn draw_row(layer: &PdfLayerReference, row: &[Vec<String>], y: f32, font: &IndirectFontRef) {
    let mut x = MARGIN_MM;
    for (lines, width) in row.iter().zip(COLUMN_WIDTHS_MM) {
        let mut baseline = y;
        for line in lines {
            layer.use_text(line.as_str(), CELL_SIZE_PT, Mm(x), Mm(baseline), font);
            baseline -= LINE_HEIGHT_MM;
        }
        x += width;
    }
}

fn render_pdf(table: &TableDocument) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        table.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let header_cells: Vec<String> = table.columns.iter().map(ToString::to_string).collect();
    let header = layout_row(&header_cells);
    let header_height = row_height_mm(&header);
    let rows: Vec<RowLines> = table.rows.iter().map(|cells| layout_row(cells)).collect();
    let heights: Vec<f32> = rows.iter().map(|row| row_height_mm(row)).collect();

    let top = PAGE_HEIGHT_MM - MARGIN_MM;
    let mut current = doc.get_page(page).get_layer(layer);
    current.use_text(table.title.as_str(), TITLE_SIZE_PT, Mm(MARGIN_MM), Mm(top), &bold);
    draw_row(&current, &header, top - TITLE_GAP_MM, &bold);

    let mut current_page = 0;
    for (row, (page_index, y)) in rows.iter().zip(place_rows(&heights, header_height)) {
        if page_index != current_page {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            current = doc.get_page(page).get_layer(layer);
            current_page = page_index;
            draw_row(&current, &header, top, &bold);
        }
        draw_row(&current, row, y, &regular);
    }

    doc.save_to_bytes().map_err(pdf_error)
}

// =============================================================================
// XLSX
// =============================================================================

const COLUMN_WIDTHS_CHARS: [f64; 5] = [20.0, 24.0, 24.0, 26.0, 16.0];

fn render_xlsx(table: &TableDocument) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for ((col, heading), width) in (0u16..).zip(&table.columns).zip(COLUMN_WIDTHS_CHARS) {
            worksheet.write_string_with_format(0, col, *heading, &header)?;
            worksheet.set_column_width(col, width)?;
        }

        for (row_num, row) in (1u32..).zip(&table.rows) {
            for (col, cell) in (0u16..).zip(row) {
                worksheet.write_string(row_num, col, cell)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

// =============================================================================
// Sinks
// =============================================================================

/// File-save collaborator receiving finished artifacts.
pub trait ExportSink {
    /// Persist `artifact`, returning where it went.
    fn save(&mut self, artifact: &ExportArtifact) -> Result<PathBuf>;
}

/// Writes artifacts into a directory under their default file name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn save(&mut self, artifact: &ExportArtifact) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&artifact.file_name);
        write_atomic(&path, &artifact.bytes)?;
        tracing::info!(path = %path.display(), format = %artifact.format, "Export written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Group;

    fn accounts() -> Vec<Account> {
        vec![
            Account {
                id: "a".to_string(),
                name: "Account 1".to_string(),
                email: "k3j9x0qa@gmail.com".to_string(),
                username: "redfox12".to_string(),
                password: "aB3$eF6&hI9k".to_string(),
                group: Group::General,
            },
            Account {
                id: "b".to_string(),
                name: "Shop".to_string(),
                email: "zz00zz00@gmail.com".to_string(),
                username: "calmbear999".to_string(),
                password: "Qwerty!@#123".to_string(),
                group: Group::Shopping,
            },
        ]
    }

    #[test]
    fn default_file_names() {
        assert_eq!(ExportFormat::Json.default_file_name(), "disposable_accounts.json");
        assert_eq!(ExportFormat::Pdf.default_file_name(), "disposable_accounts.pdf");
        assert_eq!(ExportFormat::Xlsx.default_file_name(), "disposable_accounts.xlsx");
    }

    #[test]
    fn parse_format() {
        assert_eq!(ExportFormat::from_cli_name("PDF").unwrap(), ExportFormat::Pdf);
        assert!(matches!(
            ExportFormat::from_cli_name("csv"),
            Err(BurnerError::InvalidExportFormat(_))
        ));
    }

    #[test]
    fn table_uses_fixed_column_order() {
        let table = TableDocument::from_accounts(&accounts());
        assert_eq!(table.columns, ["Name", "Email", "Username", "Password", "Group"]);
        assert_eq!(
            table.rows[1],
            ["Shop", "zz00zz00@gmail.com", "calmbear999", "Qwerty!@#123", "Shopping"]
        );
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn json_export_is_pretty_snapshot() {
        let accounts = accounts();
        let artifact = export(&accounts, ExportFormat::Json).unwrap();
        let text = String::from_utf8(artifact.bytes).unwrap();
        assert!(text.starts_with("[\n  {"));
        let parsed: Vec<Account> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, accounts);
    }

    #[test]
    fn json_export_of_empty_store() {
        let artifact = export(&[], ExportFormat::Json).unwrap();
        assert_eq!(artifact.bytes, b"[]");
    }

    #[test]
    fn pdf_export_produces_pdf_bytes() {
        let artifact = export(&accounts(), ExportFormat::Pdf).unwrap();
        assert_eq!(artifact.file_name, "disposable_accounts.pdf");
        assert!(artifact.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn pdf_export_paginates_long_tables() {
        let many: Vec<Account> = (0..120)
            .map(|i| Account {
                id: i.to_string(),
                name: Account::default_name(i + 1),
                ..accounts()[0].clone()
            })
            .collect();
        let artifact = export(&many, ExportFormat::Pdf).unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn xlsx_export_is_zip_container() {
        let artifact = export(&accounts(), ExportFormat::Xlsx).unwrap();
        assert_eq!(artifact.file_name, "disposable_accounts.xlsx");
        assert!(artifact.bytes.starts_with(b"PK"));
    }

    fn xlsx_part(bytes: &[u8], name: &str) -> String {
        use std::io::Read;

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut part = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut part).unwrap();
        part
    }

    #[test]
    fn xlsx_export_has_named_sheet_and_header_row() {
        let artifact = export(&accounts(), ExportFormat::Xlsx).unwrap();

        let workbook = xlsx_part(&artifact.bytes, "xl/workbook.xml");
        assert!(workbook.contains(r#"<sheet name="Accounts""#), "{workbook}");

        // Strings are interned in first-use order, so the header comes first.
        let strings = xlsx_part(&artifact.bytes, "xl/sharedStrings.xml");
        let positions: Vec<usize> = ["Name", "Email", "Username", "Password", "Group"]
            .iter()
            .map(|heading| strings.find(&format!("<t>{heading}</t>")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{strings}");
        assert!(positions[4] < strings.find("<t>Account 1</t>").unwrap());
        assert!(strings.contains("<t>calmbear999</t>"));

        let sheet = xlsx_part(&artifact.bytes, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"r="E1""#));
        assert!(sheet.contains(r#"r="E3""#));
        assert!(!sheet.contains(r#"r="A4""#));
    }

    #[test]
    fn wrap_cell_breaks_at_spaces() {
        assert_eq!(wrap_cell("short", 40.0), ["short"]);
        assert_eq!(wrap_cell("", 40.0), [""]);
        assert_eq!(
            wrap_cell("My long shopping account for weekend deals", 38.0),
            ["My long shopping", "account for weekend", "deals"]
        );
    }

    #[test]
    fn wrap_cell_splits_words_wider_than_the_column() {
        let long = "x".repeat(60);
        let lines = wrap_cell(&long, 25.0);
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|line| line.chars().count() <= 14));
        assert_eq!(lines.concat(), long);
    }

    #[test]
    fn long_cells_are_laid_out_in_full() {
        let name = "Weekend grocery deals and coupon sign-ups";
        assert_eq!(name.chars().count(), 41);
        let mut account = accounts()[0].clone();
        account.name = name.to_string();
        account.group = Group::Custom("Streaming Services".to_string());
        let table = TableDocument::from_accounts(&[account]);

        let row = layout_row(&table.rows[0]);
        assert!(row[0].len() > 1);
        assert_eq!(row[0].join(" "), name);
        assert_eq!(row[4].join(" "), "Streaming Services");
        for (lines, width) in row.iter().zip(COLUMN_WIDTHS_MM) {
            #[allow(clippy::cast_precision_loss)]
            let fits = |line: &String| line.chars().count() as f32 * CHAR_WIDTH_MM <= width;
            assert!(lines.iter().all(fits));
        }
        assert!(row_height_mm(&row) > ROW_HEIGHT_MM);
    }

    #[test]
    fn rows_stay_above_the_bottom_margin() {
        let tall = ROW_HEIGHT_MM + 9.0 * LINE_HEIGHT_MM;
        let heights: Vec<f32> = (0..80)
            .map(|i| if i % 7 == 0 { tall } else { ROW_HEIGHT_MM })
            .collect();
        let placed = place_rows(&heights, ROW_HEIGHT_MM);

        for (&(_, y), &height) in placed.iter().zip(&heights) {
            let last_baseline = y - (height - ROW_HEIGHT_MM);
            assert!(last_baseline >= MARGIN_MM, "{last_baseline}");
        }
        assert_eq!(placed[0].0, 0);
        assert!(placed.last().unwrap().0 > 0);
        assert!(placed.windows(2).all(|w| w[1].0 >= w[0].0));
    }

    #[test]
    fn directory_sink_writes_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path().join("out"));
        let artifact = export(&accounts(), ExportFormat::Json).unwrap();
        let path = sink.save(&artifact).unwrap();
        assert_eq!(path, dir.path().join("out").join("disposable_accounts.json"));
        assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);
    }
}
