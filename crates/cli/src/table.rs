// CSV file -> in-memory table.
//
// The first row names the fields and doubles as their ids, so header names
// must be unique. Records are keyed by spreadsheet row number (header is
// row 1, first data row is row 2). Cell text is kept verbatim.

use std::path::Path;

use cellpreview_core::{FieldInfo, FieldKind, MemoryBase, ViewKind};

use crate::CliError;

/// View id given to the single grid view of a CSV table.
pub(crate) const GRID_VIEW_ID: &str = "grid";

pub(crate) struct CsvTable {
    pub table_id: String,
    pub base: MemoryBase,
}

impl CsvTable {
    /// Record ids paired with their spreadsheet row numbers.
    pub fn rows(&self) -> Vec<(usize, String)> {
        self.base
            .record_ids(&self.table_id)
            .into_iter()
            .enumerate()
            .map(|(i, id)| (i + 2, id.to_string()))
            .collect()
    }

    /// Resolve `--column`: a header name (case-insensitive) or a column letter.
    pub fn column(&self, spec: &str) -> Option<&FieldInfo> {
        if let Some(field) = self.base.find_field(&self.table_id, spec) {
            return Some(field);
        }
        let index = letter_to_col(spec)?;
        self.base.fields(&self.table_id).get(index)
    }
}

/// Table id for a CSV path: its file stem.
pub(crate) fn table_id_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "table".to_string())
}

pub(crate) fn load_csv(path: &Path, delimiter: char) -> Result<CsvTable, CliError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))?;
    parse_csv(&table_id_for(path), &content, delimiter)
}

pub(crate) fn parse_csv(table_id: &str, content: &str, delimiter: char) -> Result<CsvTable, CliError> {
    if !delimiter.is_ascii() {
        return Err(CliError::args(format!("delimiter must be a single ASCII character, got {delimiter:?}")));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CliError::parse(format!("CSV header: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    for (i, header) in headers.iter().enumerate() {
        if headers[..i].contains(header) {
            return Err(CliError::parse(format!("duplicate CSV header '{header}'"))
                .with_hint("rename the column so every header is unique"));
        }
    }

    let mut base = MemoryBase::new();
    base.add_table(table_id, table_id)
        .add_view(table_id, GRID_VIEW_ID, ViewKind::Grid);
    for header in &headers {
        base.add_field(table_id, header.as_str(), header.as_str(), FieldKind::SingleLineText);
    }

    for (row_idx, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| CliError::parse(format!("CSV parse error at row {}: {e}", row_idx + 2)))?;
        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()));
        base.add_record(table_id, format!("row{}", row_idx + 2), cells);
    }

    log::debug!("loaded {} rows from {}", base.record_ids(table_id).len(), table_id);
    Ok(CsvTable { table_id: table_id.to_string(), base })
}

/// Convert a column letter to a zero-based index (A -> 0, Z -> 25, AA -> 26).
pub(crate) fn letter_to_col(letters: &str) -> Option<usize> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let mut n = 0usize;
    for c in letters.chars() {
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        n = n.checked_mul(26)?.checked_add(digit)?;
    }
    Some(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellpreview_core::RecordSource;

    const LINKS: &str = "Name,Link\nTalk,https://youtu.be/KYz2wyBy3kc\nBlank,\n";

    #[test]
    fn letters() {
        assert_eq!(letter_to_col("A"), Some(0));
        assert_eq!(letter_to_col("b"), Some(1));
        assert_eq!(letter_to_col("Z"), Some(25));
        assert_eq!(letter_to_col("AA"), Some(26));
        assert_eq!(letter_to_col(""), None);
        assert_eq!(letter_to_col("A1"), None);
    }

    #[test]
    fn parses_rows_with_spreadsheet_numbers() {
        let table = parse_csv("links", LINKS, ',').unwrap();
        let rows = table.rows();
        assert_eq!(rows, vec![(2, "row2".to_string()), (3, "row3".to_string())]);
        assert_eq!(
            table.base.cell_text("links", "row2", "Link").as_deref(),
            Some("https://youtu.be/KYz2wyBy3kc")
        );
        assert_eq!(table.base.cell_text("links", "row3", "Link").as_deref(), Some(""));
    }

    #[test]
    fn column_by_name_or_letter() {
        let table = parse_csv("links", LINKS, ',').unwrap();
        assert_eq!(table.column("link").unwrap().id, "Link");
        assert_eq!(table.column("B").unwrap().id, "Link");
        assert!(table.column("C").is_none());
    }

    #[test]
    fn short_rows_leave_cells_empty() {
        let table = parse_csv("t", "A,B\nonly-a\n", ',').unwrap();
        assert_eq!(table.base.cell_text("t", "row2", "B").as_deref(), Some(""));
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let err = parse_csv("t", "Link,Link\nhttps://vimeo.com/1,plain text\n", ',')
            .err()
            .expect("duplicate headers");
        assert_eq!(err.code, crate::exit_codes::EXIT_PARSE);
        assert!(err.message.contains("duplicate CSV header 'Link'"), "{}", err.message);

        // trimmed names still collide
        assert!(parse_csv("t", "Link, Link\na,b\n", ',').is_err());
    }

    #[test]
    fn cell_text_is_not_trimmed() {
        let table = parse_csv("t", "Link\n https://youtu.be/abc \n", ',').unwrap();
        assert_eq!(table.base.cell_text("t", "row2", "Link").as_deref(), Some(" https://youtu.be/abc "));
    }

    #[test]
    fn table_id_is_file_stem() {
        assert_eq!(table_id_for(Path::new("/tmp/links.csv")), "links");
    }
}
