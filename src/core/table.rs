use crate::domain::model::InputRow;
use crate::utils::error::Result;
use std::borrow::Cow;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct TableOptions {
    pub delimiter: u8,
    pub has_headers: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: false,
        }
    }
}

/// Parses the whole table, keeping rows in file order. Bytes that are not
/// UTF-8 are replaced rather than failing the table. Lines holding nothing but
/// whitespace are skipped and do not consume an index; rows of empty delimited
/// fields are kept so they are reported.
pub fn parse_rows(content: &[u8], options: TableOptions) -> Result<Vec<InputRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .from_reader(content);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        let fields: Vec<Cow<'_, str>> = record.iter().map(String::from_utf8_lossy).collect();
        if let [only] = fields.as_slice() {
            if only.trim().is_empty() {
                continue;
            }
        }
        rows.push(InputRow::from_fields(
            rows.len(),
            fields.iter().map(|field| &**field),
        ));
    }

    Ok(rows)
}

pub async fn read_rows<P: AsRef<Path>>(path: P, options: TableOptions) -> Result<Vec<InputRow>> {
    let content = tokio::fs::read(path.as_ref()).await?;
    tracing::debug!(
        "Read {} bytes from {}",
        content.len(),
        path.as_ref().display()
    );
    parse_rows(&content, options)
}
