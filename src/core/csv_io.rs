use crate::core::{FieldValue, KeyValueStore, Record};
use crate::core::columns::ColumnRegistry;
use crate::utils::error::{Result, TableError};

pub const DEFAULT_REQUIRED_FIELD: &str = "name";
pub const DEFAULT_EXPORT_FILENAME: &str = "table_export.csv";

#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub infer_integers: bool,
    pub required_field: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            infer_integers: true,
            required_field: DEFAULT_REQUIRED_FIELD.to_string(),
        }
    }
}

/// Parses CSV text (header row + data rows) into records.
///
/// Blank lines are skipped, a row of empty cells is kept as a record of
/// empty strings. Short rows leave the trailing fields absent and cells
/// past the header are dropped. The first record must carry a
/// non-empty `required_field`, otherwise the whole import is rejected.
pub fn parse_csv(text: &str, options: &CsvOptions) -> Result<Vec<Record>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    tracing::debug!("CSV header: {:?}", headers);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = Record::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            record.insert(header, infer_value(cell, options.infer_integers));
        }
        records.push(record);
    }

    validate_first_record(&records, &options.required_field)?;

    tracing::debug!("Parsed {} CSV records", records.len());
    Ok(records)
}

fn validate_first_record(records: &[Record], required_field: &str) -> Result<()> {
    let first = records
        .first()
        .ok_or_else(|| TableError::invalid_format("no data rows found"))?;

    match first.get(required_field) {
        Some(value) if !value.is_empty() => Ok(()),
        _ => Err(TableError::invalid_format(format!(
            "first record has no '{}' value",
            required_field
        ))),
    }
}

// 只有在重新格式化後與原文相同時才視為整數，"007" 與 "+5" 保持文字
fn infer_value(cell: &str, infer_integers: bool) -> FieldValue {
    if infer_integers {
        if let Ok(n) = cell.parse::<i64>() {
            if n.to_string() == cell {
                return FieldValue::Integer(n);
            }
        }
    }
    FieldValue::Text(cell.to_string())
}

/// Serializes `records` projected onto `columns`, header row first.
/// Missing fields are written empty. No columns means no output.
pub fn write_csv(records: &[Record], columns: &[String], delimiter: u8) -> Result<String> {
    if columns.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns)?;
    for record in records {
        writer.write_record(columns.iter().map(|column| {
            record
                .get(column)
                .map(|value| value.to_string())
                .unwrap_or_default()
        }))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TableError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| TableError::invalid_format(e.to_string()))
}

/// Export of the visible columns, in registry order.
pub fn export_csv<K: KeyValueStore>(
    records: &[Record],
    registry: &ColumnRegistry<K>,
    delimiter: u8,
) -> Result<String> {
    write_csv(records, &registry.visible_names(), delimiter)
}
