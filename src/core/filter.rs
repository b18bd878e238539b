use crate::core::Record;

/// Keeps the records where any field, as lower-cased text, contains the
/// lower-cased query. An empty query keeps everything. Order is preserved.
pub fn filter_records<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    if query.is_empty() {
        return records.iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches_query(record, &needle))
        .collect()
}

/// `needle` must already be lower-cased.
pub fn matches_query(record: &Record, needle: &str) -> bool {
    record
        .values()
        .any(|value| value.to_string().to_lowercase().contains(needle))
}
