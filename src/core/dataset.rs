use crate::core::Record;

/// The working dataset. Only ever replaced as a whole.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    records: Vec<Record>,
}

impl DatasetStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn replace(&mut self, records: Vec<Record>) {
        tracing::debug!(
            "Replacing dataset: {} -> {} records",
            self.records.len(),
            records.len()
        );
        self.records = records;
    }

    pub fn current(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Union of all field names, in the order they are first seen.
    pub fn column_names(&self) -> Vec<String> {
        column_names_of(&self.records)
    }
}

pub fn column_names_of(records: &[Record]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !names.iter().any(|n| n == key) {
                names.push(key.to_string());
            }
        }
    }
    names
}
