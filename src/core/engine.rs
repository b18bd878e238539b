use crate::core::columns::{ColumnRegistry, DEFAULT_COLUMNS_KEY};
use crate::core::csv_io::{self, CsvOptions, DEFAULT_EXPORT_FILENAME};
use crate::core::dataset::DatasetStore;
use crate::core::filter::filter_records;
use crate::core::paginate::{clamp_page, paginate, total_pages, DEFAULT_PAGE_SIZE};
use crate::core::sort::sort_records;
use crate::core::{
    ImportPolicy, KeyValueStore, Record, SortConfig, SortDirection, Storage, View,
};
use crate::domain::seed::seed_records;
use crate::utils::error::{Result, TableError};

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub page_size: usize,
    pub default_sort: SortConfig,
    pub csv: CsvOptions,
    pub import_policy: ImportPolicy,
    pub columns_key: String,
    pub export_filename: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_sort: SortConfig::ascending("name"),
            csv: CsvOptions::default(),
            import_policy: ImportPolicy::Preserve,
            columns_key: DEFAULT_COLUMNS_KEY.to_string(),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

/// Owns the table state: dataset, column registry, search term, sort and
/// page. Setters only update state; `view()` recomputes
/// filter → sort → paginate from scratch.
pub struct TableEngine<K: KeyValueStore> {
    dataset: DatasetStore,
    columns: ColumnRegistry<K>,
    options: EngineOptions,
    query: String,
    sort: SortConfig,
    page: usize,
}

impl<K: KeyValueStore> TableEngine<K> {
    /// Starts with the built-in seed dataset.
    pub fn new(options: EngineOptions, store: K) -> Self {
        Self::with_records(options, store, seed_records())
    }

    pub fn with_records(options: EngineOptions, store: K, records: Vec<Record>) -> Self {
        let dataset = DatasetStore::new(records);
        let columns = ColumnRegistry::load(store, options.columns_key.clone(), &dataset.column_names());
        let sort = options.default_sort.clone();

        tracing::debug!(
            "Table engine ready: {} records, {} columns",
            dataset.len(),
            columns.columns().len()
        );

        Self {
            dataset,
            columns,
            options,
            query: String::new(),
            sort,
            page: 1,
        }
    }

    pub fn view(&self) -> View {
        let filtered = filter_records(self.dataset.current(), &self.query);
        let sorted = sort_records(&filtered, &self.sort);
        let page = paginate(&sorted, self.page, self.options.page_size);

        View {
            columns: self.columns.visible_names(),
            rows: page.rows.into_iter().cloned().collect(),
            page: page.page,
            total_pages: page.total_pages,
            total_matches: page.total_records,
            sort: self.sort.clone(),
            query: self.query.clone(),
        }
    }

    /// New search term; goes back to the first page.
    pub fn search(&mut self, text: &str) {
        tracing::debug!("Search: {:?}", text);
        self.query = text.to_string();
        self.page = 1;
    }

    /// Same key while ascending flips to descending; anything else sorts
    /// ascending by `key`.
    pub fn sort(&mut self, key: &str) {
        let direction =
            if self.sort.key == key && self.sort.direction == SortDirection::Ascending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
        self.sort_by(key, direction);
    }

    pub fn sort_by(&mut self, key: &str, direction: SortDirection) {
        self.sort = SortConfig {
            key: key.to_string(),
            direction,
        };
        tracing::debug!("Sort: {:?}", self.sort);
        self.page = clamp_page(self.page, self.total_pages());
    }

    /// Returns the page actually selected after clamping.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = clamp_page(page, self.total_pages());
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> usize {
        self.set_page(self.page.saturating_sub(1))
    }

    /// Returns the new visibility of `name`.
    pub fn toggle_column(&mut self, name: &str) -> Result<bool> {
        self.columns.toggle(name).inspect_err(|e| {
            tracing::warn!("Column toggle ignored: {}", e);
        })
    }

    pub fn set_column_visibility(&mut self, name: &str, visible: bool) -> Result<()> {
        self.columns.set_visibility(name, visible).inspect_err(|e| {
            tracing::warn!("Column visibility change ignored: {}", e);
        })
    }

    /// Replaces the dataset with the parsed CSV. On any error the current
    /// dataset stays as it is.
    pub fn import_csv(&mut self, text: &str) -> Result<usize> {
        let records = csv_io::parse_csv(text, &self.options.csv).inspect_err(|e| {
            tracing::warn!("Import rejected: {}", e);
        })?;

        let count = records.len();
        self.dataset.replace(records);
        self.page = 1;

        if self.options.import_policy == ImportPolicy::Resync {
            if let Err(e) = self.columns.resync(&self.dataset.column_names()) {
                tracing::warn!("Column settings not saved after import: {}", e);
            }
        }

        tracing::info!("Imported {} records", count);
        Ok(count)
    }

    pub async fn import_file<S: Storage>(&mut self, storage: &S, path: &str) -> Result<usize> {
        tracing::info!("Importing CSV from {}", path);
        let bytes = storage.read_file(path).await?;
        let text = String::from_utf8(bytes)
            .map_err(|_| TableError::invalid_format(format!("{} is not valid UTF-8 text", path)))?;
        self.import_csv(&text)
    }

    /// Whole dataset (not the filtered view), visible columns only.
    pub fn export_csv(&self) -> Result<String> {
        csv_io::export_csv(
            self.dataset.current(),
            &self.columns,
            self.options.csv.delimiter,
        )
    }

    /// Writes the export artifact and returns its file name.
    pub async fn export_file<S: Storage>(&self, storage: &S) -> Result<String> {
        let text = self.export_csv()?;
        storage
            .write_file(&self.options.export_filename, text.as_bytes())
            .await?;
        tracing::info!(
            "Exported {} records to {}",
            self.dataset.len(),
            self.options.export_filename
        );
        Ok(self.options.export_filename.clone())
    }

    pub fn sort_indicator(&self, key: &str) -> &'static str {
        if self.sort.key != key {
            return "↕";
        }
        match self.sort.direction {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }

    pub fn dataset(&self) -> &DatasetStore {
        &self.dataset
    }

    pub fn columns(&self) -> &ColumnRegistry<K> {
        &self.columns
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort_config(&self) -> &SortConfig {
        &self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    fn total_pages(&self) -> usize {
        let matches = filter_records(self.dataset.current(), &self.query).len();
        total_pages(matches, self.options.page_size)
    }
}

/// Column header as shown to users: first letter upper-cased.
pub fn header_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
