use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::CakeColors;
use crate::config::DashboardConfig;
use crate::data::aggregate::SalesSummary;
use crate::data::cache::DatasetCache;
use crate::data::filter::{filter_by_range, filtered_indices};
use crate::data::model::{DateRange, SalesDataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded datasets, keyed by source identity.
    cache: DatasetCache,

    /// Source of the current dataset (None until something is opened).
    pub source: Option<PathBuf>,

    /// Current dataset; empty after a failed load.
    pub dataset: Arc<SalesDataset>,

    /// Selected date range. None while the dataset has no dates.
    pub range: Option<DateRange>,

    /// Aggregates of the records inside `range` (cached per interaction).
    pub summary: SalesSummary,

    /// Indices of the records inside `range`, newest first, for the table.
    pub detail_rows: Vec<usize>,

    /// Colours of the ranked cakes in `summary.top_categories`.
    pub cake_colors: CakeColors,

    /// How many cakes the bar chart shows.
    pub top_n: usize,

    /// Load error shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            cache: DatasetCache::new(),
            source: None,
            dataset: Arc::new(SalesDataset::empty()),
            range: None,
            summary: SalesSummary::default(),
            detail_rows: Vec::new(),
            cake_colors: CakeColors::default(),
            top_n: config.top_n,
            status_message: None,
        }
    }

    /// Load (or fetch from cache) the dataset at `path` and make it current.
    ///
    /// On failure the view continues with an empty dataset and a warning.
    pub fn open_source(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
        match self.cache.get_or_load(path) {
            Ok(dataset) => {
                self.status_message = None;
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("⚠ Failed to load data: {e}"));
                self.set_dataset(Arc::new(SalesDataset::empty()));
            }
        }
    }

    /// Forget the cached copy of the current source and read it again.
    pub fn reload(&mut self) {
        if let Some(path) = self.source.clone() {
            self.cache.invalidate(&path);
            self.open_source(&path);
        }
    }

    /// Ingest a dataset and select its full date range.
    pub fn set_dataset(&mut self, dataset: Arc<SalesDataset>) {
        self.range = dataset.bounds;
        self.dataset = dataset;
        self.refilter();
    }

    /// Select `[a, b]`; reversed bounds are swapped.
    pub fn set_range(&mut self, a: NaiveDate, b: NaiveDate) {
        self.range = Some(DateRange::new(a, b));
        self.refilter();
    }

    /// Go back to the dataset's full date range.
    pub fn reset_range(&mut self) {
        self.range = self.dataset.bounds;
        self.refilter();
    }

    /// Recompute `summary` and `detail_rows` after a range or data change.
    pub fn refilter(&mut self) {
        let Some(range) = self.range else {
            self.summary = SalesSummary::default();
            self.detail_rows.clear();
            self.cake_colors = CakeColors::default();
            return;
        };

        let records = &self.dataset.records;
        self.summary = SalesSummary::compute(filter_by_range(records, range), self.top_n);
        self.cake_colors =
            CakeColors::new(self.summary.top_categories.iter().map(|(name, _)| name.as_str()));

        let mut rows = filtered_indices(&self.dataset, range);
        // Stable: same-day records keep file order.
        rows.sort_by(|&a, &b| records[b].order_date.cmp(&records[a].order_date));
        self.detail_rows = rows;
    }

    /// Informational message when there is nothing to show.
    pub fn empty_message(&self) -> Option<&'static str> {
        if self.dataset.is_empty() {
            Some("No sales data loaded.")
        } else if self.summary.is_empty() {
            Some("No orders in the selected date range.")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state() -> AppState {
        AppState::new(&DashboardConfig::default())
    }

    fn write_sales(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("sales.csv");
        fs::write(
            &path,
            "OrderDate,FSOrderNumber,RetailPrice,CakeName\n\
             2024-01-01,1001,10,A\n\
             2024-01-03,1002,4,B\n\
             not-a-date,1003,1,C\n\
             2024-01-01,1002,5,B\n\
             2024-01-02,1001,7,A\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn opening_selects_full_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state();
        st.open_source(&write_sales(&dir));

        assert_eq!(st.status_message, None);
        assert_eq!(st.dataset.len(), 4);
        assert_eq!(st.range, Some(DateRange::new(date(2024, 1, 1), date(2024, 1, 3))));
        assert_eq!(st.summary.total_sales, 26.0);
        assert_eq!(st.summary.total_orders, 2);
        assert_eq!(st.empty_message(), None);
    }

    #[test]
    fn detail_rows_are_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state();
        st.open_source(&write_sales(&dir));

        let dates: Vec<NaiveDate> = st
            .detail_rows
            .iter()
            .map(|&i| st.dataset.records[i].order_date)
            .collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 3), date(2024, 1, 2), date(2024, 1, 1), date(2024, 1, 1)]
        );
        // Ties keep file order.
        assert_eq!(st.detail_rows[2..], [0, 2]);
    }

    #[test]
    fn narrowing_and_resetting_the_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state();
        st.open_source(&write_sales(&dir));

        st.set_range(date(2024, 1, 2), date(2024, 1, 1));
        assert_eq!(st.summary.record_count, 3);
        assert_eq!(st.summary.total_sales, 22.0);

        st.set_range(date(2023, 1, 1), date(2023, 12, 31));
        assert!(st.summary.is_empty());
        assert!(st.detail_rows.is_empty());
        assert_eq!(st.summary.top_category, None);
        assert_eq!(st.empty_message(), Some("No orders in the selected date range."));

        st.reset_range();
        assert_eq!(st.summary.record_count, 4);
    }

    #[test]
    fn failed_load_shows_warning_and_empty_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state();
        st.open_source(&dir.path().join("missing.csv"));

        assert!(st.status_message.is_some());
        assert!(st.dataset.is_empty());
        assert_eq!(st.range, None);
        assert!(st.summary.is_empty());
        assert_eq!(st.empty_message(), Some("No sales data loaded."));
    }

    #[test]
    fn reload_picks_up_new_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sales(&dir);
        let mut st = state();
        st.open_source(&path);

        let mut contents = fs::read_to_string(&path).unwrap();
        contents.push_str("2024-02-01,1009,3,C\n");
        fs::write(&path, contents).unwrap();

        st.reload();
        assert_eq!(st.dataset.len(), 5);
        assert_eq!(st.range.map(|r| r.end()), Some(date(2024, 2, 1)));
    }
}
