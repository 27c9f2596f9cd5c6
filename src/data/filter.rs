use super::model::{DateRange, Record, SalesDataset};

// ---------------------------------------------------------------------------
// Date-range filter
// ---------------------------------------------------------------------------

/// Records whose order date lies in `range` (inclusive), in input order.
///
/// A range outside every record yields an empty result, not an error.
pub fn filter_by_range<'a>(records: &'a [Record], range: DateRange) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| range.contains(r.order_date))
        .collect()
}

/// Indices into `dataset.records` of the records inside `range`.
///
/// Same selection as [`filter_by_range`], in a form that can be stored
/// alongside the dataset without borrowing it.
pub fn filtered_indices(dataset: &SalesDataset, range: DateRange) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| range.contains(r.order_date))
        .map(|(i, _)| i)
        .collect()
}
