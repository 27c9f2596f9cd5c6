use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Record – one order line of the sales table
// ---------------------------------------------------------------------------

/// A single sale (one row of the source table).
///
/// Several records may share an `order_number` when an order has more than
/// one line item.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub order_date: NaiveDate,
    pub order_number: String,
    /// Non-negative, validated by the loader.
    pub retail_price: f64,
    pub cake_name: String,
}

// ---------------------------------------------------------------------------
// DateRange – inclusive calendar interval
// ---------------------------------------------------------------------------

/// Closed interval `[start, end]` of calendar dates.
///
/// Always satisfies `start <= end`: reversed bounds are swapped on
/// construction, so a range picked "backwards" selects the same days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete loaded record set
// ---------------------------------------------------------------------------

/// The parsed record set with its date bounds and load statistics.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    pub records: Vec<Record>,
    /// Earliest and latest order date, `None` for an empty set.
    pub bounds: Option<DateRange>,
    /// Data rows seen in the source, including dropped ones.
    pub rows_read: usize,
    /// Rows discarded because their order date could not be parsed.
    pub rows_dropped: usize,
}

impl SalesDataset {
    /// Build the dataset and compute its date bounds.
    pub fn from_records(records: Vec<Record>, rows_read: usize, rows_dropped: usize) -> Self {
        let bounds = records
            .iter()
            .map(|r| r.order_date)
            .fold(None, |acc: Option<DateRange>, d| match acc {
                None => Some(DateRange::new(d, d)),
                Some(r) => Some(DateRange::new(r.start().min(d), r.end().max(d))),
            });

        SalesDataset {
            records,
            bounds,
            rows_read,
            rows_dropped,
        }
    }

    /// An empty dataset, used in place of a failed load.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
