use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;

use super::model::Record;

// ---------------------------------------------------------------------------
// Aggregates over a record sequence
// ---------------------------------------------------------------------------
//
// All functions are pure and accept any iterator of `&Record`, so they work
// on the whole dataset as well as on a filtered view.

/// Sum of retail prices; `0.0` for no records.
pub fn total_sales<'a>(records: impl IntoIterator<Item = &'a Record>) -> f64 {
    records.into_iter().map(|r| r.retail_price).sum()
}

/// Number of distinct order numbers. Blank order numbers are not counted.
pub fn total_orders<'a>(records: impl IntoIterator<Item = &'a Record>) -> usize {
    records
        .into_iter()
        .map(|r| r.order_number.as_str())
        .filter(|n| !n.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

/// The most frequent cake name, or `None` when there are no records.
///
/// Ties go to the name seen first.
pub fn top_category<'a>(records: impl IntoIterator<Item = &'a Record>) -> Option<String> {
    category_counts(records).into_iter().next().map(|(name, _)| name)
}

/// Retail price summed per order date, ascending by date.
pub fn daily_sales<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<(NaiveDate, f64)> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in records {
        *by_day.entry(r.order_date).or_insert(0.0) += r.retail_price;
    }
    by_day.into_iter().collect()
}

/// The `n` most frequent cake names with their counts, most frequent first.
///
/// Equal counts keep first-occurrence order.
pub fn top_n_categories<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    n: usize,
) -> Vec<(String, usize)> {
    let mut counts = category_counts(records);
    counts.truncate(n);
    counts
}

/// Every non-blank cake name with its count, descending by count, ties in
/// first-occurrence order.
fn category_counts<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<(String, usize)> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for r in records {
        let name = r.cake_name.as_str();
        if name.is_empty() {
            continue;
        }
        match position.get(name) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(name, counts.len());
                counts.push((name, 1));
            }
        }
    }

    // Stable sort: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

// ---------------------------------------------------------------------------
// SalesSummary – everything the dashboard shows for one date range
// ---------------------------------------------------------------------------

/// All aggregates for one filtered view, computed in one go per interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesSummary {
    pub record_count: usize,
    pub total_sales: f64,
    pub total_orders: usize,
    /// `None` for an empty view; callers must render a placeholder.
    pub top_category: Option<String>,
    pub daily_sales: Vec<(NaiveDate, f64)>,
    pub top_categories: Vec<(String, usize)>,
}

impl SalesSummary {
    pub fn compute<'a>(records: impl IntoIterator<Item = &'a Record>, top_n: usize) -> Self {
        let records: Vec<&Record> = records.into_iter().collect();
        let top_categories = top_n_categories(records.iter().copied(), top_n);

        Self {
            record_count: records.len(),
            total_sales: total_sales(records.iter().copied()),
            total_orders: total_orders(records.iter().copied()),
            top_category: top_category(records.iter().copied()),
            daily_sales: daily_sales(records.iter().copied()),
            top_categories,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter_by_range;
    use crate::data::model::{DateRange, SalesDataset};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(day: u32, order: &str, cake: &str, price: f64) -> Record {
        Record {
            order_date: date(2024, 1, day),
            order_number: order.to_string(),
            retail_price: price,
            cake_name: cake.to_string(),
        }
    }

    /// Three line items, two orders.
    fn scenario() -> Vec<Record> {
        vec![
            rec(1, "1001", "A", 10.0),
            rec(1, "1002", "B", 5.0),
            rec(2, "1001", "A", 7.0),
        ]
    }

    #[test]
    fn scenario_aggregates() {
        let records = scenario();
        assert_eq!(total_sales(&records), 22.0);
        assert_eq!(total_orders(&records), 2);
        assert_eq!(top_category(&records).as_deref(), Some("A"));
        assert_eq!(
            daily_sales(&records),
            vec![(date(2024, 1, 1), 15.0), (date(2024, 1, 2), 7.0)]
        );
        assert_eq!(
            top_n_categories(&records, 10),
            vec![("A".to_string(), 2), ("B".to_string(), 1)]
        );
    }

    #[test]
    fn empty_input_yields_zero_and_none() {
        let records: Vec<Record> = Vec::new();
        assert_eq!(total_sales(&records), 0.0);
        assert_eq!(total_orders(&records), 0);
        assert_eq!(top_category(&records), None);
        assert!(daily_sales(&records).is_empty());
        assert!(top_n_categories(&records, 10).is_empty());

        let summary = SalesSummary::compute(&records, 10);
        assert!(summary.is_empty());
        assert_eq!(summary, SalesSummary::default());
    }

    #[test]
    fn ties_go_to_first_seen_category() {
        let records = vec![
            rec(1, "1", "Lemon", 1.0),
            rec(1, "2", "Carrot", 1.0),
            rec(2, "3", "Carrot", 1.0),
            rec(2, "4", "Lemon", 1.0),
            rec(3, "5", "Red Velvet", 1.0),
        ];
        assert_eq!(top_category(&records).as_deref(), Some("Lemon"));
        assert_eq!(
            top_n_categories(&records, 3),
            vec![
                ("Lemon".to_string(), 2),
                ("Carrot".to_string(), 2),
                ("Red Velvet".to_string(), 1),
            ]
        );
    }

    #[test]
    fn top_n_is_bounded_and_non_increasing() {
        let cakes = ["A", "B", "B", "C", "C", "C", "D", "E", "E", "F"];
        let records: Vec<Record> = cakes
            .iter()
            .enumerate()
            .map(|(i, cake)| rec(1 + i as u32, &i.to_string(), cake, 1.0))
            .collect();

        for n in 0..8 {
            let top = top_n_categories(&records, n);
            assert!(top.len() <= n);
            assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
        }
        assert_eq!(top_n_categories(&records, 1), vec![("C".to_string(), 3)]);
    }

    #[test]
    fn daily_sales_dates_strictly_increase() {
        let records = vec![
            rec(9, "1", "A", 1.0),
            rec(2, "2", "A", 2.0),
            rec(9, "3", "A", 3.0),
            rec(5, "4", "A", 4.0),
            rec(2, "5", "A", 5.0),
        ];
        let daily = daily_sales(&records);
        assert!(daily.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(
            daily,
            vec![
                (date(2024, 1, 2), 7.0),
                (date(2024, 1, 5), 4.0),
                (date(2024, 1, 9), 4.0),
            ]
        );
    }

    #[test]
    fn blank_identifiers_are_not_counted() {
        let records = vec![rec(1, "", "", 3.0), rec(1, "7", "", 2.0)];
        assert_eq!(total_orders(&records), 1);
        assert_eq!(top_category(&records), None);
        assert_eq!(total_sales(&records), 5.0);
    }

    #[test]
    fn full_range_filter_preserves_total_sales() {
        let records = scenario();
        let ds = SalesDataset::from_records(records.clone(), 3, 0);
        let full = ds.bounds.unwrap();
        assert_eq!(
            total_sales(filter_by_range(&records, full)),
            total_sales(&records)
        );

        let day_two = DateRange::new(date(2024, 1, 2), date(2024, 1, 2));
        let summary = SalesSummary::compute(filter_by_range(&records, day_two), 10);
        assert_eq!(summary.record_count, 1);
        assert_eq!(summary.total_sales, 7.0);
        assert_eq!(summary.total_orders, 1);
        assert_eq!(summary.top_category.as_deref(), Some("A"));
    }
}
