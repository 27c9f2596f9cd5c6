use eframe::egui::{RichText, Ui};

use crate::data::aggregate::SalesSummary;

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

/// Placeholder for a metric with no value (e.g. top cake of an empty range).
pub const NO_VALUE: &str = "—";

/// Render the three headline metrics side by side.
pub fn metrics_row(ui: &mut Ui, summary: &SalesSummary) {
    let top_cake = summary.top_category.as_deref().unwrap_or(NO_VALUE);

    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Sales", &format_currency(summary.total_sales));
        metric(&mut cols[1], "Total Orders", &summary.total_orders.to_string());
        metric(&mut cols[2], "Top-Selling Cake", top_cake);
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

/// `1234.5` → `"$1,234.50"`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}
