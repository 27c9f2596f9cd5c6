use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

use crate::state::AppState;
use crate::ui::metrics::format_currency;

const CHART_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Date <-> plot axis
// ---------------------------------------------------------------------------

/// Dates are plotted as day numbers so one grid unit is one day.
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Inverse of [`date_to_x`]; fractional days round to the nearest day.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

fn date_label(x: f64) -> String {
    x_to_date(x)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Daily sales trend (line chart)
// ---------------------------------------------------------------------------

/// Line chart of summed retail price per day, with a marker on each day.
pub fn daily_sales_plot(ui: &mut Ui, state: &AppState) {
    ui.strong("📈 Sales Trend");

    let series: Vec<[f64; 2]> = state
        .summary
        .daily_sales
        .iter()
        .map(|&(day, total)| [date_to_x(day), total])
        .collect();

    Plot::new("daily_sales_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Order date")
        .y_axis_label("Retail price")
        .x_axis_formatter(|mark: GridMark, _range| date_label(mark.value))
        .label_formatter(|_name, point| {
            format!("{}\n{}", date_label(point.x), format_currency(point.y))
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let color = Color32::from_rgb(0x3b, 0x82, 0xf6);
            plot_ui.line(
                Line::new(PlotPoints::from(series.clone()))
                    .name("Daily sales")
                    .color(color)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(series))
                    .name("Daily sales")
                    .color(color)
                    .radius(3.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Top cakes (horizontal bar chart)
// ---------------------------------------------------------------------------

/// Horizontal bars of order-line counts for the top-ranked cakes, best first
/// at the top.
pub fn top_cakes_chart(ui: &mut Ui, state: &AppState) {
    let top = &state.summary.top_categories;
    ui.strong(format!("🎂 Top {} Cakes by Orders", state.top_n));

    // Bar i sits at y = n-1-i so the best seller is drawn on top.
    let n = top.len();
    let bars: Vec<Bar> = top
        .iter()
        .enumerate()
        .map(|(i, (name, count))| {
            let fill = state
                .cake_colors
                .color_for(name)
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new((n - 1 - i) as f64, *count as f64)
                .name(name)
                .fill(fill)
                .width(0.7)
        })
        .collect();

    let labels: Vec<String> = top.iter().rev().map(|(name, _)| name.clone()).collect();

    Plot::new("top_cakes_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Orders")
        .y_axis_formatter(move |mark: GridMark, _range| {
            let v = mark.value;
            if v < 0.0 || v.fract() != 0.0 {
                return String::new();
            }
            labels.get(v as usize).cloned().unwrap_or_default()
        })
        .show_grid([true, false])
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Orders"));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_axis_round_trips_dates() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(x_to_date(date_to_x(d)), Some(d));
        assert_eq!(x_to_date(date_to_x(d) + 0.4), Some(d));
        assert_eq!(x_to_date(f64::NAN), None);
        assert_eq!(x_to_date(1e12), None);
    }

    #[test]
    fn consecutive_days_are_one_unit_apart() {
        let a = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(date_to_x(b) - date_to_x(a), 1.0);
    }
}
