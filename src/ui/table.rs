use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::loader::REQUIRED_COLUMNS;
use crate::state::AppState;
use crate::ui::metrics::format_currency;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Order details table
// ---------------------------------------------------------------------------

/// Filtered records, newest first. Rows are virtualised, so large ranges
/// only lay out what is on screen.
pub fn order_details(ui: &mut Ui, state: &AppState) {
    ui.strong(format!("🔍 Order Details ({} rows)", state.detail_rows.len()));

    let records = &state.dataset.records;
    let rows = &state.detail_rows;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for title in REQUIRED_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let r = &records[rows[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(r.order_date.format("%Y-%m-%d").to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&r.order_number);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format_currency(r.retail_price));
                });
                row.col(|ui: &mut Ui| {
                    let mut text = RichText::new(&r.cake_name);
                    if let Some(c) = state.cake_colors.color_for(&r.cake_name) {
                        text = text.color(c);
                    }
                    ui.label(text);
                });
            });
        });
}
