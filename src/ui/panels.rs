use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – date range filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📅 Filter Orders");
    ui.separator();

    let (Some(range), Some(bounds)) = (state.range, state.dataset.bounds) else {
        ui.label("No dated records loaded.");
        return;
    };

    ui.strong("Select date range");
    let mut start = range.start();
    let mut end = range.end();

    let start_changed = ui
        .horizontal(|ui: &mut Ui| {
            ui.label("From");
            ui.add(DatePickerButton::new(&mut start).id_salt("range_start"))
                .changed()
        })
        .inner;
    let end_changed = ui
        .horizontal(|ui: &mut Ui| {
            ui.label("To");
            ui.add(DatePickerButton::new(&mut end).id_salt("range_end"))
                .changed()
        })
        .inner;

    if start_changed || end_changed {
        log::debug!("date range changed to {start} – {end}");
        state.set_range(start, end);
    }

    ui.add_space(4.0);
    if ui
        .add_enabled(range != bounds, egui::Button::new("Reset range"))
        .clicked()
    {
        state.reset_range();
    }

    ui.separator();
    ui.label(format!("Data spans {bounds}"));
    ui.label(format!(
        "{} of {} records selected",
        state.summary.record_count,
        state.dataset.len()
    ));
    if state.dataset.rows_dropped > 0 {
        ui.label(
            RichText::new(format!(
                "{} rows skipped (unreadable order date)",
                state.dataset.rows_dropped
            ))
            .weak(),
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.source {
            ui.label(format!(
                "{} – {} records",
                path.display(),
                state.dataset.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_source(&path);
    }
}
