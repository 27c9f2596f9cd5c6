use eframe::egui::{self, RichText};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{metrics, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalesDashboardApp {
    pub state: AppState,
}

impl SalesDashboardApp {
    /// Build the app and open the configured data source.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.open_source(&config.data_path);
        Self { state }
    }
}

impl eframe::App for SalesDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: date range ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, details ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("🎂 Custom Cake Sales Dashboard");
            if let Some(msg) = self.state.empty_message() {
                ui.label(RichText::new(msg).italics());
            }
            ui.add_space(6.0);

            metrics::metrics_row(ui, &self.state.summary);
            ui.add_space(8.0);

            ui.columns(2, |cols| {
                plot::daily_sales_plot(&mut cols[0], &self.state);
                plot::top_cakes_chart(&mut cols[1], &self.state);
            });
            ui.add_space(8.0);

            table::order_details(ui, &self.state);
        });
    }
}
