use eframe::egui;

use crate::data::model::PassengerTable;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// The dashboard shell: filter sidebar, summary column, main charts, and the
/// detail column, mirroring the original three-column layout.
pub struct TitanicDashApp {
    pub state: AppState,
}

impl TitanicDashApp {
    pub fn new(table: PassengerTable) -> Self {
        Self {
            state: AppState::new(table),
        }
    }
}

impl eframe::App for TitanicDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title + row counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::filter_panel(ui, &mut self.state);
            });

        // ---- Summary column: metric cards ----
        egui::SidePanel::left("summary_panel")
            .default_width(180.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::summary_panel(ui, &self.state);
            });

        // ---- Detail column: port chart + insights ----
        egui::SidePanel::right("detail_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::detail_panel(ui, &self.state);
            });

        // ---- Central panel: heatmap + histogram ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::main_charts(ui, &self.state);
        });
    }
}
