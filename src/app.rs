use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and dataset summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: dropdown and payload slider ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            let pie_height = ui.available_height() * 0.45;

            if let Some(pie) = &state.pie {
                plot::success_pie(ui, pie, &state.site_colors, pie_height);
            }
            ui.separator();
            if let Some(scatter) = &state.scatter {
                plot::payload_scatter(
                    ui,
                    scatter,
                    state.table.booster_categories(),
                    &state.booster_colors,
                );
            }
        });
    }
}
