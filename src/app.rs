use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    /// Kicks off every widget job before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        let ctx = cc.egui_ctx.clone();
        state.render_dashboard(move || ctx.request_repaint());
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_results();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: story callouts ----
        egui::SidePanel::left("story_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::story_panel(ui, &self.state);
            });

        // ---- Central panel: donut charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::charts_panel(ui, &self.state);
        });
    }
}
