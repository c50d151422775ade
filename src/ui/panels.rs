use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::donut::donut_chart;
use crate::widgets::{WidgetKind, WidgetOutput};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let ctx = ui.ctx().clone();
    let notify = move || ctx.request_repaint();

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state, notify.clone());
                ui.close_menu();
            }
            if ui.button("Export summary…").clicked() {
                save_summary_dialog(state);
                ui.close_menu();
            }
        });

        if ui.button("Reload").clicked() {
            state.render_dashboard(notify.clone());
        }

        ui.separator();
        ui.label(format!("Data: {}", state.config.data_dir.display()));

        let pending = state.pending();
        if pending > 0 {
            ui.separator();
            ui.spinner();
            ui.label(format!("{pending} loading"));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – story callouts
// ---------------------------------------------------------------------------

/// Render the text callouts.
pub fn story_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Citibike in Manhattan");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for kind in [
                WidgetKind::StationCount,
                WidgetKind::RideTypes,
                WidgetKind::MemberTypes,
            ] {
                ui.strong(kind.title());
                match state.widget(kind) {
                    Some(output) => {
                        for line in callout_lines(kind, output) {
                            ui.label(line);
                        }
                    }
                    None => {
                        ui.spinner();
                    }
                }
                ui.add_space(8.0);
            }
        });
}

/// Text shown for a callout widget.
pub fn callout_lines(kind: WidgetKind, output: &WidgetOutput) -> Vec<String> {
    match output {
        WidgetOutput::StationCount(n) => vec![format!(
            "There are \"{n}\" Citibike stations in Manhattan. Most are located in downtown."
        )],
        WidgetOutput::RideTypes { classic, electric } => vec![
            format!("Classic Bikes: {classic}"),
            format!("Electric Bikes: {electric}"),
        ],
        WidgetOutput::MemberTypes { casual, member } => vec![
            format!("Casual Users: {casual}"),
            format!("Member Users: {member}"),
        ],
        WidgetOutput::Unavailable => vec![kind.unavailable_message().to_string()],
        WidgetOutput::Donut(entries) => entries.iter().map(|e| e.legend_label()).collect(),
    }
}

// ---------------------------------------------------------------------------
// Central panel – donut charts
// ---------------------------------------------------------------------------

/// Render the building donuts side by side.
pub fn charts_panel(ui: &mut Ui, state: &AppState) {
    let donuts: Vec<WidgetKind> = WidgetKind::ALL
        .into_iter()
        .filter(|k| k.is_donut())
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(donuts.len(), |columns| {
                for (ui, kind) in columns.iter_mut().zip(&donuts) {
                    ui.heading(kind.title());
                    match state.widget(*kind) {
                        Some(WidgetOutput::Donut(entries)) => {
                            donut_chart(ui, &format!("{kind:?}"), entries);
                        }
                        Some(_) => {
                            ui.label(
                                RichText::new(kind.unavailable_message()).color(Color32::RED),
                            );
                        }
                        None => {
                            ui.spinner();
                        }
                    }
                }
            });
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_folder_dialog<F>(state: &mut AppState, notify: F)
where
    F: Fn() + Clone + Send + 'static,
{
    let folder = rfd::FileDialog::new()
        .set_title("Open Citibike data folder")
        .set_directory(&state.config.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        state.set_data_dir(dir, notify);
    }
}

pub fn save_summary_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export dashboard summary")
        .add_filter("JSON", &["json"])
        .set_file_name("dashboard-summary.json")
        .save_file();

    if let Some(path) = file {
        match state.export_summary(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export summary: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
