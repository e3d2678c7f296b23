use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use country_clusters::data::filter::region_labels;

use crate::color::cluster_color;
use crate::state::{AppState, ColorBy, MAX_CLUSTERS};

// ---------------------------------------------------------------------------
// Left side panel – clustering controls, region filters, summary
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Clusters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.add(egui::Slider::new(&mut state.n_clusters, 1..=MAX_CLUSTERS).text("k"));
        if ui.button("Re-cluster").clicked() {
            state.recluster();
        }
    });
    ui.separator();

    // Clone what we need so we can mutate state inside the loop.
    let regions = state
        .clustering
        .as_ref()
        .map(|r| region_labels(&r.countries))
        .unwrap_or_default();
    let summary = state.summary.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Colour-by selector ----
            ui.strong("Color by");
            egui::ComboBox::from_id_salt("color_by")
                .selected_text(state.color_by.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for mode in ColorBy::ALL {
                        ui.selectable_value(&mut state.color_by, mode, mode.label());
                    }
                });
            ui.separator();

            // ---- Region filter ----
            let header_text = format!("Regions  ({}/{})", state.filters.len(), regions.len());
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("regions")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_none();
                        }
                    });

                    for region in &regions {
                        let mut text = RichText::new(region);
                        if state.color_by == ColorBy::Region {
                            if let Some(cm) = &state.region_colors {
                                text = text.color(cm.color_for(region));
                            }
                        }

                        let mut checked = state.filters.contains(region);
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_region(region);
                        }
                    }
                });
            ui.separator();

            // ---- Summary ----
            let Some(summary) = summary else {
                return;
            };
            ui.strong("Summary");
            for group in &summary.groups {
                let (shown, rest) = group.preview();
                let title = format!("{} ({} countries)", group.label(), group.names.len());
                ui.label(RichText::new(title).strong().color(cluster_color(group.id)));
                for name in shown {
                    ui.label(format!("  - {name}"));
                }
                if rest > 0 {
                    ui.label(RichText::new(format!("  ... and {rest} more")).weak());
                }
                ui.add_space(4.0);
            }
        });
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
            let can_export = state.clustering.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export assignments…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let clustered = state.clustering.as_ref().map_or(0, |r| r.len());
            ui.label(format!(
                "{} countries in {} regions, {} clustered, {} visible",
                ds.len(),
                ds.regions.len(),
                clustered,
                state.visible_indices.len()
            ));
        }

        if let Some(source) = &state.source {
            ui.separator();
            ui.label(RichText::new(source.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open country data")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_file(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export cluster assignments")
        .add_filter("CSV", &["csv"])
        .set_file_name("cluster_assignments.csv")
        .save_file();

    if let Some(path) = file {
        match state.export_assignments(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
