use std::collections::BTreeMap;

use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};

use country_clusters::data::filter::region_label;

use crate::state::{AppState, ColorBy};

/// How many countries get a name label next to their point.
const ANNOTATED: usize = 10;

// ---------------------------------------------------------------------------
// Cluster scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render population density vs Gini index, one series per cluster (or
/// region), with the centroids on top.
pub fn cluster_plot(ui: &mut Ui, state: &AppState) {
    let Some(result) = &state.clustering else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let text = if state.dataset.is_some() {
                "Nothing to plot (see the error above)"
            } else {
                "Open a file to view clusters  (File → Open…)"
            };
            ui.heading(text);
        });
        return;
    };

    // Group the visible rows into legend series.
    let mut series: BTreeMap<(usize, String), (Vec<[f64; 2]>, Color32)> = BTreeMap::new();
    for &idx in &state.visible_indices {
        let key = match state.color_by {
            ColorBy::Cluster => {
                let label = result.labels[idx];
                (label, format!("Cluster {}", label + 1))
            }
            ColorBy::Region => (0, region_label(&result.countries[idx]).to_string()),
        };
        series
            .entry(key)
            .or_insert_with(|| (Vec::new(), state.color_for(idx)))
            .0
            .push(result.features[idx]);
    }

    Plot::new("cluster_plot")
        .legend(Legend::default())
        .x_axis_label("Population Density (hab/km²)")
        .y_axis_label("Gini Index")
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for ((_, name), (points, color)) in series {
                plot_ui.points(
                    Points::new(points.into_iter().collect::<PlotPoints>())
                        .name(&name)
                        .color(color.gamma_multiply(0.6))
                        .filled(true)
                        .radius(5.0),
                );
            }

            let centroids: PlotPoints = result.centroids.iter().copied().collect();
            plot_ui.points(
                Points::new(centroids)
                    .name("Centroids")
                    .shape(MarkerShape::Cross)
                    .color(Color32::BLACK)
                    .radius(12.0),
            );

            for &idx in state.visible_indices.iter().filter(|&&i| i < ANNOTATED) {
                let [x, y] = result.features[idx];
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(&result.names[idx]).size(10.0),
                    )
                    .anchor(Align2::LEFT_BOTTOM)
                    .color(Color32::from_gray(90)),
                );
            }
        });
}
