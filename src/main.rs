mod app;
mod color;
mod state;
mod ui;

use app::CountryClustersApp;
use eframe::egui;
use state::AppState;

use country_clusters::PipelineConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = PipelineConfig::load().unwrap_or_else(|e| {
        log::error!("Ignoring configuration: {e}");
        PipelineConfig::default()
    });

    let mut state = AppState::new(config);
    let initial = state.config.adjusted_path.clone();
    if initial.exists() {
        match state.load_file(&initial) {
            Ok(()) => {
                if let Some(summary) = &state.summary {
                    println!("✓ Clustering complete");
                    print!("{summary}");
                }
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", initial.display());
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    } else {
        log::info!("{} not found, waiting for File → Open…", initial.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Country Clusters – Population Density vs Gini Index",
        options,
        Box::new(|_cc| Ok(Box::new(CountryClustersApp::new(state)))),
    )
}
