mod app;
mod assistant;
mod catalog;
mod config;
mod event;
mod filter;
mod locale;
mod selection;
mod state;
mod store;
mod theme;

use app::GlowApp;
use assistant::AssistantClient;
use eframe::egui;
use locale::Locale;
use state::RoutineState;
use std::sync::mpsc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let data_dir = store::default_data_dir();
    let config = config::load(&data_dir)?;
    let (tx, rx) = mpsc::channel();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("glowdesk-runtime")
        .build()?;

    let assistant = runtime.block_on(async { AssistantClient::new(&config, tx.clone()) })?;
    catalog::spawn_load(runtime.handle().clone(), tx, config.catalog_url.clone());

    let (prefs, prefs_warning) = store::load_prefs(&data_dir);
    if let Some(warning) = prefs_warning {
        tracing::warn!("{warning}; falling back to default preferences");
    }

    let state = RoutineState::new(data_dir.clone());
    let app = GlowApp::new(rx, assistant, state, data_dir, Locale::from_rtl(prefs.rtl));
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1024.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Glowdesk",
        native_options,
        Box::new(move |_creation_context| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run ui: {err}"))?;

    Ok(())
}
