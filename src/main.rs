mod config;
mod engine;
mod error;
mod model;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::engine::chain::GenerationChain;
use crate::engine::engine::Engine;
use crate::engine::llm_client::OpenAiClient;
use crate::engine::lore_store::load_lore;
use crate::engine::retriever::LoreIndex;
use crate::error::StartupError;
use crate::model::params::GenerationParameters;
use crate::ui::app::{NexusApp, APP_NAME};
use crate::ui::settings_io::load_settings;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("narrative_nexus=info")),
        )
        .init();

    let lore_arg = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::from_env(lore_arg).context("Startup failed")?;

    let chunks = load_lore(&config.lore_path).context("Startup failed")?;
    let client = Arc::new(OpenAiClient::new(&config));
    let index = LoreIndex::build(chunks, client.as_ref())
        .map_err(StartupError::from)
        .context("Startup failed")?;
    let index = Arc::new(index);

    let settings = load_settings();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_title(APP_NAME),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let chain = GenerationChain::new(
                index,
                client.clone(),
                client,
                GenerationParameters::default(),
            );

            let repaint = cc.egui_ctx.clone();
            let (cmd_tx, resp_rx) =
                Engine::spawn(chain, Box::new(move || repaint.request_repaint()));

            Ok(Box::new(NexusApp::new(&cc.egui_ctx, settings, cmd_tx, resp_rx)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
