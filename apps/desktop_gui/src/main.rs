//! Stream Lab desktop app.
//!
//! One screen, four buttons. Each button exercises a different reactive
//! channel contract in `stream_core`; deliveries come back over the bridge
//! and surface as toasts. `--demo <name>` runs a console demo instead of
//! opening the screen.

mod backend_bridge;
mod controller;
mod ui;

use clap::{Parser, ValueEnum};
use crossbeam_channel::bounded;
use eframe::egui;
use stream_core::demos;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{PersistedSettings, StreamLabApp, SETTINGS_STORAGE_KEY};

#[derive(Parser)]
#[command(
    name = "stream_lab",
    about = "Reactive stream and task demos behind a single screen"
)]
struct Cli {
    /// Run one console demo and exit instead of opening the screen.
    #[arg(long, value_enum)]
    demo: Option<DemoKind>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DemoKind {
    Sequential,
    Concurrent,
    Lazy,
    Contexts,
    Operators,
    Count,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Some(demo) = cli.demo {
        if let Err(err) = run_console_demo(demo) {
            tracing::error!("demo failed: {err:#}");
            std::process::exit(1);
        }
        return Ok(());
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Stream Lab")
            .with_inner_size([460.0, 560.0])
            .with_min_inner_size([380.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Stream Lab",
        options,
        Box::new(|cc| {
            let persisted_settings = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedSettings>(&text).ok())
            });
            Ok(Box::new(StreamLabApp::new(cmd_tx, ui_rx, persisted_settings)))
        }),
    )
}

fn run_console_demo(kind: DemoKind) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        match kind {
            DemoKind::Sequential => {
                demos::sequential().await;
            }
            DemoKind::Concurrent => {
                demos::concurrent().await;
            }
            DemoKind::Lazy => {
                demos::lazy().await;
            }
            DemoKind::Contexts => demos::contexts().await?,
            DemoKind::Operators => {
                demos::operators().await;
            }
            DemoKind::Count => {
                let model = stream_core::StreamLabModel::new();
                demos::count_stress(model, demos::COUNT_STRESS_WRITERS).await;
            }
        }
        Ok::<(), anyhow::Error>(())
    })
}
