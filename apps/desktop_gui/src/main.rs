use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use shared::domain::PagePath;
use url::Url;

use backend_bridge::commands::BackendCommand;

/// Desktop front end for the tag-wiki page editor.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: Url,
    /// Open this existing page instead of starting a new one.
    #[arg(long)]
    page: Option<String>,
    /// Jump straight into the editor when opening an existing page.
    #[arg(long)]
    edit: bool,
    /// File with the existing page's current text.
    #[arg(long)]
    text_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded(64);
    let (ui_tx, ui_rx) = bounded(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, args.server_url.clone());

    let initial_text = match &args.text_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => String::new(),
    };

    let (page_label, initial) = match &args.page {
        Some(page) => (
            page.clone(),
            BackendCommand::OpenPage {
                path: PagePath::new(page.clone()),
                text: initial_text.clone(),
                open_in_editor: args.edit,
            },
        ),
        None => ("new page".to_string(), BackendCommand::StartNew),
    };
    cmd_tx
        .send(initial)
        .map_err(|_| anyhow!("backend worker rejected the initial command"))?;

    let app = ui::DesktopGuiApp::new(cmd_tx, ui_rx, page_label, initial_text);
    eframe::run_native(
        "Tag Wiki Editor",
        eframe::NativeOptions::default(),
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow!("gui shutdown failure: {err}"))
}
