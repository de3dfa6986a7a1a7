use std::{io::Read, path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    BufferWidget, EditSession, EditSurface, HttpSaveTransport, Navigator, SaveOutcome,
};
use shared::{domain::PagePath, error::SaveFailureKind};
use url::Url;

/// Save one page to a wiki server: create it at the collection root, or
/// replace the page at --path.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: Url,
    /// Address of an existing page to replace; omit to create a new page.
    #[arg(long)]
    path: Option<String>,
    /// File with the page text; read from stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
}

struct ConsoleSurface;

impl EditSurface for ConsoleSurface {
    fn show_view(&mut self) {}

    fn show_edit(&mut self) {}

    fn hide_edit_trigger(&mut self) {}

    fn notify(&mut self, notice: SaveFailureKind) {
        eprintln!("{notice}");
    }
}

struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&mut self, target: &str) {
        println!("created at {target}");
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read page text from stdin")?;
            text
        }
    };

    let transport = Arc::new(HttpSaveTransport::new(args.server_url)?);
    let widget = Box::new(BufferWidget::new(text));
    let mut session = match args.path {
        Some(path) => EditSession::edit_page(
            PagePath::new(path),
            widget,
            Box::new(ConsoleSurface),
            Box::new(ConsoleNavigator),
            transport,
        ),
        None => EditSession::new_page(
            widget,
            Box::new(ConsoleSurface),
            Box::new(ConsoleNavigator),
            transport,
        ),
    };

    match session.save().await {
        Ok(SaveOutcome::Redirected) => Ok(ExitCode::SUCCESS),
        Ok(SaveOutcome::Saved) => {
            println!("saved in place");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!("save failed: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}
