//! Backend worker: a thread that owns the edit session inside a tokio
//! runtime and exchanges commands/events with the UI over channels.

use std::{sync::Arc, thread};

use client_core::{
    EditSession, EditSurface, EditorProfile, EditorWidget, HttpSaveTransport, Navigator,
    SaveOutcome,
};
use crossbeam_channel::{Receiver, Sender};
use shared::error::SaveFailureKind;
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Widget handle on the worker side; the UI mirrors this buffer through
/// `Save { text }` snapshots and `Saved { text }` events.
struct BridgeWidget {
    buffer: String,
    ui_tx: Sender<UiEvent>,
}

impl EditorWidget for BridgeWidget {
    fn configure(&mut self, profile: &EditorProfile) {
        tracing::debug!(
            theme = profile.theme,
            syntax = profile.syntax,
            keybindings = profile.keybindings,
            "widget profile applied"
        );
    }

    fn set_text(&mut self, text: &str) {
        self.buffer = text.to_owned();
    }

    fn text(&self) -> String {
        self.buffer.clone()
    }

    fn focus(&mut self) {
        let _ = self.ui_tx.try_send(UiEvent::FocusEditor);
    }
}

struct BridgeSurface {
    ui_tx: Sender<UiEvent>,
}

impl EditSurface for BridgeSurface {
    fn show_view(&mut self) {
        let _ = self.ui_tx.try_send(UiEvent::ShowView);
    }

    fn show_edit(&mut self) {
        let _ = self.ui_tx.try_send(UiEvent::ShowEdit);
    }

    fn hide_edit_trigger(&mut self) {
        let _ = self.ui_tx.try_send(UiEvent::HideEditTrigger);
    }

    fn notify(&mut self, notice: SaveFailureKind) {
        let _ = self.ui_tx.try_send(UiEvent::SaveFailed { notice });
    }
}

struct BridgeNavigator {
    ui_tx: Sender<UiEvent>,
}

impl Navigator for BridgeNavigator {
    fn navigate(&mut self, target: &str) {
        let _ = self.ui_tx.try_send(UiEvent::NavigatedTo {
            target: target.to_owned(),
        });
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, server_url: Url) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let transport = match HttpSaveTransport::new(server_url) {
                Ok(transport) => Arc::new(transport),
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(format!(
                        "backend worker startup failure: {err:#}"
                    )));
                    tracing::error!("failed to build save transport: {err:#}");
                    return;
                }
            };

            let mut session: Option<EditSession> = None;
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::StartNew => {
                        tracing::info!("backend: start_new");
                        session = Some(EditSession::new_page(
                            Box::new(BridgeWidget {
                                buffer: String::new(),
                                ui_tx: ui_tx.clone(),
                            }),
                            Box::new(BridgeSurface {
                                ui_tx: ui_tx.clone(),
                            }),
                            Box::new(BridgeNavigator {
                                ui_tx: ui_tx.clone(),
                            }),
                            transport.clone(),
                        ));
                    }
                    BackendCommand::OpenPage {
                        path,
                        text,
                        open_in_editor,
                    } => {
                        tracing::info!(page = %path, open_in_editor, "backend: open_page");
                        let widget = Box::new(BridgeWidget {
                            buffer: text,
                            ui_tx: ui_tx.clone(),
                        });
                        let surface = Box::new(BridgeSurface {
                            ui_tx: ui_tx.clone(),
                        });
                        let navigator = Box::new(BridgeNavigator {
                            ui_tx: ui_tx.clone(),
                        });
                        session = Some(if open_in_editor {
                            EditSession::edit_page(path, widget, surface, navigator, transport.clone())
                        } else {
                            EditSession::view_page(path, widget, surface, navigator, transport.clone())
                        });
                    }
                    BackendCommand::BeginEdit => {
                        tracing::info!("backend: begin_edit");
                        if let Some(session) = session.as_mut() {
                            session.begin_editing();
                        }
                    }
                    BackendCommand::Save { text } => {
                        tracing::info!(text_len = text.len(), "backend: save");
                        let Some(session) = session.as_mut() else {
                            continue;
                        };
                        session.widget_mut().set_text(&text);
                        match session.save().await {
                            Ok(SaveOutcome::Saved) => {
                                let _ = ui_tx.try_send(UiEvent::Saved {
                                    text: session.document_text(),
                                });
                            }
                            // The navigator already told the UI where to go.
                            Ok(SaveOutcome::Redirected) => {}
                            // The surface already carried the classified notice.
                            Err(err) => {
                                tracing::error!("backend: save failed: {err}");
                            }
                        }
                    }
                }
            }
        });
    });
}
