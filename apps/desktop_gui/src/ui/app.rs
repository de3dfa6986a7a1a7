//! App shell: mutually exclusive view/edit panels, Edit/Save controls,
//! and the blocking failure banner.

use std::time::Duration;

use client_core::EditorProfile;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::PagePath;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelMode {
    View,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    page_label: String,
    profile: EditorProfile,
    panel: PanelMode,
    buffer: String,
    view_text: String,
    edit_trigger_visible: bool,
    save_in_flight: bool,
    focus_editor: bool,
    banner: Option<StatusBanner>,
    status: String,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        page_label: String,
        initial_text: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            page_label,
            profile: EditorProfile::default(),
            panel: PanelMode::View,
            buffer: initial_text.clone(),
            view_text: initial_text,
            edit_trigger_visible: true,
            save_in_flight: false,
            focus_editor: false,
            banner: None,
            status: String::new(),
        }
    }

    fn drain_backend_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::ShowView => {
                    self.panel = PanelMode::View;
                    self.edit_trigger_visible = true;
                }
                UiEvent::ShowEdit => self.panel = PanelMode::Edit,
                UiEvent::HideEditTrigger => self.edit_trigger_visible = false,
                UiEvent::FocusEditor => self.focus_editor = true,
                UiEvent::Saved { text } => {
                    self.save_in_flight = false;
                    self.view_text = text;
                    self.status = "Saved".to_string();
                }
                UiEvent::NavigatedTo { target } => {
                    self.save_in_flight = false;
                    self.status = format!("Created at {target}");
                    self.page_label = target.clone();
                    // Reopen the session at its new address, the desktop
                    // analog of following the redirect.
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::OpenPage {
                            path: PagePath::new(target),
                            text: self.buffer.clone(),
                            open_in_editor: false,
                        },
                        &mut self.status,
                    );
                }
                UiEvent::SaveFailed { notice } => {
                    self.save_in_flight = false;
                    self.banner = Some(StatusBanner {
                        severity: StatusBannerSeverity::Error,
                        message: notice.to_string(),
                    });
                }
                UiEvent::Error(message) => {
                    self.save_in_flight = false;
                    self.banner = Some(StatusBanner {
                        severity: StatusBannerSeverity::Error,
                        message,
                    });
                }
            }
        }
    }
}

fn banner_color(severity: StatusBannerSeverity) -> egui::Color32 {
    match severity {
        StatusBannerSeverity::Error => egui::Color32::LIGHT_RED,
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_backend_events();
        // Backend events arrive without user input; keep draining.
        ctx.request_repaint_after(Duration::from_millis(150));

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.page_label);
                ui.label(format!(
                    "{} · {}",
                    self.profile.syntax, self.profile.keybindings
                ));
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        if let Some(banner) = self.banner.clone() {
            egui::Window::new("Save failed")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.colored_label(banner_color(banner.severity), &banner.message);
                    if ui.button("OK").clicked() {
                        self.banner = None;
                    }
                });
        }

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.horizontal(|ui| match self.panel {
                PanelMode::View => {
                    if self.edit_trigger_visible && ui.button("Edit").clicked() {
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::BeginEdit,
                            &mut self.status,
                        );
                    }
                }
                PanelMode::Edit => {
                    let save = ui.add_enabled(!self.save_in_flight, egui::Button::new("Save"));
                    if save.clicked() {
                        self.save_in_flight = true;
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::Save {
                                text: self.buffer.clone(),
                            },
                            &mut self.status,
                        );
                    }
                    if self.save_in_flight {
                        ui.spinner();
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let blocked = self.banner.is_some();
            ui.add_enabled_ui(!blocked, |ui| match self.panel {
                PanelMode::View => {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.monospace(&self.view_text);
                    });
                }
                PanelMode::Edit => {
                    let editor = ui.add_sized(
                        ui.available_size(),
                        egui::TextEdit::multiline(&mut self.buffer).code_editor(),
                    );
                    if self.focus_editor {
                        editor.request_focus();
                        self.focus_editor = false;
                    }
                }
            });
        });
    }
}
