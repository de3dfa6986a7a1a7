use std::sync::Arc;

use async_trait::async_trait;
use shared::{domain::PagePath, error::SaveFailureKind};
use tracing::{info, warn};

pub mod error;
pub mod http;

pub use error::SaveError;
pub use http::HttpSaveTransport;

/// Fixed presentation profile applied to the editing widget once at
/// session construction. Not user-facing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorProfile {
    pub theme: &'static str,
    pub syntax: &'static str,
    pub keybindings: &'static str,
}

impl Default for EditorProfile {
    fn default() -> Self {
        Self {
            theme: "textmate",
            syntax: "markdown",
            keybindings: "vim",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Viewing,
    Editing,
}

/// Identity of the document a session is editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentTarget {
    /// Not yet created; saving POSTs to the collection root and the
    /// server assigns the address.
    New,
    /// Lives at a known path; saving PUTs to that path in place.
    Existing(PagePath),
}

/// Handle to the one editing widget a session owns. The widget buffer is
/// the authoritative document text while the session is `Editing`.
pub trait EditorWidget: Send {
    fn configure(&mut self, profile: &EditorProfile);
    fn set_text(&mut self, text: &str);
    fn text(&self) -> String;
    fn focus(&mut self);
}

/// Plain in-memory widget. Embedders with a real editing surface either
/// wrap it or implement `EditorWidget` themselves.
#[derive(Debug, Default)]
pub struct BufferWidget {
    buffer: String,
    profile: Option<EditorProfile>,
    focused: bool,
}

impl BufferWidget {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            buffer: text.into(),
            profile: None,
            focused: false,
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn profile(&self) -> Option<&EditorProfile> {
        self.profile.as_ref()
    }
}

impl EditorWidget for BufferWidget {
    fn configure(&mut self, profile: &EditorProfile) {
        self.profile = Some(profile.clone());
    }

    fn set_text(&mut self, text: &str) {
        self.buffer = text.to_owned();
    }

    fn text(&self) -> String {
        self.buffer.clone()
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

/// Named UI capabilities the session drives, replacing direct coupling to
/// concrete page markup. Exactly one of the view/edit panels is visible at
/// a time: showing one hides the other.
pub trait EditSurface: Send {
    fn show_view(&mut self);
    fn show_edit(&mut self);
    /// Hide the "edit" trigger control. Pages without one may no-op.
    fn hide_edit_trigger(&mut self);
    /// Blocking user-facing notification for a failed save.
    fn notify(&mut self, notice: SaveFailureKind);
}

/// Whole-page navigation, used when the server answers a create with the
/// new page's address.
pub trait Navigator: Send {
    fn navigate(&mut self, target: &str);
}

/// Server acknowledgement of a save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReceipt {
    pub redirect: Option<String>,
}

/// Write side of the document endpoint. `HttpSaveTransport` is the wire
/// implementation; tests substitute fakes.
#[async_trait]
pub trait SaveTransport: Send + Sync {
    async fn create(&self, text: &str) -> Result<SaveReceipt, SaveError>;
    async fn replace(&self, path: &PagePath, text: &str) -> Result<SaveReceipt, SaveError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Server assigned the document an address and the page navigated
    /// there. No local state transition happened.
    Redirected,
    /// Saved in place; the session is back in `Viewing`.
    Saved,
}

/// Drives the widget lifecycle and the save protocol for one page.
///
/// Saves serialize: `save` borrows the session mutably, so a second save
/// cannot start while one is awaited. Embedders drop re-triggers that
/// arrive while a save is pending.
pub struct EditSession {
    target: DocumentTarget,
    mode: EditMode,
    widget: Box<dyn EditorWidget>,
    surface: Box<dyn EditSurface>,
    navigator: Box<dyn Navigator>,
    transport: Arc<dyn SaveTransport>,
}

impl EditSession {
    /// Session for a page that does not exist yet. Starts in `Editing`
    /// with the widget focused.
    pub fn new_page(
        widget: Box<dyn EditorWidget>,
        surface: Box<dyn EditSurface>,
        navigator: Box<dyn Navigator>,
        transport: Arc<dyn SaveTransport>,
    ) -> Self {
        Self::build(DocumentTarget::New, true, widget, surface, navigator, transport)
    }

    /// Session for an existing page, opened read-first. Starts in
    /// `Viewing`; the widget is not focused until the user edits.
    pub fn view_page(
        path: PagePath,
        widget: Box<dyn EditorWidget>,
        surface: Box<dyn EditSurface>,
        navigator: Box<dyn Navigator>,
        transport: Arc<dyn SaveTransport>,
    ) -> Self {
        Self::build(
            DocumentTarget::Existing(path),
            false,
            widget,
            surface,
            navigator,
            transport,
        )
    }

    /// Session for an existing page opened straight into the editor.
    pub fn edit_page(
        path: PagePath,
        widget: Box<dyn EditorWidget>,
        surface: Box<dyn EditSurface>,
        navigator: Box<dyn Navigator>,
        transport: Arc<dyn SaveTransport>,
    ) -> Self {
        Self::build(
            DocumentTarget::Existing(path),
            true,
            widget,
            surface,
            navigator,
            transport,
        )
    }

    fn build(
        target: DocumentTarget,
        start_editing: bool,
        mut widget: Box<dyn EditorWidget>,
        mut surface: Box<dyn EditSurface>,
        navigator: Box<dyn Navigator>,
        transport: Arc<dyn SaveTransport>,
    ) -> Self {
        widget.configure(&EditorProfile::default());
        let mode = if start_editing {
            surface.show_edit();
            widget.focus();
            EditMode::Editing
        } else {
            surface.show_view();
            EditMode::Viewing
        };
        Self {
            target,
            mode,
            widget,
            surface,
            navigator,
            transport,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn target(&self) -> &DocumentTarget {
        &self.target
    }

    /// The authoritative document text: the live widget buffer.
    pub fn document_text(&self) -> String {
        self.widget.text()
    }

    pub fn widget_mut(&mut self) -> &mut dyn EditorWidget {
        self.widget.as_mut()
    }

    /// User "edit" action: switch the page to the edit panel and focus the
    /// widget. Idempotent under repeated triggers.
    pub fn begin_editing(&mut self) {
        self.mode = EditMode::Editing;
        self.surface.show_edit();
        self.surface.hide_edit_trigger();
        self.widget.focus();
    }

    /// User "save" action: send the full widget buffer, then apply the
    /// outcome. On a redirect the page navigates and nothing else changes;
    /// on an in-place save the session returns to `Viewing`; on failure
    /// the user is notified and the session stays `Editing`. The widget
    /// regains focus after every non-redirect outcome.
    pub async fn save(&mut self) -> Result<SaveOutcome, SaveError> {
        let text = self.widget.text();
        info!(mode = ?self.mode, text_len = text.len(), "save: dispatching");

        let receipt = match &self.target {
            DocumentTarget::New => self.transport.create(&text).await,
            DocumentTarget::Existing(path) => self.transport.replace(path, &text).await,
        };

        match receipt {
            Ok(SaveReceipt {
                redirect: Some(target),
            }) => {
                info!(redirect = %target, "save: accepted, navigating");
                self.navigator.navigate(&target);
                Ok(SaveOutcome::Redirected)
            }
            Ok(SaveReceipt { redirect: None }) => {
                info!("save: accepted in place");
                self.mode = EditMode::Viewing;
                self.surface.show_view();
                self.widget.focus();
                Ok(SaveOutcome::Saved)
            }
            Err(err) => {
                warn!(notice = %err.kind(), "save: failed: {err}");
                self.surface.notify(err.kind());
                self.widget.focus();
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
