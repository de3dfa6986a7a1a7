//! Backend commands queued from UI to the backend worker.

use shared::domain::PagePath;

pub enum BackendCommand {
    /// Start a session for a page that does not exist yet.
    StartNew,
    /// Start a session for an existing page with its current text.
    OpenPage {
        path: PagePath,
        text: String,
        open_in_editor: bool,
    },
    /// User pressed the edit trigger.
    BeginEdit,
    /// User pressed save; `text` is the buffer at the instant of the click.
    Save { text: String },
}
