//! Events flowing from the backend worker to the UI thread.

use shared::error::SaveFailureKind;

pub enum UiEvent {
    /// Show the view panel (and hide the edit panel).
    ShowView,
    /// Show the edit panel (and hide the view panel).
    ShowEdit,
    HideEditTrigger,
    /// Give the editor widget input focus on the next frame.
    FocusEditor,
    /// In-place save succeeded; `text` is the now-authoritative document.
    Saved { text: String },
    /// Create succeeded; the server placed the page at `target`.
    NavigatedTo { target: String },
    /// Save failed with a classified notice; the session stays editable.
    SaveFailed { notice: SaveFailureKind },
    /// Backend worker infrastructure failure (runtime, transport setup).
    Error(String),
}
