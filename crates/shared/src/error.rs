use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Save failures as classified from the HTTP status of the save request.
///
/// The `Display` text is the user-facing notice, word for word what the
/// legacy pages alerted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum SaveFailureKind {
    /// 409: the page's tags collide with an existing page and need
    /// further disambiguation.
    #[error("Conflict. Try more tags.")]
    Conflict,
    /// 404: the page no longer exists at its address.
    #[error("Not found.")]
    NotFound,
    /// Any other non-2xx status. Transport failures with no response at
    /// all report status 0.
    #[error("Unknown error. Status: {status}")]
    Unknown { status: u16 },
}
