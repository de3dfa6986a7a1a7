use shared::error::SaveFailureKind;
use thiserror::Error;

/// Failure of one save round-trip, classified by the HTTP status of the
/// response. All kinds recover locally: the session stays in `Editing`
/// and the user must re-trigger the save.
#[derive(Debug, Error)]
pub enum SaveError {
    /// 409: the page's tags collide with an existing page.
    #[error("save rejected: tag conflict")]
    Conflict,
    /// 404: the page no longer exists at its address.
    #[error("save target not found")]
    NotFound,
    /// Any other non-2xx response.
    #[error("save failed with status {status}")]
    Unexpected { status: u16 },
    /// No usable HTTP response at all (connect failure, timeout).
    #[error("save request failed in transit: {0}")]
    Transport(String),
}

impl SaveError {
    /// User-facing classification. Transport failures report status 0,
    /// which is what the legacy error handler saw for a dead connection.
    pub fn kind(&self) -> SaveFailureKind {
        match self {
            SaveError::Conflict => SaveFailureKind::Conflict,
            SaveError::NotFound => SaveFailureKind::NotFound,
            SaveError::Unexpected { status } => SaveFailureKind::Unknown { status: *status },
            SaveError::Transport(_) => SaveFailureKind::Unknown { status: 0 },
        }
    }
}

impl From<reqwest::Error> for SaveError {
    fn from(err: reqwest::Error) -> Self {
        SaveError::Transport(err.to_string())
    }
}
