use serde::{Deserialize, Serialize};

/// Body of both create (`POST /`) and replace (`PUT <path>`) requests: the
/// full widget buffer at the instant the save fired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePageRequest {
    pub text: String,
}

/// Success body of a save. A `redirect` field tells the client where the
/// server placed a newly created page; its absence means the page was
/// saved in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavePageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}
