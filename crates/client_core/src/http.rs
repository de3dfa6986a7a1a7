use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use shared::{
    domain::PagePath,
    protocol::{SavePageRequest, SavePageResponse},
};
use tracing::debug;
use url::Url;

use crate::{SaveError, SaveReceipt, SaveTransport};

/// A save that takes longer than this surfaces as a transport failure
/// instead of leaving the session silently hung.
const SAVE_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire implementation of `SaveTransport` against the document endpoint:
/// create is `POST` to the collection root, replace is `PUT` to the page's
/// own path, both with a JSON `{"text": ...}` body.
pub struct HttpSaveTransport {
    http: Client,
    base: Url,
}

impl HttpSaveTransport {
    pub fn new(base: Url) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(SAVE_REQUEST_TIMEOUT)
            .build()
            .context("failed to build http client for saves")?;
        Ok(Self { http, base })
    }

    fn page_url(&self, path: &PagePath) -> Result<Url, SaveError> {
        self.base
            .join(path.as_str())
            .map_err(|err| SaveError::Transport(format!("invalid page url {path}: {err}")))
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<SaveReceipt, SaveError> {
        let response = request.send().await?;
        let status = response.status();
        if let Some(rejection) = classify_rejection(status) {
            return Err(rejection);
        }
        // The legacy server answers "{}" or {"redirect": ...}; any success
        // body that doesn't parse counts as saved in place.
        let body = response.bytes().await?;
        let parsed: SavePageResponse = serde_json::from_slice(&body).unwrap_or_default();
        Ok(SaveReceipt {
            redirect: parsed.redirect,
        })
    }
}

/// Status-derived failure taxonomy of the save contract.
fn classify_rejection(status: StatusCode) -> Option<SaveError> {
    match status {
        StatusCode::CONFLICT => Some(SaveError::Conflict),
        StatusCode::NOT_FOUND => Some(SaveError::NotFound),
        status if !status.is_success() => Some(SaveError::Unexpected {
            status: status.as_u16(),
        }),
        _ => None,
    }
}

#[async_trait]
impl SaveTransport for HttpSaveTransport {
    async fn create(&self, text: &str) -> Result<SaveReceipt, SaveError> {
        debug!(url = %self.base, text_len = text.len(), "save: POST create");
        self.dispatch(self.http.post(self.base.clone()).json(&SavePageRequest {
            text: text.to_owned(),
        }))
        .await
    }

    async fn replace(&self, path: &PagePath, text: &str) -> Result<SaveReceipt, SaveError> {
        let url = self.page_url(path)?;
        debug!(url = %url, text_len = text.len(), "save: PUT replace");
        self.dispatch(self.http.put(url).json(&SavePageRequest {
            text: text.to_owned(),
        }))
        .await
    }
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
