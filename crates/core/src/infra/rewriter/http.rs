use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{RewriteError, Rewriter};
use crate::domain::catalog::{Catalog, Mode, Tone};
use crate::domain::request::RewriteRequest;

/// リライトAPIのHTTPクライアント
pub struct HttpRewriter {
    client: reqwest::Client,
    base_url: String,
}

/// `POST /api/rewrite` のリクエストボディ。
/// percentage は manual モードのときだけキーが出力される。
#[derive(Debug, Serialize)]
pub(crate) struct RewritePayload {
    pub text: String,
    pub mode: String,
    pub tone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u32>,
}

#[derive(Deserialize)]
struct RewriteResponse {
    rewritten_text: String,
}

/// `GET /api/modes` のレスポンス。キー欠落は空リスト扱い。
#[derive(Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    modes: Vec<Mode>,
    #[serde(default)]
    tones: Vec<Tone>,
}

impl HttpRewriter {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

impl RewritePayload {
    pub(crate) fn from_request(request: &RewriteRequest) -> Self {
        Self {
            text: request.input_text.clone(),
            mode: request.configuration.mode_id.clone(),
            tone: request.configuration.tone_id.clone(),
            percentage: request.configuration.percentage,
        }
    }
}

#[async_trait]
impl Rewriter for HttpRewriter {
    async fn fetch_catalog(&self) -> Result<Catalog, RewriteError> {
        let response = self
            .client
            .get(self.endpoint("modes"))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RewriteError::Timeout
                } else {
                    RewriteError::Failed(format!("HTTP request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            return Err(RewriteError::Failed(format!(
                "Catalog fetch error: {}",
                response.status()
            )));
        }

        let body: CatalogResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::Malformed(format!("Catalog parse error: {e}")))?;

        Ok(Catalog {
            modes: body.modes,
            tones: body.tones,
        })
    }

    async fn rewrite(&self, request: &RewriteRequest) -> Result<String, RewriteError> {
        let payload = RewritePayload::from_request(request);

        let response = self
            .client
            .post(self.endpoint("rewrite"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RewriteError::Timeout
                } else {
                    RewriteError::Failed(format!("HTTP request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RewriteError::Failed(format!(
                "Rewrite API error: {status} - {body}"
            )));
        }

        let body: RewriteResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::Malformed(format!("Response parse error: {e}")))?;

        Ok(body.rewritten_text)
    }

    fn name(&self) -> &str {
        "http"
    }
}
