//! Typed client for the BattleMetrics servers API.
//!
//! `GET {battlemetrics_url}/{server_id}` with `Authorization: Bearer <token>`.
//! Documents are returned untouched; the status page reads
//! `data.attributes` itself.

use futures::future::try_join_all;
use url::Url;
use zeroize::Zeroizing;

use crate::error::{check_status, CommunityApiError};

/// Client for BattleMetrics server status.
#[derive(Clone)]
pub struct ServersClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<Zeroizing<String>>,
    server_ids: Vec<String>,
}

impl std::fmt::Debug for ServersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServersClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("server_ids", &self.server_ids)
            .finish()
    }
}

impl ServersClient {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: Url,
        token: Option<Zeroizing<String>>,
        server_ids: Vec<String>,
    ) -> Self {
        Self {
            http,
            base_url,
            token,
            server_ids,
        }
    }

    /// The configured server ids, in display order.
    pub fn server_ids(&self) -> &[String] {
        &self.server_ids
    }

    /// Fetch one server document.
    ///
    /// Calls `GET {base_url}/{id}`.
    pub async fn server(&self, id: &str) -> Result<serde_json::Value, CommunityApiError> {
        let endpoint = format!("GET /servers/{id}");
        let url = format!("{}/{id}", self.base_url.as_str().trim_end_matches('/'));

        let mut req = self.http.get(&url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token.as_str());
        }
        let resp = req.send().await.map_err(|e| CommunityApiError::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;
        let resp = check_status(&endpoint, resp).await?;

        resp.json()
            .await
            .map_err(|e| CommunityApiError::Deserialization {
                endpoint,
                source: e,
            })
    }

    /// Fetch every configured server concurrently.
    ///
    /// All requests must succeed; the first failure fails the whole call.
    /// Results keep the configured order.
    pub async fn servers(&self) -> Result<Vec<serde_json::Value>, CommunityApiError> {
        let docs = try_join_all(self.server_ids.iter().map(|id| self.server(id))).await?;
        tracing::debug!(count = docs.len(), "fetched BattleMetrics servers");
        Ok(docs)
    }
}
