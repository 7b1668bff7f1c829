//! Typed clients for Discord: the guild widget (online member list) and the
//! support-ticket webhook.
//!
//! ## Widget
//!
//! `GET {widget_url}` returns `{"members": [{"id", "username", "avatar_url", "status", ...}], ...}`.
//! Members are reshaped to [`DiscordMember`] (`username` → `name`,
//! `avatar_url` → `avatar`). A response without a `members` array is rejected.
//!
//! ## Webhook
//!
//! `POST {webhook_url}` with `{"content": "<markdown>"}`. Discord answers
//! 204 on success.

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::error::{check_status, CommunityApiError};

/// A member shown in the site's member widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DiscordMember {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub status: Option<String>,
}

/// Member record as it appears in the widget JSON.
#[derive(Debug, Deserialize)]
struct WidgetMember {
    #[serde(default, deserialize_with = "string_or_number")]
    id: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl From<WidgetMember> for DiscordMember {
    fn from(m: WidgetMember) -> Self {
        Self {
            id: m.id,
            name: m.username,
            avatar: m.avatar_url,
            status: m.status,
        }
    }
}

fn string_or_number<'de, D>(de: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(de)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Reshape a widget document into member rows.
pub fn members_from_widget(
    endpoint: &str,
    widget: serde_json::Value,
) -> Result<Vec<DiscordMember>, CommunityApiError> {
    let invalid = || CommunityApiError::InvalidResponse {
        endpoint: endpoint.to_string(),
        reason: "Invalid data structure received from Discord API".to_string(),
    };
    let members = match widget {
        serde_json::Value::Object(mut obj) => obj.remove("members").ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };
    if !members.is_array() {
        return Err(invalid());
    }
    let raw: Vec<WidgetMember> =
        serde_json::from_value(members).map_err(|e| CommunityApiError::InvalidResponse {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
    Ok(raw.into_iter().map(DiscordMember::from).collect())
}

/// Client for the Discord guild widget.
#[derive(Debug, Clone)]
pub struct MembersClient {
    http: reqwest::Client,
    widget_url: Option<Url>,
}

impl MembersClient {
    pub(crate) fn new(http: reqwest::Client, widget_url: Option<Url>) -> Self {
        Self { http, widget_url }
    }

    /// Fetch the guild's online members.
    ///
    /// Calls `GET {widget_url}`.
    pub async fn members(&self) -> Result<Vec<DiscordMember>, CommunityApiError> {
        let url = self
            .widget_url
            .as_ref()
            .ok_or(CommunityApiError::NotConfigured("Discord widget URL is not defined."))?;
        let endpoint = "GET discord widget";

        tracing::debug!("fetching members from Discord widget");
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CommunityApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let resp = check_status(endpoint, resp).await?;

        let widget: serde_json::Value =
            resp.json()
                .await
                .map_err(|e| CommunityApiError::Deserialization {
                    endpoint: endpoint.into(),
                    source: e,
                })?;
        let members = members_from_widget(endpoint, widget)?;
        tracing::debug!(count = members.len(), "mapped Discord members");
        Ok(members)
    }
}

/// A support request submitted from the site's support form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SupportTicket {
    pub discord_name: String,
    pub discord_id: String,
    pub support_type: String,
    pub urgency: String,
    pub description: String,
    pub receive_dm: bool,
}

impl SupportTicket {
    /// The Discord markdown message posted to the support channel.
    pub fn message(&self) -> String {
        format!(
            "**New Support Request**\n\n\
             **Discord Name:** {}\n\
             **Discord ID:** {}\n\
             **Support Type:** {}\n\
             **Urgency:** {}\n\
             **Description:** {}\n\
             **Receive DM:** {}",
            self.discord_name,
            self.discord_id,
            self.support_type,
            self.urgency,
            self.description,
            if self.receive_dm { "Yes" } else { "No" },
        )
    }
}

#[derive(Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

/// Client for the support-ticket webhook.
#[derive(Clone)]
pub struct SupportClient {
    http: reqwest::Client,
    webhook_url: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for SupportClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupportClient")
            .field("webhook_url", &self.webhook_url.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl SupportClient {
    pub(crate) fn new(http: reqwest::Client, webhook_url: Option<Zeroizing<String>>) -> Self {
        Self { http, webhook_url }
    }

    /// Post a support ticket to the webhook.
    ///
    /// Calls `POST {webhook_url}`.
    pub async fn send_ticket(&self, ticket: &SupportTicket) -> Result<(), CommunityApiError> {
        let url = self
            .webhook_url
            .as_ref()
            .ok_or(CommunityApiError::NotConfigured("Discord webhook URL is not defined."))?;
        let endpoint = "POST discord webhook";
        let content = ticket.message();

        let resp = self
            .http
            .post(url.as_str())
            .json(&WebhookMessage { content: &content })
            .send()
            .await
            .map_err(|e| CommunityApiError::Http {
                endpoint: endpoint.into(),
                // The webhook URL carries its token; keep it out of logs.
                source: e.without_url(),
            })?;
        check_status(endpoint, resp).await?;

        tracing::info!(
            support_type = %ticket.support_type,
            urgency = %ticket.urgency,
            "support ticket relayed"
        );
        Ok(())
    }
}
