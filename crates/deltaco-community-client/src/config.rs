//! Community upstream client configuration.
//!
//! Discord URLs are optional: without them the corresponding calls fail with
//! [`CommunityApiError::NotConfigured`](crate::CommunityApiError::NotConfigured)
//! instead of the service refusing to start.

use url::Url;
use zeroize::Zeroizing;

/// Default BattleMetrics servers endpoint.
pub const DEFAULT_BATTLEMETRICS_URL: &str = "https://api.battlemetrics.com/servers";

/// Server ids shown on the status page unless overridden.
pub const DEFAULT_SERVER_IDS: [&str; 4] = ["27304883", "630697", "20151421", "5103536"];

/// Configuration for the community upstream clients.
///
/// Custom `Debug` implementation redacts the webhook URL (it embeds the
/// webhook token) and the BattleMetrics token.
#[derive(Clone)]
pub struct CommunityApiConfig {
    /// Discord guild widget JSON URL (`.../guilds/{id}/widget.json`).
    pub discord_widget_url: Option<Url>,
    /// Discord webhook receiving support tickets.
    pub discord_webhook_url: Option<Zeroizing<String>>,
    /// BattleMetrics servers collection URL.
    pub battlemetrics_url: Url,
    /// BattleMetrics API token, sent as a bearer token when present.
    pub battlemetrics_token: Option<Zeroizing<String>>,
    /// BattleMetrics server ids, in display order.
    pub server_ids: Vec<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CommunityApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommunityApiConfig")
            .field("discord_widget_url", &self.discord_widget_url)
            .field(
                "discord_webhook_url",
                &self.discord_webhook_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("battlemetrics_url", &self.battlemetrics_url)
            .field(
                "battlemetrics_token",
                &self.battlemetrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("server_ids", &self.server_ids)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl CommunityApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `DISCORD_WIDGET_URL` (optional)
    /// - `DISCORD_WEBHOOK_URL` (optional)
    /// - `BATTLEMETRICS_API_URL` (default: `https://api.battlemetrics.com/servers`)
    /// - `BATTLEMETRICS_API_TOKEN` (optional)
    /// - `BATTLEMETRICS_SERVER_IDS` (comma-separated; default: the four community servers)
    /// - `COMMUNITY_HTTP_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let discord_widget_url = match non_empty_var("DISCORD_WIDGET_URL") {
            Some(raw) => Some(parse_url("DISCORD_WIDGET_URL", &raw)?),
            None => None,
        };
        let discord_webhook_url = match non_empty_var("DISCORD_WEBHOOK_URL") {
            Some(raw) => {
                parse_url("DISCORD_WEBHOOK_URL", &raw)?;
                Some(Zeroizing::new(raw))
            }
            None => None,
        };
        let battlemetrics_url = parse_url(
            "BATTLEMETRICS_API_URL",
            &non_empty_var("BATTLEMETRICS_API_URL")
                .unwrap_or_else(|| DEFAULT_BATTLEMETRICS_URL.to_string()),
        )?;
        let server_ids = match non_empty_var("BATTLEMETRICS_SERVER_IDS") {
            Some(raw) => parse_server_ids(&raw)?,
            None => DEFAULT_SERVER_IDS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            discord_widget_url,
            discord_webhook_url,
            battlemetrics_url,
            battlemetrics_token: non_empty_var("BATTLEMETRICS_API_TOKEN").map(Zeroizing::new),
            server_ids,
            timeout_secs: std::env::var("COMMUNITY_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing every upstream at one local mock server.
    ///
    /// The widget lives at `/widget.json`, the webhook at `/webhook`, and
    /// BattleMetrics at `/servers`.
    pub fn local_mock(base: &str, server_ids: &[&str]) -> Result<Self, ConfigError> {
        let base = base.trim_end_matches('/');
        Ok(Self {
            discord_widget_url: Some(parse_url("widget", &format!("{base}/widget.json"))?),
            discord_webhook_url: Some(Zeroizing::new(format!("{base}/webhook"))),
            battlemetrics_url: parse_url("battlemetrics", &format!("{base}/servers"))?,
            battlemetrics_token: Some(Zeroizing::new("test-token".to_string())),
            server_ids: server_ids.iter().map(|s| s.to_string()).collect(),
            timeout_secs: 5,
        })
    }
}

fn non_empty_var(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Split a comma-separated id list, rejecting non-numeric ids.
pub fn parse_server_ids(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|id| {
            if id.chars().all(|c| c.is_ascii_digit()) {
                Ok(id.to_string())
            } else {
                Err(ConfigError::InvalidServerId(id.to_string()))
            }
        })
        .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid BattleMetrics server id \"{0}\" (expected digits)")]
    InvalidServerId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_ids_are_trimmed_and_split() {
        let ids = parse_server_ids(" 1, 22 ,333,").unwrap();
        assert_eq!(ids, ["1", "22", "333"]);
    }

    #[test]
    fn non_numeric_server_id_is_rejected() {
        assert!(matches!(
            parse_server_ids("1,abc"),
            Err(ConfigError::InvalidServerId(id)) if id == "abc"
        ));
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = CommunityApiConfig::local_mock("http://127.0.0.1:9", &["1"]).unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("/webhook"));
        assert!(!debug.contains("test-token"));
    }
}
