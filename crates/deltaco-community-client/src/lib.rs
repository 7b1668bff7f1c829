//! # deltaco-community-client -- Typed clients for the community upstreams
//!
//! Provides typed access to the three third-party services behind the
//! community site:
//! - **Members** via the Discord guild widget (`guilds/{id}/widget.json`)
//! - **Support** via a Discord channel webhook
//! - **Servers** via `api.battlemetrics.com/servers/{id}`
//!
//! ## Architecture
//!
//! Each upstream gets one sub-client sharing a single `reqwest::Client`
//! (connection pool and timeout). Calls are single attempts: there is no
//! retry or caching layer, and upstream failures surface as
//! [`CommunityApiError`] for the HTTP layer to report.

pub mod battlemetrics;
pub mod config;
pub mod discord;
pub mod error;

pub use config::CommunityApiConfig;
pub use discord::{DiscordMember, SupportTicket};
pub use error::CommunityApiError;

use std::time::Duration;

/// Top-level community client. Holds sub-clients for each upstream.
#[derive(Debug, Clone)]
pub struct CommunityClient {
    members: discord::MembersClient,
    support: discord::SupportClient,
    servers: battlemetrics::ServersClient,
}

impl CommunityClient {
    /// Create a community client from configuration.
    pub fn new(config: CommunityApiConfig) -> Result<Self, CommunityApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("deltaco-community/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CommunityApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            members: discord::MembersClient::new(http.clone(), config.discord_widget_url),
            support: discord::SupportClient::new(http.clone(), config.discord_webhook_url),
            servers: battlemetrics::ServersClient::new(
                http,
                config.battlemetrics_url,
                config.battlemetrics_token,
                config.server_ids,
            ),
        })
    }

    /// Access the Discord widget client.
    pub fn members(&self) -> &discord::MembersClient {
        &self.members
    }

    /// Access the support webhook client.
    pub fn support(&self) -> &discord::SupportClient {
        &self.support
    }

    /// Access the BattleMetrics client.
    pub fn servers(&self) -> &battlemetrics::ServersClient {
        &self.servers
    }
}
