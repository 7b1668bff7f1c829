//! # API Route Modules
//!
//! - `catalog`: mod catalog listing and multipart submissions.
//! - `support`: support tickets forwarded to a Discord webhook.
//! - `servers`: BattleMetrics server status passthrough.
//! - `members`: Discord guild widget members.

pub mod catalog;
pub mod members;
pub mod servers;
pub mod support;
