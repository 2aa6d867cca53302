//! Typed tool inputs

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Campaign type used when the caller does not name one
pub const DEFAULT_CAMPAIGN_TYPE: &str = "single";

fn default_campaign_type() -> String {
    DEFAULT_CAMPAIGN_TYPE.to_string()
}

/// Upstream status code. Values other than the two named ones are forwarded as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CampaignStatus(pub i64);

impl CampaignStatus {
    pub const DRAFT: Self = Self(0);
    pub const SCHEDULED: Self = Self(1);

    pub fn is_scheduled(&self) -> bool {
        *self == Self::SCHEDULED
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input for creating a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CampaignRequest {
    /// Internal campaign name
    pub name: String,
    /// Email subject line
    pub subject: String,
    /// Sender name
    pub from_name: String,
    /// Sender email address
    pub from_email: String,
    /// Reply-to email address
    pub reply_email: String,
    /// HTML email content
    pub html_content: String,
    /// Contact list IDs to send to
    pub list_ids: Vec<i64>,
    /// Type of campaign, e.g. single, recurring, split or responder (default: single).
    /// Forwarded to ActiveCampaign as given.
    #[serde(default = "default_campaign_type")]
    pub campaign_type: String,
    /// 0 for draft, 1 for scheduled (default: 0)
    #[serde(default)]
    pub status: CampaignStatus,
    /// When to send, format 'YYYY-MM-DD HH:MM:SS'. Only used when status is 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_date: Option<String>,
}

impl CampaignRequest {
    /// The send date that should go on the wire, if any.
    ///
    /// Present only for scheduled campaigns with a non-empty date.
    pub fn effective_send_date(&self) -> Option<&str> {
        self.send_date
            .as_deref()
            .filter(|date| !date.is_empty() && self.status.is_scheduled())
    }
}

/// Input for fetching a campaign report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GetCampaignRequest {
    /// The campaign ID
    pub campaign_id: i64,
}
