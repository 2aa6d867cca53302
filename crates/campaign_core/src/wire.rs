//! Assembly of outbound requests in the shape the legacy admin API expects
//!
//! The API takes a flat set of string parameters. Target lists are not a
//! list-valued field: each list id becomes its own `p[<id>]=<id>` parameter.

use std::collections::HashSet;
use std::fmt;

use crate::config::UpstreamCredentials;
use crate::request::CampaignRequest;

/// Output format requested from the API
pub const API_OUTPUT: &str = "json";

/// Upstream action identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    CampaignCreate,
    CampaignReportTotals,
    CampaignList,
}

impl ApiAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignCreate => "campaign_create",
            Self::CampaignReportTotals => "campaign_report_totals",
            Self::CampaignList => "campaign_list",
        }
    }

    /// How the action's parameters travel
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::CampaignCreate => HttpMethod::Post,
            Self::CampaignReportTotals | Self::CampaignList => HttpMethod::Get,
        }
    }
}

impl fmt::Display for ApiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Parameters in the query string
    Get,
    /// Parameters in a form-encoded body
    Post,
}

/// A fully assembled upstream call
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub action: ApiAction,
    pub method: HttpMethod,
    pub endpoint: String,
    pub params: Vec<(String, String)>,
}

impl UpstreamRequest {
    /// Start a request carrying the action, key and output marker every call needs
    fn new(action: ApiAction, credentials: &UpstreamCredentials) -> Self {
        let mut request = Self {
            action,
            method: action.method(),
            endpoint: credentials.endpoint(),
            params: Vec::new(),
        };
        request.push("api_action", action.as_str());
        request.push("api_key", &credentials.api_key);
        request.push("api_output", API_OUTPUT);
        request
    }

    fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.params.push((key.into(), value.to_string()));
    }

    /// Value of the first parameter named `key`
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.param(key).is_some()
    }

    /// `campaign_create`
    pub fn create_campaign(credentials: &UpstreamCredentials, campaign: &CampaignRequest) -> Self {
        let mut request = Self::new(ApiAction::CampaignCreate, credentials);
        request.push("type", &campaign.campaign_type);
        request.push("name", &campaign.name);
        request.push("subject", &campaign.subject);
        request.push("fromname", &campaign.from_name);
        request.push("fromemail", &campaign.from_email);
        request.push("reply2", &campaign.reply_email);
        request.push("htmlcontent", &campaign.html_content);
        request.push("status", campaign.status);

        let mut seen = HashSet::new();
        for list_id in campaign.list_ids.iter().filter(|id| seen.insert(**id)) {
            request.push(list_key(*list_id), list_id);
        }

        if let Some(send_date) = campaign.effective_send_date() {
            request.push("sdate", send_date);
        }

        request
    }

    /// `campaign_report_totals`
    pub fn campaign_report(credentials: &UpstreamCredentials, campaign_id: i64) -> Self {
        let mut request = Self::new(ApiAction::CampaignReportTotals, credentials);
        request.push("campaignid", campaign_id);
        request
    }

    /// `campaign_list`
    pub fn list_campaigns(credentials: &UpstreamCredentials) -> Self {
        Self::new(ApiAction::CampaignList, credentials)
    }
}

// Keeps the API key out of logs and panic messages.
impl fmt::Debug for UpstreamRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(k, v)| {
                let v = if k == "api_key" { "<redacted>" } else { v.as_str() };
                (k.as_str(), v)
            })
            .collect();
        f.debug_struct("UpstreamRequest")
            .field("action", &self.action)
            .field("method", &self.method)
            .field("endpoint", &self.endpoint)
            .field("params", &params)
            .finish()
    }
}

/// Fan-out key for one target list
pub fn list_key(list_id: i64) -> String {
    format!("p[{list_id}]")
}
