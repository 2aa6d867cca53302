use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::{
    Result,
    config::{CredentialSource, UpstreamCredentials},
    envelope::ResultEnvelope,
    error::AdapterError,
    request::CampaignRequest,
    transport::UpstreamTransport,
    wire::UpstreamRequest,
};

/// Returned by `create_campaign` when credentials are missing
pub const CREATE_MISSING_CREDENTIALS: &str =
    "Missing ACTIVECAMPAIGN_URL or ACTIVECAMPAIGN_API_KEY environment variables";

/// Returned by the read operations when credentials are missing
pub const READ_MISSING_CREDENTIALS: &str = "Missing environment variables";

/// Adapter between campaign tool calls and the ActiveCampaign admin API.
///
/// Every operation resolves credentials, assembles one request, performs one
/// round trip and returns a [`ResultEnvelope`]. Nothing is kept between calls.
#[derive(Clone)]
pub struct CampaignClient {
    credentials: Arc<dyn CredentialSource>,
    transport: Arc<dyn UpstreamTransport>,
}

impl CampaignClient {
    pub fn new(
        credentials: Arc<dyn CredentialSource>,
        transport: Arc<dyn UpstreamTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    /// Create a campaign (`campaign_create`)
    pub async fn create_campaign(&self, campaign: &CampaignRequest) -> ResultEnvelope {
        self.call(CREATE_MISSING_CREDENTIALS, |credentials| {
            UpstreamRequest::create_campaign(credentials, campaign)
        })
        .await
    }

    /// Fetch report totals for one campaign (`campaign_report_totals`)
    pub async fn get_campaign(&self, campaign_id: i64) -> ResultEnvelope {
        self.call(READ_MISSING_CREDENTIALS, |credentials| {
            UpstreamRequest::campaign_report(credentials, campaign_id)
        })
        .await
    }

    /// List all campaigns (`campaign_list`)
    pub async fn list_campaigns(&self) -> ResultEnvelope {
        self.call(READ_MISSING_CREDENTIALS, UpstreamRequest::list_campaigns)
            .await
    }

    async fn call<F>(&self, missing: &'static str, build: F) -> ResultEnvelope
    where
        F: FnOnce(&UpstreamCredentials) -> UpstreamRequest,
    {
        self.try_call(missing, build).await.into()
    }

    async fn try_call<F>(&self, missing: &'static str, build: F) -> Result<Value>
    where
        F: FnOnce(&UpstreamCredentials) -> UpstreamRequest,
    {
        let credentials = self
            .credentials
            .resolve()
            .ok_or(AdapterError::MissingCredentials { message: missing })?;
        let request = build(&credentials);

        debug!(action = %request.action, endpoint = %request.endpoint, "Dispatching");
        Ok(self.transport.send(&request).await?)
    }
}

impl std::fmt::Debug for CampaignClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CampaignClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{MockCredentialSource, StaticCredentials},
        error::TransportError,
        request::CampaignStatus,
        transport::MockUpstreamTransport,
        wire::{ApiAction, HttpMethod},
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn promo(status: CampaignStatus, send_date: Option<&str>) -> CampaignRequest {
        CampaignRequest {
            name: "Promo".into(),
            subject: "50% off".into(),
            from_name: "Acme".into(),
            from_email: "a@x.com".into(),
            reply_email: "a@x.com".into(),
            html_content: "<p>hi</p>".into(),
            list_ids: vec![3, 7],
            campaign_type: "single".into(),
            status,
            send_date: send_date.map(String::from),
        }
    }

    fn configured(transport: MockUpstreamTransport) -> CampaignClient {
        CampaignClient::new(
            Arc::new(StaticCredentials::new("https://acme.api-us1.com", "test-key")),
            Arc::new(transport),
        )
    }

    fn unconfigured() -> CampaignClient {
        let mut transport = MockUpstreamTransport::new();
        transport.expect_send().never();
        CampaignClient::new(Arc::new(StaticCredentials::missing()), Arc::new(transport))
    }

    fn connection_refused() -> TransportError {
        TransportError::request(
            "https://acme.api-us1.com/admin/api.php",
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
        )
    }

    #[tokio::test]
    async fn test_missing_credentials_short_circuit_all_operations() {
        let client = unconfigured();

        assert_eq!(
            client.create_campaign(&promo(CampaignStatus::DRAFT, None)).await,
            ResultEnvelope::error(CREATE_MISSING_CREDENTIALS)
        );
        assert_eq!(
            client.get_campaign(12).await,
            ResultEnvelope::error("Missing environment variables")
        );
        assert_eq!(
            client.list_campaigns().await,
            ResultEnvelope::error("Missing environment variables")
        );
    }

    #[tokio::test]
    async fn test_credentials_resolved_on_every_call() {
        let mut credentials = MockCredentialSource::new();
        credentials.expect_resolve().times(2).returning(|| None);
        let mut transport = MockUpstreamTransport::new();
        transport.expect_send().never();

        let client = CampaignClient::new(Arc::new(credentials), Arc::new(transport));
        assert!(client.list_campaigns().await.is_error());
        assert!(client.get_campaign(1).await.is_error());
    }

    #[tokio::test]
    async fn test_create_scheduled_campaign_sends_expected_request() {
        let mut transport = MockUpstreamTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.action == ApiAction::CampaignCreate
                    && request.method == HttpMethod::Post
                    && request.endpoint == "https://acme.api-us1.com/admin/api.php"
                    && request.param("type") == Some("single")
                    && request.param("status") == Some("1")
                    && request.param("p[3]") == Some("3")
                    && request.param("p[7]") == Some("7")
                    && request.param("sdate") == Some("2024-05-01 09:00:00")
            })
            .times(1)
            .returning(|_| Ok(json!({ "id": "42", "result_code": 1 })));

        let envelope = configured(transport)
            .create_campaign(&promo(CampaignStatus::SCHEDULED, Some("2024-05-01 09:00:00")))
            .await;

        assert_eq!(
            envelope,
            ResultEnvelope::Upstream(json!({ "id": "42", "result_code": 1 }))
        );
    }

    #[tokio::test]
    async fn test_create_draft_campaign_omits_send_date() {
        let mut transport = MockUpstreamTransport::new();
        transport
            .expect_send()
            .withf(|request| request.param("status") == Some("0") && !request.has_param("sdate"))
            .times(1)
            .returning(|_| Ok(json!({ "id": "43" })));

        let envelope = configured(transport)
            .create_campaign(&promo(CampaignStatus::DRAFT, Some("2024-05-01 09:00:00")))
            .await;
        assert!(!envelope.is_error());
    }

    #[tokio::test]
    async fn test_get_campaign_passes_body_through() {
        let body = json!({ "result_code": 1, "send_amt": "120", "opens": "48" });
        let returned = body.clone();

        let mut transport = MockUpstreamTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.action == ApiAction::CampaignReportTotals
                    && request.method == HttpMethod::Get
                    && request.param("campaignid") == Some("12")
            })
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        assert_eq!(
            configured(transport).get_campaign(12).await,
            ResultEnvelope::Upstream(body)
        );
    }

    #[tokio::test]
    async fn test_upstream_error_body_is_not_reinterpreted() {
        let body = json!({ "result_code": 0, "error": "Nothing is returned" });
        let returned = body.clone();

        let mut transport = MockUpstreamTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let envelope = configured(transport).list_campaigns().await;
        assert!(!envelope.is_error());
        assert_eq!(envelope.into_value(), body);
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_error_envelope() {
        let mut transport = MockUpstreamTransport::new();
        transport
            .expect_send()
            .times(3)
            .returning(|_| Err(connection_refused()));
        let client = configured(transport);

        for envelope in [
            client.create_campaign(&promo(CampaignStatus::DRAFT, None)).await,
            client.get_campaign(5).await,
            client.list_campaigns().await,
        ] {
            match envelope {
                ResultEnvelope::Error { error } => {
                    assert!(!error.is_empty());
                    assert!(error.contains("connection refused"));
                }
                other => panic!("Expected error envelope, got {other:?}"),
            }
        }
    }
}
