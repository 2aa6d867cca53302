//! Campaign Core - adapter for the ActiveCampaign campaign API
//!
//! Turns typed campaign tool calls into requests against the legacy
//! form-encoded admin API and normalizes every outcome into a
//! [`ResultEnvelope`]:
//! - Success: the upstream JSON body, passed through untouched
//! - Failure: `{"error": "<message>"}`, never a panic or propagated error

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod request;
pub mod transport;
pub mod wire;

pub use client::CampaignClient;
pub use config::{CredentialSource, EnvCredentials, StaticCredentials, UpstreamCredentials};
pub use envelope::ResultEnvelope;
pub use error::{AdapterError, Result, TransportError};
pub use request::{CampaignRequest, CampaignStatus, DEFAULT_CAMPAIGN_TYPE, GetCampaignRequest};
pub use transport::{HttpTransport, UpstreamTransport};
pub use wire::{ApiAction, HttpMethod, UpstreamRequest};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        CampaignClient, CampaignRequest, CampaignStatus, CredentialSource, DEFAULT_CAMPAIGN_TYPE,
        EnvCredentials, GetCampaignRequest, HttpTransport, ResultEnvelope, StaticCredentials,
        UpstreamTransport,
        error::{AdapterError, Result},
    };
}
