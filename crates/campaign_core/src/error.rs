use miette::Diagnostic;
use thiserror::Error;

/// Failure of a single upstream round trip.
#[derive(Error, Diagnostic, Debug)]
pub enum TransportError {
    #[error("request to {endpoint} failed: {reason}")]
    #[diagnostic(
        code(campaign::transport::request_failed),
        help("Check that the ActiveCampaign account URL is reachable")
    )]
    Request {
        endpoint: String,
        /// The cause and every error beneath it, joined with `: `
        reason: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("response from {endpoint} is not valid JSON: {cause}")]
    #[diagnostic(
        code(campaign::transport::decode_failed),
        help("The upstream API answered with a body that could not be parsed as JSON")
    )]
    Decode {
        endpoint: String,
        #[source]
        cause: serde_json::Error,
        #[source_code]
        body: String,
    },
}

impl TransportError {
    pub fn request(
        endpoint: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Request {
            endpoint: endpoint.into(),
            reason: error_chain(&cause),
            cause: Box::new(cause),
        }
    }

    pub fn decode(endpoint: impl Into<String>, cause: serde_json::Error, body: String) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            cause,
            body,
        }
    }
}

fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut reason = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        // some errors repeat their source in their own message
        if !reason.ends_with(&message) {
            reason.push_str(": ");
            reason.push_str(&message);
        }
        source = cause.source();
    }
    reason
}

/// Everything that can stop an adapter operation short of an upstream answer.
#[derive(Error, Diagnostic, Debug)]
pub enum AdapterError {
    #[error("{message}")]
    #[diagnostic(
        code(campaign::config::missing_credentials),
        help("Set the environment variables: export ACTIVECAMPAIGN_URL=<url> ACTIVECAMPAIGN_API_KEY=<key>")
    )]
    MissingCredentials { message: &'static str },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Transport(#[from] TransportError),
}

pub type Result<T> = std::result::Result<T, AdapterError>;
