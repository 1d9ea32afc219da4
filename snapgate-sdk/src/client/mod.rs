//! Typed HTTP client for the Midtrans gateway.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

use reqwest::{Client, StatusCode};
use url::Url;

use crate::objects::{
    SnapErrorResponse, SnapTransactionRequest, SnapTransactionResponse, TransactionStatusResponse,
};

/// Errors produced by the gateway client.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport-level failure (DNS, TLS, connection reset, timeout, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("gateway error: status {status}, body: {body}")]
    Api {
        status: StatusCode,
        body: String,
        /// `error_messages` from the body, if it carried any.
        error_messages: Vec<String>,
    },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl GatewayError {
    /// The gateway's own error messages, when the failure carried any.
    pub fn error_messages(&self) -> Option<&[String]> {
        match self {
            GatewayError::Api { error_messages, .. } if !error_messages.is_empty() => {
                Some(error_messages)
            }
            _ => None,
        }
    }
}

/// Base URLs of the two gateway APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayEndpoints {
    /// Root of the Snap API (transaction creation).
    pub snap_base_url: Url,
    /// Root of the Core API (transaction status).
    pub api_base_url: Url,
}

impl GatewayEndpoints {
    pub const SANDBOX_SNAP: &'static str = "https://app.sandbox.midtrans.com";
    pub const SANDBOX_API: &'static str = "https://api.sandbox.midtrans.com";
    pub const PRODUCTION_SNAP: &'static str = "https://app.midtrans.com";
    pub const PRODUCTION_API: &'static str = "https://api.midtrans.com";

    pub fn sandbox() -> Result<Self, url::ParseError> {
        Self::from_bases(Self::SANDBOX_SNAP, Self::SANDBOX_API)
    }

    pub fn production() -> Result<Self, url::ParseError> {
        Self::from_bases(Self::PRODUCTION_SNAP, Self::PRODUCTION_API)
    }

    /// Endpoints rooted at custom base URLs (e.g. a local stub gateway).
    pub fn from_bases(snap_base_url: &str, api_base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            snap_base_url: Url::parse(snap_base_url)?,
            api_base_url: Url::parse(api_base_url)?,
        })
    }

    fn transactions_url(&self) -> Result<Url, url::ParseError> {
        self.snap_base_url.join("/snap/v1/transactions")
    }

    fn status_url(&self, order_id: &str) -> Result<Url, url::ParseError> {
        self.api_base_url
            .join(&format!("/v2/{}/status", urlencoding::encode(order_id)))
    }
}

/// Typed HTTP client for the Midtrans Snap and Core APIs.
///
/// Every request is authenticated with HTTP Basic auth using the server
/// key as the username and an empty password, i.e.
/// `Authorization: Basic base64("{server_key}:")`.
#[derive(Clone)]
pub struct MidtransClient {
    http: Client,
    endpoints: GatewayEndpoints,
    server_key: String,
}

impl std::fmt::Debug for MidtransClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MidtransClient")
            .field("endpoints", &self.endpoints)
            .field("server_key", &"<redacted>")
            .finish()
    }
}

impl MidtransClient {
    /// Create a new `MidtransClient`.
    ///
    /// * `endpoints` – sandbox, production, or custom base URLs.
    /// * `server_key` – the merchant's server key.
    pub fn new(endpoints: GatewayEndpoints, server_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoints,
            server_key: server_key.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    pub fn endpoints(&self) -> &GatewayEndpoints {
        &self.endpoints
    }

    /// The server key, for notification signature checks.
    pub fn server_key(&self) -> &str {
        &self.server_key
    }

    /// `POST /snap/v1/transactions` – create a checkout session.
    pub async fn create_transaction(
        &self,
        request: &SnapTransactionRequest,
    ) -> Result<SnapTransactionResponse, GatewayError> {
        let url = self.endpoints.transactions_url()?;

        let resp = self
            .http
            .post(url)
            .basic_auth(&self.server_key, None::<&str>)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET /v2/{order_id}/status` – fetch the authoritative status of a
    /// transaction.
    pub async fn transaction_status(
        &self,
        order_id: &str,
    ) -> Result<TransactionStatusResponse, GatewayError> {
        let url = self.endpoints.status_url(order_id)?;

        let resp = self
            .http
            .get(url)
            .basic_auth(&self.server_key, None::<&str>)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        parse_response(resp).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, GatewayError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let error_messages = serde_json::from_str::<SnapErrorResponse>(&body)
            .map(|e| e.error_messages)
            .unwrap_or_default();
        tracing::debug!(%status, body = %body, "gateway returned an error status");
        return Err(GatewayError::Api {
            status,
            body,
            error_messages,
        });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(GatewayError::Json)
}
