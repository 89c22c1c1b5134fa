//! HTTP transport for the JSON-RPC endpoint.
//!
//! The client talks to exactly one URL and always POSTs a JSON envelope, so
//! the [`Transport`] trait is a single `send`. The production implementation
//! wraps a pooled reqwest client; tests swap in the nullable one.

use crate::config::{ClientConfig, TlsPolicy};
use crate::error::ClientError;

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Transport-level failures, before any response envelope exists.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("could not connect: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Other(String),
}

/// Response body, split by whether it parsed as JSON.
///
/// rippled answers command failures with a JSON envelope and `status 200`,
/// so a non-JSON body means something other than the RPC handler replied
/// (a proxy, a crash page). The split lets the client report those usefully.
#[derive(Clone, Debug)]
pub enum ResponseBody {
    Json(Value),
    Raw(String),
}

/// What came back over the wire.
#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: u16,
    pub body: ResponseBody,
}

/// Anything that can POST a JSON-RPC envelope and return the response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, url: &str, body: &Value) -> Result<TransportResponse, TransportError>;
}

/// Production transport over a pooled reqwest client.
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Builds the underlying client from the config's timeouts and TLS policy.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if let Some(tls) = &config.tls {
            builder = apply_tls(builder, tls)?;
        }
        let http_client = builder
            .build()
            .map_err(|e| ClientError::Tls(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { http_client })
    }
}

fn apply_tls(
    mut builder: reqwest::ClientBuilder,
    tls: &TlsPolicy,
) -> Result<reqwest::ClientBuilder, ClientError> {
    if !tls.verify {
        builder = builder.danger_accept_invalid_certs(true);
    }
    if let Some(path) = &tls.ca_bundle {
        let pem = std::fs::read(path).map_err(|e| {
            ClientError::Tls(format!("cannot read CA bundle {}: {e}", path.display()))
        })?;
        let cert = reqwest::Certificate::from_pem(&pem)
            .map_err(|e| ClientError::Tls(format!("invalid CA bundle: {e}")))?;
        builder = builder.add_root_certificate(cert);
    }
    match (&tls.certificate, &tls.private_key) {
        (Some(cert_path), Some(key_path)) => {
            // The rustls identity wants certificate and key in one PEM bundle.
            let mut pem = std::fs::read(cert_path).map_err(|e| {
                ClientError::Tls(format!("cannot read certificate {}: {e}", cert_path.display()))
            })?;
            let key = std::fs::read(key_path).map_err(|e| {
                ClientError::Tls(format!("cannot read private key {}: {e}", key_path.display()))
            })?;
            pem.extend_from_slice(&key);
            let identity = reqwest::Identity::from_pem(&pem)
                .map_err(|e| ClientError::Tls(format!("invalid client identity: {e}")))?;
            builder = builder.identity(identity);
        }
        (None, None) => {}
        _ => {
            return Err(ClientError::Tls(
                "client certificate and private key must be configured together".to_string(),
            ));
        }
    }
    Ok(builder)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, url: &str, body: &Value) -> Result<TransportResponse, TransportError> {
        let response = self
            .http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(e.to_string())
                } else if e.is_connect() {
                    TransportError::Connect(e.to_string())
                } else {
                    TransportError::Other(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Other(format!("cannot read response body: {e}")))?;
        let body = match serde_json::from_str::<Value>(&text) {
            Ok(json) => ResponseBody::Json(json),
            Err(_) => ResponseBody::Raw(text),
        };
        Ok(TransportResponse { status, body })
    }
}
