//! Client configuration: endpoint, scheme, timeouts, TLS policy.

use rippled_types::params::{PORT_MAX, PORT_MIN};
use rippled_types::ValidationError;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Where and how to reach a rippled node.
///
/// Deserializable so applications can embed it in their own config files;
/// unset fields fall back to the defaults below.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Node hostname or IP address.
    pub host: String,

    /// Node RPC port.
    pub port: u16,

    /// Use https:// instead of http://.
    #[serde(default)]
    pub https: bool,

    /// TLS policy, only meaningful together with `https`.
    #[serde(default)]
    pub tls: Option<TlsPolicy>,

    /// Overall request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// TLS options for nodes served over https.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TlsPolicy {
    /// Verify the server certificate. Disable only against test nodes.
    #[serde(default = "default_verify")]
    pub verify: bool,

    /// Client certificate PEM path, paired with `private_key`.
    #[serde(default)]
    pub certificate: Option<PathBuf>,

    /// Client private key PEM path (unencrypted).
    #[serde(default)]
    pub private_key: Option<PathBuf>,

    /// Extra CA bundle PEM path for private deployments.
    #[serde(default)]
    pub ca_bundle: Option<PathBuf>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_verify() -> bool {
    true
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            https: false,
            tls: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    /// Switch the scheme to https.
    pub fn https(mut self) -> Self {
        self.https = true;
        self
    }

    /// Attach a TLS policy (implies https).
    pub fn with_tls(mut self, tls: TlsPolicy) -> Self {
        self.https = true;
        self.tls = Some(tls);
        self
    }

    /// Checks host grammar and port range before any connection attempt.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_valid_host(&self.host) {
            return Err(ValidationError::InvalidHost(self.host.clone()));
        }
        if self.port < PORT_MIN || self.port > PORT_MAX {
            return Err(ValidationError::InvalidPort(self.port));
        }
        Ok(())
    }

    /// The single URL every command posts to.
    pub fn base_url(&self) -> String {
        let scheme = if self.https { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}

impl Default for TlsPolicy {
    fn default() -> Self {
        Self {
            verify: true,
            certificate: None,
            private_key: None,
            ca_bundle: None,
        }
    }
}

/// A hostname (dot-separated labels, each a letter followed by at least one
/// more alphanumeric or hyphen) or an IP literal.
pub fn is_valid_host(host: &str) -> bool {
    if host.parse::<IpAddr>().is_ok() {
        return true;
    }
    !host.is_empty()
        && host.split('.').all(|label| {
            label.len() >= 2
                && label
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic())
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostnames_and_ips_accepted() {
        assert!(is_valid_host("localhost"));
        assert!(is_valid_host("s1.ripple.com"));
        assert!(is_valid_host("xrp-node01.example.net"));
        assert!(is_valid_host("127.0.0.1"));
        assert!(is_valid_host("::1"));
    }

    #[test]
    fn bad_hostnames_rejected() {
        assert!(!is_valid_host(""));
        assert!(!is_valid_host("a.b")); // labels too short
        assert!(!is_valid_host("1host.com")); // label starts with a digit
        assert!(!is_valid_host("host..com")); // empty label
        assert!(!is_valid_host("ho st.com"));
    }

    #[test]
    fn port_bounds_enforced() {
        let mut config = ClientConfig::new("localhost", 5005);
        assert!(config.validate().is_ok());
        config.port = 999;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPort(999))
        ));
        config.port = 65535;
        assert!(config.validate().is_err());
        config.port = 65534;
        assert!(config.validate().is_ok());
        config.port = 1000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn base_url_follows_scheme() {
        let config = ClientConfig::new("localhost", 5005);
        assert_eq!(config.base_url(), "http://localhost:5005");
        let config = ClientConfig::new("s1.ripple.com", 51234).https();
        assert_eq!(config.base_url(), "https://s1.ripple.com:51234");
    }

    #[test]
    fn with_tls_implies_https() {
        let config = ClientConfig::new("localhost", 5005).with_tls(TlsPolicy::default());
        assert!(config.https);
        assert!(config.tls.as_ref().is_some_and(|t| t.verify));
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"host": "localhost", "port": 5005}"#).unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.connect_timeout_secs, 10);
        assert!(!config.https);
        assert!(config.tls.is_none());
    }
}
