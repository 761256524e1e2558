//! Consul KV client for the config store.

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::ConfigSource;
use crate::error::{Error, Result};

const DEFAULT_ADDR: &str = "http://127.0.0.1:8500";

/// Blocking reader for the Consul KV HTTP API.
///
/// The endpoint comes from `CONSUL_HTTP_ADDR`, falling back to the local
/// agent, which matches the ambient-client behavior of the standard Consul
/// tooling.
#[derive(Debug, Clone)]
pub struct ConsulKv {
    client: Client,
    addr: String,
}

impl ConsulKv {
    pub fn new(addr: impl Into<String>) -> Self {
        let mut addr = addr.into();
        while addr.ends_with('/') {
            addr.pop();
        }
        Self {
            client: Client::new(),
            addr,
        }
    }

    /// Build a client against `CONSUL_HTTP_ADDR`, or the local agent if unset.
    pub fn from_env() -> Self {
        let addr = std::env::var("CONSUL_HTTP_ADDR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        Self::new(addr)
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl ConfigSource for ConsulKv {
    fn fetch_raw(&self, key: &str) -> Result<String> {
        // `?raw` returns the stored bytes directly instead of the base64
        // JSON envelope, so the value can be handed straight to the parser.
        let url = format!("{}/v1/kv/{key}?raw", self.addr);
        debug!(%url, "fetching config value");
        let unavailable = |reason: String| Error::ConfigUnavailable {
            key: key.to_string(),
            reason,
        };
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| unavailable(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP {status}")));
        }
        response.text().map_err(|err| unavailable(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slashes() {
        let kv = ConsulKv::new("http://consul.internal:8500///");
        assert_eq!(kv.addr(), "http://consul.internal:8500");
    }

    #[test]
    fn unreachable_endpoint_maps_to_unavailable() {
        // Nothing listens on port 1; the connect is refused immediately.
        let kv = ConsulKv::new("http://127.0.0.1:1");
        let err = kv.fetch_raw("config/honeydew").unwrap_err();
        assert!(matches!(err, Error::ConfigUnavailable { .. }));
    }
}
