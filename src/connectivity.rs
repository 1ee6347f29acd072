//! Cheap, time-bounded reachability check.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tracing::debug;

/// Default probe target: a public DNS resolver.
pub const DEFAULT_PROBE_HOST: &str = "8.8.8.8";
pub const DEFAULT_PROBE_PORT: u16 = 53;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Where and how long to probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PROBE_HOST.to_string(),
            port: DEFAULT_PROBE_PORT,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

/// Classifies the environment as online or offline.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn is_online(&self) -> bool;
}

/// Probe that opens a TCP connection to a configured endpoint.
#[derive(Debug, Clone, Default)]
pub struct TcpProbe {
    config: ProbeConfig,
}

impl TcpProbe {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }
}

#[async_trait]
impl ConnectivityProbe for TcpProbe {
    async fn is_online(&self) -> bool {
        is_online(&self.config.host, self.config.port, self.config.timeout).await
    }
}

/// Probe with a fixed answer, for hosts that track connectivity themselves.
#[derive(Debug, Clone, Copy)]
pub struct StaticProbe(pub bool);

#[async_trait]
impl ConnectivityProbe for StaticProbe {
    async fn is_online(&self) -> bool {
        self.0
    }
}

/// Try to connect to `host:port` within `timeout`.
///
/// Returns `true` only if the connection is established. The stream is
/// dropped before returning.
pub async fn is_online(host: &str, port: u16, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(_stream)) => true,
        Ok(Err(e)) => {
            debug!(host, port, error = %e, "connectivity probe failed");
            false
        }
        Err(_) => {
            debug!(host, port, timeout_ms = timeout.as_millis() as u64, "connectivity probe timed out");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn reachable_listener_is_online() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        assert!(is_online("127.0.0.1", port, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn closed_port_is_offline() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let probe = TcpProbe::new(ProbeConfig {
            host: "127.0.0.1".into(),
            port,
            timeout: Duration::from_secs(1),
        });
        assert!(!probe.is_online().await);
    }

    #[tokio::test]
    async fn unresolvable_host_is_offline() {
        assert!(!is_online("host.invalid", 53, Duration::from_millis(500)).await);
    }

    #[test]
    fn default_target_is_public_dns() {
        let config = ProbeConfig::default();
        assert_eq!(config.host, "8.8.8.8");
        assert_eq!(config.port, 53);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }
}
