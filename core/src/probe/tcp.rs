//! Unprivileged liveness check through a TCP handshake.
//!
//! A host that completes the handshake or actively refuses it is up. Only
//! silence (timeout) or an unreachable route counts as down.

use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use async_trait::async_trait;
use pingsweep_common::config::ProbeConfig;
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::Prober;

pub const DEFAULT_TCP_PORT: u16 = 443;

pub struct TcpProber {
    port: u16,
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(DEFAULT_TCP_PORT)
    }
}

impl TcpProber {
    pub fn new(port: u16) -> Self {
        Self { port }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, addr: Ipv4Addr, cfg: &ProbeConfig) -> anyhow::Result<bool> {
        let socket_addr: SocketAddr = SocketAddr::new(IpAddr::V4(addr), self.port);

        for _ in 0..cfg.count() {
            match timeout(cfg.timeout(), TcpStream::connect(socket_addr)).await {
                Ok(Ok(_)) => return Ok(true),
                Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => return Ok(true),
                Ok(Err(_)) | Err(_) => continue,
            }
        }

        Ok(false)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn cfg() -> ProbeConfig {
        ProbeConfig::new(1, Duration::from_millis(500)).unwrap()
    }

    #[tokio::test]
    async fn tcp_probe_should_find_listening_port() {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let alive = TcpProber::new(port)
            .probe(Ipv4Addr::LOCALHOST, &cfg())
            .await
            .unwrap();
        assert!(alive);
    }

    #[tokio::test]
    async fn tcp_probe_should_treat_refusal_as_alive() {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let alive = TcpProber::new(port)
            .probe(Ipv4Addr::LOCALHOST, &cfg())
            .await
            .unwrap();
        assert!(alive);
    }

    #[tokio::test]
    #[ignore]
    async fn tcp_probe_should_timeout_on_unreachable_ip() {
        let alive = TcpProber::default()
            .probe(Ipv4Addr::new(203, 0, 113, 1), &cfg())
            .await
            .unwrap();
        assert!(!alive);
    }
}
