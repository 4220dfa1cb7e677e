use std::collections::BTreeSet;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use forge_core::ChainSnapshot;

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum PeerError {
    #[error("invalid peer address: {0}")]
    InvalidAddress(String),
    #[error("peer unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
    #[error("peer returned status {0}")]
    BadStatus(StatusCode),
    #[error("malformed peer response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Known peers, kept as bare `host:port` authorities in sorted order so
/// enumeration is deterministic.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    nodes: BTreeSet<String>,
}

impl PeerRegistry {
    /// Normalize and record a peer address. Accepts full URLs and bare
    /// `host:port` forms; registering the same peer twice is a no-op.
    pub fn register(&mut self, address: &str) -> Result<String, PeerError> {
        let authority = authority_of(address)?;
        self.nodes.insert(authority.clone());
        Ok(authority)
    }

    /// Normalize and record a batch of addresses. If any address is invalid
    /// the whole batch is rejected and nothing is recorded.
    pub fn register_all(&mut self, addresses: &[String]) -> Result<(), PeerError> {
        let authorities = addresses
            .iter()
            .map(|address| authority_of(address))
            .collect::<Result<Vec<_>, _>>()?;
        self.nodes.extend(authorities);
        Ok(())
    }

    pub fn list(&self) -> Vec<String> {
        self.nodes.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Extract `host:port` from a peer address. Scheme-less addresses such as
/// `192.168.0.5:5000` or `localhost:5000` are retried as http URLs: the bare
/// parse either fails outright or mistakes the host for a scheme.
fn authority_of(address: &str) -> Result<String, PeerError> {
    let parsed = Url::parse(address)
        .ok()
        .filter(|url| url.host_str().is_some())
        .or_else(|| Url::parse(&format!("http://{address}")).ok())
        .ok_or_else(|| PeerError::InvalidAddress(address.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| PeerError::InvalidAddress(address.to_string()))?;
    Ok(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Fetch a peer's chain snapshot from its `/chain` endpoint.
pub async fn fetch_chain(client: &Client, authority: &str) -> Result<ChainSnapshot, PeerError> {
    let url = format!("http://{authority}/chain");
    let response = client.get(&url).timeout(FETCH_TIMEOUT).send().await?;
    if !response.status().is_success() {
        return Err(PeerError::BadStatus(response.status()));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
