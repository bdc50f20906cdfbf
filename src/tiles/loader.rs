use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::StatusCode;
use std::sync::Mutex;

use crate::{prelude::HashMap, MapError, Result};

/// Shared async HTTP client with a custom User-Agent so that public tile
/// servers don't reject the request. Building the client once avoids the
/// cost of TLS and connection pool setup for every tile.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("tilestack/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(30))
        .pool_max_idle_per_host(16)
        .build()
        .unwrap_or_else(|e| {
            log::warn!("falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
});

/// Fetches raw tile bytes by URL.
#[async_trait]
pub trait TileFetcher: Send + Sync {
    /// `Ok(None)` means the server has no tile at this address.
    async fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>>;
}

/// Fetches tiles over HTTP. Each call is a single request: no retries, no cache.
#[derive(Debug, Clone)]
pub struct HttpTileFetcher {
    client: reqwest::Client,
}

impl HttpTileFetcher {
    pub fn new() -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTileFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TileFetcher for HttpTileFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>> {
        log::debug!("fetch tile {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        // Tile servers answer blank tiles with 404 or an empty 204
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            log::debug!("no tile at {} (HTTP {})", url, status.as_u16());
            return Ok(None);
        }
        if !status.is_success() {
            return Err(MapError::TileStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        log::debug!("downloaded tile {} ({} bytes)", url, bytes.len());
        Ok(Some(bytes.to_vec()))
    }
}

/// Serves tiles from memory, e.g. tiles fetched earlier or generated locally.
///
/// URLs that were never inserted behave like a 404. Every request is
/// recorded so callers can see which tiles were asked for.
#[derive(Debug, Default)]
pub struct MemoryTileFetcher {
    tiles: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryTileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.tiles.insert(url.into(), bytes);
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TileFetcher for MemoryTileFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        Ok(self.tiles.get(url).cloned())
    }
}
