// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Upstream menu dataset retrieval.
//!
//! Sources are async so that dropping a session's fetch task also drops the request.
//! [`Fetcher`] turns each outcome into exactly one session event.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::model::Restaurant;
use crate::session::Event;

mod cache;

pub use cache::MenuCache;

pub const UNICAFE_API: &str = "https://unicafe.fi/wp-json/swiss/v1/restaurants/?lang=fi";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid menu payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read menus: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can produce the full restaurant dataset.
#[async_trait]
pub trait MenuSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Restaurant>, FetchError>;

    fn describe(&self) -> String {
        "menu source".to_owned()
    }
}

#[async_trait]
impl<F> MenuSource for F
where
    F: Fn() -> Result<Vec<Restaurant>, FetchError> + Send + Sync,
{
    async fn fetch(&self) -> Result<Vec<Restaurant>, FetchError> {
        self()
    }
}

/// The public Unicafe restaurant API.
pub struct UnicafeSource {
    url: String,
    client: reqwest::Client,
}

impl UnicafeSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("unari/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| FetchError::Http { url: url.clone(), message: error.to_string() })?;
        Ok(Self { url, client })
    }

    fn http_error(&self, error: reqwest::Error) -> FetchError {
        FetchError::Http { url: self.url.clone(), message: error.to_string() }
    }
}

impl fmt::Debug for UnicafeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnicafeSource").field("url", &self.url).finish_non_exhaustive()
    }
}

#[async_trait]
impl MenuSource for UnicafeSource {
    async fn fetch(&self) -> Result<Vec<Restaurant>, FetchError> {
        let response =
            self.client.get(&self.url).send().await.map_err(|error| self.http_error(error))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: self.url.clone(), status: status.as_u16() });
        }
        let body = response.text().await.map_err(|error| self.http_error(error))?;
        decode_restaurants(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// A JSON dump of the upstream payload on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MenuSource for FileSource {
    async fn fetch(&self) -> Result<Vec<Restaurant>, FetchError> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        decode_restaurants(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub fn decode_restaurants(body: &str) -> Result<Vec<Restaurant>, FetchError> {
    Ok(serde_json::from_str(body)?)
}

/// A source plus the optional process-wide cache in front of it.
#[derive(Clone)]
pub struct Fetcher {
    source: Arc<dyn MenuSource>,
    cache: Option<Arc<MenuCache>>,
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("source", &self.source.describe())
            .field("cache", &self.cache)
            .finish()
    }
}

impl Fetcher {
    pub fn new(source: Arc<dyn MenuSource>, cache: Option<Arc<MenuCache>>) -> Self {
        Self { source, cache }
    }

    /// Serves a live cache entry when there is one.
    pub async fn load(&self) -> Result<Vec<Restaurant>, FetchError> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get().await {
                debug!(restaurants = hit.len(), "serving menus from cache");
                return Ok(hit.as_ref().clone());
            }
        }
        self.refresh().await
    }

    /// Always asks the source; a success replaces the cache entry.
    pub async fn refresh(&self) -> Result<Vec<Restaurant>, FetchError> {
        let restaurants = self.source.fetch().await?;
        if let Some(cache) = &self.cache {
            cache.store(restaurants.clone()).await;
        }
        Ok(restaurants)
    }

    /// Loads once and reports the outcome as `DataLoaded` or `DataFailed`.
    pub async fn load_event(&self) -> Event {
        let result = self.load().await;
        self.event(result)
    }

    /// Like [`Fetcher::load_event`], bypassing the cache.
    pub async fn refresh_event(&self) -> Event {
        let result = self.refresh().await;
        self.event(result)
    }

    fn event(&self, result: Result<Vec<Restaurant>, FetchError>) -> Event {
        match result {
            Ok(restaurants) => {
                debug!(restaurants = restaurants.len(), "menus loaded");
                Event::DataLoaded(restaurants)
            }
            Err(error) => {
                warn!(source = %self.source.describe(), %error, "menu fetch failed");
                Event::DataFailed(error.to_string())
            }
        }
    }
}
