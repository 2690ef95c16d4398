use reqwest::blocking::{Client, ClientBuilder};
use once_cell::sync::Lazy;
use tracing::{debug, info};
use crate::cache::ResponseCache;
use crate::error::Result;

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

/// Anything that can perform a GET and hand back the body text.
pub trait HttpGet {
    fn get(&self, url: &str) -> Result<String>;
}

impl HttpGet for Client {
    fn get(&self, url: &str) -> Result<String> {
        let response = Client::get(self, url).send()?;
        let status = response.status();
        if !status.is_success() {
            // Body is kept regardless of status
            debug!("GET {} returned {}", url, status);
        }
        let body = response.text()?;
        Ok(body)
    }
}

/// Fetches URLs through the response cache.
pub struct Gateway<C = Client> {
    cache: ResponseCache,
    client: C,
}

impl Gateway<Client> {
    pub fn new(cache: ResponseCache) -> Self {
        Gateway::with_client(cache, CLIENT.clone())
    }
}

impl<C: HttpGet> Gateway<C> {
    pub fn with_client(cache: ResponseCache, client: C) -> Self {
        Gateway { cache, client }
    }

    /// Returns the cached body for `url`, or GETs it, stores it, flushes the
    /// cache to disk and returns it.
    pub fn fetch(&mut self, url: &str) -> Result<String> {
        if let Some(body) = self.cache.get(url) {
            info!("Using cache");
            debug!("Cache hit for URL: {}", url);
            return Ok(body.to_string());
        }

        info!("Fetching");
        debug!("Cache miss for URL: {}", url);
        let body = self.client.get(url)?;
        self.cache.insert(url, body.clone());
        // Keep memory in step with disk when the write fails
        if let Err(e) = self.cache.save() {
            self.cache.remove(url);
            return Err(e);
        }
        Ok(body)
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}
