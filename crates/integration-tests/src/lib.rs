//! Integration tests for Bistro.
//!
//! Each test spawns its own storefront on an ephemeral port and drives it
//! over HTTP with a cookie-keeping client, so every test has its own
//! session and payment registry.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bistro-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use bistro_storefront::app;
use bistro_storefront::config::{ConfigError, StorefrontConfig};
use bistro_storefront::state::AppState;
use tokio::task::JoinHandle;

/// A storefront running in the background for one test.
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a storefront whose simulated payments take `checkout_delay_ms`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is rejected or the listener
    /// cannot bind.
    pub async fn spawn(checkout_delay_ms: u64) -> Result<Self, Box<dyn std::error::Error>> {
        let config = test_config(checkout_delay_ms)?;
        let state = AppState::new(config);
        let router = app(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            // Ends when the test's runtime shuts down.
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn test_config(checkout_delay_ms: u64) -> Result<StorefrontConfig, ConfigError> {
    let delay = checkout_delay_ms.to_string();
    let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static");
    StorefrontConfig::from_lookup(|key| match key {
        "BISTRO_PORT" => Some("0".to_string()),
        "BISTRO_CHECKOUT_DELAY_MS" => Some(delay.clone()),
        "BISTRO_STATIC_DIR" => Some(static_dir.to_string()),
        _ => None,
    })
}

/// A client that keeps cookies and does not follow redirects.
///
/// # Errors
///
/// Returns an error if the TLS backend fails to initialize.
pub fn client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
}
