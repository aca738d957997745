//! Integration tests for Almacén.
//!
//! These tests drive a running stack over HTTP and are gated on environment
//! variables so `cargo test` stays green without one:
//!
//! ```bash
//! # Start the database and both binaries, then:
//! ALMACEN_TEST_STOREFRONT_URL=http://127.0.0.1:3000 \
//! ALMACEN_TEST_ADMIN_URL=http://127.0.0.1:3001 \
//! cargo test -p almacen-integration-tests
//! ```
//!
//! Each test constructs a [`TestContext`]; when the environment is not
//! configured the test returns early and reports success.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Shared context for integration tests.
pub struct TestContext {
    /// HTTP client with a cookie store, so session state carries across
    /// requests within one test.
    pub client: Client,
    /// Base URL of a running storefront binary.
    pub storefront_url: String,
    /// Base URL of a running admin binary.
    pub admin_url: String,
}

impl TestContext {
    /// Build a context from the environment, or `None` when the stack is
    /// not configured (tests should then skip).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let storefront_url = std::env::var("ALMACEN_TEST_STOREFRONT_URL").ok()?;
        let admin_url = std::env::var("ALMACEN_TEST_ADMIN_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3001".to_string());

        let client = Client::builder().cookie_store(true).build().ok()?;

        Some(Self {
            client,
            storefront_url,
            admin_url,
        })
    }

    /// URL under the storefront base.
    #[must_use]
    pub fn storefront(&self, path: &str) -> String {
        format!("{}{path}", self.storefront_url.trim_end_matches('/'))
    }

    /// URL under the admin base.
    #[must_use]
    pub fn admin(&self, path: &str) -> String {
        format!("{}{path}", self.admin_url.trim_end_matches('/'))
    }
}
