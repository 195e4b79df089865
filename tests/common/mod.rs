#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use bookshelf_api::{
    app,
    auth::JwtKeys,
    config::AppConfig,
    store::{DocumentStore, MemoryStore},
    AppState,
};

pub const TEST_SECRET: &str = "integration-test-secret";

/// An in-process server with its own empty store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub keys: JwtKeys,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.security.jwt_secret = TEST_SECRET.to_string();
        let keys = JwtKeys::from_config(&config.security)?;

        let store = Arc::new(MemoryStore::new());
        let shared: Arc<dyn DocumentStore> = store.clone();
        let state = AppState::new(shared, keys.clone(), config);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            port,
            base_url,
            store,
            keys,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A valid bearer token for guarded routes
    pub fn token(&self) -> Result<String> {
        Ok(self.keys.issue(json!({ "email": "admin@bookshelf.test" }))?)
    }

    pub fn bearer(&self) -> Result<String> {
        Ok(format!("Bearer {}", self.token()?))
    }

    /// POST /book with a valid token, returning the inserted id
    pub async fn create_book(&self, book: Value) -> Result<String> {
        let res = self
            .client
            .post(self.url("/book"))
            .header("Authorization", self.bearer()?)
            .json(&book)
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "create failed: {}", res.status());
        let ack: Value = res.json().await?;
        ack["insertedId"]
            .as_str()
            .map(str::to_string)
            .context("insert ack missing insertedId")
    }
}
