//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use account_api::{create_app, create_app_state, serve};
use account_common::AppConfig;
use anyhow::Result;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::Envelope;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with in-process backends and seeded accounts
    pub async fn start() -> Result<Self> {
        Self::start_with_config(AppConfig::in_memory()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {token}"))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::bearer(self.client.get(self.url(path)), token).send().await?)
    }

    /// Make a GET request presenting the token in a named header
    pub async fn get_with_header(&self, path: &str, header: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .header(header, token)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::bearer(self.client.post(self.url(path)), token).send().await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(Self::bearer(self.client.put(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::bearer(self.client.delete(self.url(path)), token).send().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Assert the response status and that the envelope code matches it;
/// returns the envelope
pub async fn assert_envelope<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<Envelope<T>> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected_status {
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }

    let envelope: Envelope<T> = serde_json::from_str(&body)?;
    if envelope.code != status.as_u16() {
        anyhow::bail!("Envelope code {} differs from status {status}", envelope.code);
    }
    Ok(envelope)
}

/// Assert a success envelope and return its data
pub async fn assert_data<T: DeserializeOwned>(response: Response) -> Result<T> {
    let envelope = assert_envelope::<T>(response, StatusCode::OK).await?;
    envelope
        .data
        .ok_or_else(|| anyhow::anyhow!("success envelope without data"))
}

/// Assert a failure envelope; returns its message
pub async fn assert_failure(response: Response, expected_status: StatusCode) -> Result<String> {
    let envelope = assert_envelope::<serde_json::Value>(response, expected_status).await?;
    if envelope.data.is_some() {
        anyhow::bail!("failure envelope carried data");
    }
    Ok(envelope.message)
}
