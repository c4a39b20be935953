//! Test helpers for integration tests
//!
//! Provides a test server, HTTP shortcuts, and a small WebSocket client.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use chat_api::{create_app, create_app_state, serve};
use chat_common::AppConfig;
use chat_service::dto::{ActiveConnectionsResponse, LoginResponse, RegisterResponse};
use futures_util::{SinkExt, StreamExt};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::fixtures::Credentials;

/// How long a test waits for a frame or a state change
pub const WAIT: Duration = Duration::from_secs(5);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    shutdown: Option<oneshot::Sender<()>>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with in-memory storage
    pub async fn start() -> Result<Self> {
        Self::start_with_config(AppConfig::default()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            serve(listener, app, shutdown).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            shutdown: Some(tx),
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Register a user, expecting success
    pub async fn register(&self, credentials: &Credentials) -> Result<RegisterResponse> {
        let response = self.post("/user", credentials).await?;
        assert_json(response, StatusCode::CREATED).await
    }

    /// Log in, returning the WebSocket URL
    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        let response = self.post("/user/login", credentials).await?;
        let login: LoginResponse = assert_json(response, StatusCode::CREATED).await?;
        Ok(login.url)
    }

    /// Register a fresh user and open a chat connection for them
    pub async fn connect_new_user(&self) -> Result<(RegisterResponse, ChatClient)> {
        let credentials = Credentials::unique();
        let user = self.register(&credentials).await?;
        let url = self.login(&credentials).await?;
        let client = ChatClient::connect(&url).await?;
        Ok((user, client))
    }

    /// Current number of live connections
    pub async fn active_count(&self) -> Result<usize> {
        let response = self.get("/user/active/count").await?;
        let body: ActiveConnectionsResponse = assert_json(response, StatusCode::OK).await?;
        Ok(body.count)
    }

    /// Poll until the server reports `expected` live connections
    pub async fn wait_for_active(&self, expected: usize) -> Result<()> {
        let deadline = tokio::time::Instant::now() + WAIT;
        loop {
            let count = self.active_count().await?;
            if count == expected {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                anyhow::bail!("Expected {expected} active connections, still {count}");
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Minimal chat client over a WebSocket
pub struct ChatClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl ChatClient {
    /// Open a connection to a login URL
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _response) = connect_async(url).await?;
        Ok(Self { stream })
    }

    /// Send a chat message
    pub async fn send(&mut self, text: &str) -> Result<()> {
        self.stream.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Wait for the next chat message
    pub async fn recv(&mut self) -> Result<String> {
        loop {
            let frame = tokio::time::timeout(WAIT, self.stream.next())
                .await
                .map_err(|_| anyhow::anyhow!("Timed out waiting for a message"))?;

            match frame {
                Some(Ok(Message::Text(text))) => return Ok(text),
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
                Some(Ok(other)) => anyhow::bail!("Unexpected frame: {other:?}"),
                Some(Err(e)) => return Err(e.into()),
                None => anyhow::bail!("Connection closed"),
            }
        }
    }

    /// Close the connection
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status and parse the error envelope
pub async fn assert_error(
    response: Response,
    expected_status: StatusCode,
) -> Result<serde_json::Value> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    anyhow::ensure!(
        body["status"] == expected_status.as_u16(),
        "Envelope status mismatch: {body}"
    );
    Ok(body)
}
