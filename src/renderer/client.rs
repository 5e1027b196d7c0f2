use async_trait::async_trait;
use reqwest::header::ACCEPT;
use url::Url;

use super::error::RenderError;
use super::render::NOTIFICATIONS_PATH;
use super::types::NotificationFeed;

/// Where the renderer gets its notification list from.
#[async_trait]
pub trait NotificationSource: Send + Sync {
    async fn fetch(&self) -> Result<NotificationFeed, RenderError>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Fetches `GET /notifications/` from a notification server.
#[derive(Clone)]
pub struct HttpNotificationSource {
    client: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpNotificationSource {
    pub fn new(config: ClientConfig) -> Result<Self, RenderError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Result<Self, RenderError> {
        let endpoint = config.base_url.join(NOTIFICATIONS_PATH)?;

        Ok(Self {
            client,
            endpoint,
            token: config.token,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl NotificationSource for HttpNotificationSource {
    async fn fetch(&self) -> Result<NotificationFeed, RenderError> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .header("X-Requested-With", "XMLHttpRequest");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
