use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{Location, RouteRequest, RouteResult};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::service::{AuthSession, LocationCatalog, RoutingService};

pub const LOCATIONS_PATH: &str = "/locations";
pub const ROUTES_PATH: &str = "/routes";

/// The routing backend reached over HTTP with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    api_root: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_root: config.api_root.clone(),
            token: config.token.clone(),
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_root)
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::Unauthenticated)?;
        Ok(builder.bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = self.authorized(builder)?.send().await?;
        let body = checked_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// On failure the status is kept even if the body cannot be read.
async fn checked_body(response: Response) -> Result<String, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.text().await?);
    }
    let body = response.text().await.unwrap_or_else(|err| {
        tracing::debug!(%status, error = %err, "failed to read error body");
        String::new()
    });
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

impl AuthSession for HttpBackend {
    fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

impl LocationCatalog for HttpBackend {
    async fn fetch_all(&self) -> Result<Vec<Location>, ClientError> {
        let url = self.url(LOCATIONS_PATH);
        tracing::debug!(%url, "fetching location catalog");
        self.send(self.client.get(url)).await
    }
}

impl RoutingService for HttpBackend {
    async fn submit(&self, request: &RouteRequest) -> Result<RouteResult, ClientError> {
        let url = self.url(ROUTES_PATH);
        tracing::debug!(%url, "submitting route request");
        self.send(self.client.post(url).json(request)).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn config(token: Option<&str>) -> ClientConfig {
        ClientConfig {
            api_root: "http://localhost:8000".into(),
            token: token.map(str::to_string),
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_authenticated_requires_non_empty_token() {
        assert!(HttpBackend::new(&config(Some("abc"))).unwrap().is_authenticated());
        assert!(!HttpBackend::new(&config(Some(""))).unwrap().is_authenticated());
        assert!(!HttpBackend::new(&config(None)).unwrap().is_authenticated());
    }

    #[test]
    fn test_urls_join_api_root() {
        let backend = HttpBackend::new(&config(None)).unwrap();
        assert_eq!(backend.url(ROUTES_PATH), "http://localhost:8000/routes");
        assert_eq!(backend.api_root(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_sending() {
        let backend = HttpBackend::new(&config(None)).unwrap();
        let err = backend.fetch_all().await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthenticated));
        assert_eq!(err.status(), Some(401));
    }
}
