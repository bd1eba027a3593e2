use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::retry::RetryPolicy;

/// A file body returned by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// JSON transport over the `/api` surface.
///
/// GETs are retried on transport failures according to the [`RetryPolicy`];
/// mutating requests are sent exactly once.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, retry: RetryPolicy) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::BackendOffline(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ClientResult<T> {
        let response = self.get_with_retry(path, token, |b| b).await?;
        decode(response).await
    }

    /// GET with `query` encoded into the query string.
    pub async fn get_query<Q, T>(&self, path: &str, token: Option<&str>, query: &Q) -> ClientResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.get_with_retry(path, token, |b| b.query(query)).await?;
        decode(response).await
    }

    pub async fn download<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &Q,
    ) -> ClientResult<Download> {
        let response = self.get_with_retry(path, token, |b| b.query(query)).await?;
        let response = ensure_success(response).await?;
        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE).unwrap_or_default();
        let filename = header(CONTENT_DISPOSITION).and_then(|d| attachment_filename(&d));
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?
            .to_vec();
        Ok(Download {
            filename,
            content_type,
            bytes,
        })
    }

    pub async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = once(self.request(method, path, token).json(body)).await?;
        decode(response).await
    }

    pub async fn send_text<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: String,
    ) -> ClientResult<T> {
        let builder = self
            .request(Method::POST, path, token)
            .header(CONTENT_TYPE, "text/csv; charset=utf-8")
            .body(body);
        decode(once(builder).await?).await
    }

    /// For endpoints answering `204 No Content`.
    pub async fn send_empty(&self, method: Method, path: &str, token: Option<&str>) -> ClientResult<()> {
        let response = once(self.request(method, path, token)).await?;
        ensure_success(response).await.map(|_| ())
    }

    async fn get_with_retry(
        &self,
        path: &str,
        token: Option<&str>,
        build: impl Fn(RequestBuilder) -> RequestBuilder,
    ) -> ClientResult<Response> {
        let attempts = self.retry.max_attempts.max(1);
        let mut last_error = String::new();
        for attempt in 1..=attempts {
            match build(self.request(Method::GET, path, token)).send().await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < attempts {
                        let delay = self.retry.backoff(attempt);
                        warn!(path, attempt, ?delay, error = %e, "GET failed, retrying");
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
        Err(ClientError::BackendOffline(last_error))
    }
}

async fn once(builder: RequestBuilder) -> ClientResult<Response> {
    builder
        .send()
        .await
        .map_err(|e| ClientError::BackendOffline(e.to_string()))
}

async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), %body, "request rejected");
    Err(ClientError::from_response(status, &body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let response = ensure_success(response).await?;
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// `attachment; filename="x.csv"` -> `x.csv`
fn attachment_filename(disposition: &str) -> Option<String> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_filename() {
        assert_eq!(
            attachment_filename("attachment; filename=\"report-summary-2026-03-01.csv\""),
            Some("report-summary-2026-03-01.csv".to_string())
        );
        assert_eq!(attachment_filename("inline"), None);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_reported_offline_after_retries() {
        let policy = RetryPolicy {
            max_attempts: 2,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(1),
        };
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(format!("http://{address}"), policy).unwrap();
        let result: ClientResult<serde_json::Value> = client.get("/health", None).await;
        assert!(matches!(result, Err(ClientError::BackendOffline(_))));
    }
}
