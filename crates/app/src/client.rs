//! REST client for the canteen API.

use std::{fmt, time::Duration};

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Errors that can occur when talking to the canteen API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("request failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(error) => error.status().map(|status| status.as_u16()),
            Self::Decode(_) => None,
        }
    }

    /// Whether the session was rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Whether the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the request conflicts with existing state.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

/// Percent-encode a value for use as a single URL path segment.
pub fn path_segment(value: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return value.to_string();
    };

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(value);
    }

    url.path().trim_start_matches('/').to_string()
}

/// Thin JSON client over `reqwest`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|token| !token.trim().is_empty()),
            http,
        })
    }

    /// Whether requests carry a bearer token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status or bad body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::send(self.request(Method::GET, path)).await
    }

    /// `POST` a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status or bad body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        Self::send(self.request(Method::POST, path).json(body)).await
    }

    /// `PUT` a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status or bad body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        Self::send(self.request(Method::PUT, path).json(body)).await
    }

    /// `DELETE` a resource and decode the response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status or bad body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::send(self.request(Method::DELETE, path)).await
    }

    /// `DELETE` a resource, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-2xx status.
    pub async fn delete_empty(&self, path: &str) -> Result<(), ApiError> {
        Self::send_raw(self.request(Method::DELETE, path))
            .await
            .map(|_body| ())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = Uuid::now_v7();

        debug!(%method, path, %request_id, "sending api request");

        let request = self
            .http
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, request_id.to_string());

        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let body = Self::send_raw(request).await?;

        Ok(serde_json::from_str(&body)?)
    }

    async fn send_raw(request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!(status = status.as_u16(), "api request failed");

            return Err(ApiError::Status {
                status: status.as_u16(),
                body: error_body(status.as_u16(), response.text().await),
            });
        }

        let body = response.text().await?;

        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Ok("null".to_string());
        }

        Ok(body)
    }
}

/// Body of an error response. An unreadable body is logged and treated as empty.
fn error_body<E: fmt::Display>(status: u16, body: Result<String, E>) -> String {
    body.unwrap_or_else(|error| {
        debug!(status, %error, "failed to read api error body");

        String::new()
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn path_segment_escapes_url_delimiters() {
        assert_eq!(path_segment("ana@uni.edu"), "ana@uni.edu");
        assert_eq!(path_segment("a#b?c/d"), "a%23b%3Fc%2Fd");
        assert_eq!(path_segment("first last"), "first%20last");
    }

    #[test]
    fn unreadable_error_body_is_treated_as_empty() {
        let body: Result<String, std::io::Error> =
            Err(std::io::Error::other("connection reset"));

        assert_eq!(error_body(400, body), "");
        assert_eq!(error_body::<std::io::Error>(400, Ok("{}".to_string())), "{}");
    }

    #[test]
    fn url_joins_base_and_path_with_one_slash() -> TestResult {
        let client = ApiClient::new("http://localhost:5000/api/", None, Duration::from_secs(1))?;

        assert_eq!(client.url("/orders"), "http://localhost:5000/api/orders");
        assert_eq!(client.url("cart/items"), "http://localhost:5000/api/cart/items");

        Ok(())
    }

    #[test]
    fn blank_token_is_unauthenticated() -> TestResult {
        let anonymous =
            ApiClient::new("http://localhost", Some("  ".to_string()), Duration::from_secs(1))?;
        let signed_in =
            ApiClient::new("http://localhost", Some("abc".to_string()), Duration::from_secs(1))?;

        assert!(!anonymous.is_authenticated());
        assert!(signed_in.is_authenticated());

        Ok(())
    }

    #[test]
    fn status_errors_expose_their_code() {
        let unauthorized = ApiError::Status {
            status: 401,
            body: String::new(),
        };
        let missing = ApiError::Status {
            status: 404,
            body: String::new(),
        };

        assert!(unauthorized.is_unauthorized());
        assert!(!unauthorized.is_not_found());
        assert!(missing.is_not_found());
        assert_eq!(missing.status(), Some(404));
    }
}
