//! HTTP transport for the directory API.

use crate::error::{ClientError, Result, TransportError};
use crate::types::{ClientConfig, QueryParams};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

/// Error payload the API sends alongside non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// GET-only client bound to a single base URL.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```ignore
/// use directory_client::{ApiClient, ClientConfig, QueryParams};
/// use directory_core::UsersResponse;
///
/// let client = ApiClient::new(ClientConfig::default())?;
/// let params = QueryParams::new().with("limit", 12).with("skip", 0);
/// let page: UsersResponse = client.get("/users", &params).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> std::result::Result<Self, ClientError> {
        // Validate URL
        if config.base_url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("userdir/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The normalised base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL for `endpoint` with `params` appended in order.
    pub fn url_for(&self, endpoint: &str, params: &QueryParams) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))
            .map_err(|e| TransportError::network(format!("Invalid request URL: {}", e)))?;

        if !params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in params.iter() {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Issue a GET for `endpoint` and decode the JSON body as `T`.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &QueryParams) -> Result<T> {
        let url = self.url_for(endpoint, params)?;
        debug!(url = %url, "GET");

        let response = self
            .http
            .get(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Request failed before a response arrived");
                TransportError::network(e.to_string())
            })?;

        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = error_from_body(status, &body);
            warn!(status = status.as_u16(), message = %error.message, "Request rejected");
            return Err(error);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::new(e.to_string(), status.as_u16()))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            TransportError::new(format!("Failed to parse response: {}", e), status.as_u16())
        })
    }
}

/// Turn a non-2xx body into a [`TransportError`].
///
/// A JSON body with a non-empty `message` wins; JSON without one yields
/// "Request failed with status N"; anything else falls back to
/// "HTTP Error N Reason".
fn error_from_body(status: StatusCode, body: &str) -> TransportError {
    let code = status.as_u16();

    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
        }) if !message.is_empty() => message,
        Ok(_) => format!("Request failed with status {}", code),
        Err(_) => format!(
            "HTTP Error {} {}",
            code,
            status.canonical_reason().unwrap_or_default()
        )
        .trim_end()
        .to_string(),
    };

    TransportError::new(message, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(ApiClient::new(ClientConfig::new("https://dummyjson.com")).is_ok());
        assert!(ApiClient::new(ClientConfig::new("http://localhost:8080")).is_ok());

        // Invalid URLs
        assert!(ApiClient::new(ClientConfig::new("")).is_err());
        assert!(ApiClient::new(ClientConfig::new("not-a-url")).is_err());
        assert!(ApiClient::new(ClientConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = ApiClient::new(ClientConfig::new("https://example.com//")).expect("valid url");
        assert_eq!(client.base_url(), "https://example.com");
    }

    #[test]
    fn test_url_for_encodes_params_in_order() {
        let client = ApiClient::new(ClientConfig::new("https://example.com")).expect("valid url");
        let params = QueryParams::new()
            .with("q", "a b&c")
            .with("limit", 12)
            .with("skip", 24);

        let url = client.url_for("/users/search", &params).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/users/search?q=a+b%26c&limit=12&skip=24"
        );
    }

    #[test]
    fn test_url_for_without_params_has_no_query() {
        let client = ApiClient::new(ClientConfig::new("https://example.com")).expect("valid url");
        let url = client.url_for("/users/5", &QueryParams::new()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/users/5");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_error_from_body_variants() {
        let err = error_from_body(StatusCode::NOT_FOUND, r#"{"message":"User with id '0' not found"}"#);
        assert_eq!(err.message, "User with id '0' not found");
        assert_eq!(err.status, 404);

        let err = error_from_body(StatusCode::BAD_REQUEST, "{}");
        assert_eq!(err.message, "Request failed with status 400");

        let err = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err.message, "HTTP Error 500 Internal Server Error");

        let err = error_from_body(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.message, "HTTP Error 502 Bad Gateway");
    }
}
