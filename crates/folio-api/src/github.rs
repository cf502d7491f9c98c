use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "folio/0.1.0";

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("API request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GitHubError {
    /// True when the failure came from the response body rather than the transport
    pub fn is_parse_error(&self) -> bool {
        matches!(self, GitHubError::Parse(_))
    }
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Repository as returned by `GET /users/{account}/repos`
///
/// Only the fields folio renders are kept; serde ignores the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitHubRepo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    pub updated_at: DateTime<Utc>,
}

pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    /// `GITHUB_API_BASE` for github.com, or GitHub Enterprise / a local test server
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List an account's public repositories, most recently updated first
    ///
    /// One request, one page, no retry. A failed status is reported as-is so
    /// the caller can decide what "unreachable" means for the whole load.
    pub async fn list_user_repos(&self, account: &str) -> Result<Vec<GitHubRepo>> {
        let url = format!("{}/users/{}/repos", self.base_url, account);

        let response = self
            .client
            .get(&url)
            .query(&[("sort", "updated")])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GitHubError::NotFound(account.to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GitHubError::RateLimitExceeded);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        // Read the body first so a malformed payload surfaces as a parse
        // error instead of being folded into reqwest's decode error.
        let body = response.text().await?;
        let repos = parse_repos(&body)?;
        debug!("Fetched {} repositories for {}", repos.len(), account);
        Ok(repos)
    }
}

/// Parse a `/repos` response body
pub fn parse_repos(body: &str) -> Result<Vec<GitHubRepo>> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response and hand back the request line
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_parse_repos_ignores_extra_fields() {
        let body = r#"[
            {"id": 1, "name": "HackerGO", "description": null,
             "html_url": "https://github.com/a/HackerGO",
             "updated_at": "2024-01-01T00:00:00Z", "stargazers_count": 3},
            {"name": "foo", "html_url": "https://github.com/a/foo",
             "updated_at": "2024-06-01T12:30:00Z"}
        ]"#;

        let repos = parse_repos(body).unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "HackerGO");
        assert_eq!(repos[0].description, None);
        assert_eq!(repos[1].description, None);
        assert!(repos[1].updated_at > repos[0].updated_at);
    }

    #[test]
    fn test_parse_repos_rejects_non_array() {
        let err = parse_repos(r#"{"message": "Not Found"}"#).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_parse_repos_rejects_bad_timestamp() {
        let body = r#"[{"name": "x", "html_url": "u", "updated_at": "yesterday"}]"#;
        assert!(parse_repos(body).unwrap_err().is_parse_error());
    }

    #[tokio::test]
    async fn test_list_user_repos_requests_sorted_by_updated() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"name":"foo","description":"bar","html_url":"https://github.com/a/foo","updated_at":"2024-06-01T00:00:00Z"}]"#,
        )
        .await;

        let client = GitHubClient::with_base_url(base).unwrap();
        assert!(!client.base_url().ends_with('/'));
        let repos = client.list_user_repos("someone").await.unwrap();
        let request_line = server.await.unwrap();

        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].description.as_deref(), Some("bar"));
        assert!(request_line.starts_with("GET /users/someone/repos?sort=updated"));
    }

    #[tokio::test]
    async fn test_list_user_repos_reports_failed_status() {
        let (base, server) = serve_once("500 Internal Server Error", "oops").await;

        let client = GitHubClient::with_base_url(base).unwrap();
        let err = client.list_user_repos("someone").await.unwrap_err();
        server.await.unwrap();

        match err {
            GitHubError::RequestFailed { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "oops");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_user_repos_reports_malformed_body() {
        let (base, server) = serve_once("200 OK", "not json").await;

        let client = GitHubClient::with_base_url(base).unwrap();
        let err = client.list_user_repos("someone").await.unwrap_err();
        server.await.unwrap();

        assert!(err.is_parse_error());
    }
}
