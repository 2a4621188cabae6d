//! Polling client for the homework-review API.

use reqwest::header;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::{HomewatchError, Result};
use crate::types::Snapshot;
use crate::validate;

/// Keys an API-level failure may arrive under inside a 200 response.
const FAILURE_KEYS: [&str; 2] = ["error", "code"];

/// Bounds both polling and delivery requests so a stalled connection
/// cannot block the loop indefinitely.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ─── Poll seam ────────────────────────────────────────────────────────────

/// Source of submission snapshots. The run loop depends on this seam so
/// tests can substitute a scripted poller for the live client.
#[allow(async_fn_in_trait)]
pub trait Poll {
    async fn poll(&mut self, cursor: i64) -> Result<Snapshot>;
}

// ─── HomeworkClient ───────────────────────────────────────────────────────

/// Live client: GET `<endpoint>?from_date=<cursor>` with an
/// `Authorization: OAuth <token>` header.
pub struct HomeworkClient {
    http: reqwest::Client,
    endpoint: String,
    auth_header: String,
}

impl HomeworkClient {
    pub fn new(endpoint: &str, token: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| HomewatchError::Transport {
                url: endpoint.to_string(),
                source,
            })?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            auth_header: format!("OAuth {token}"),
        })
    }
}

impl Poll for HomeworkClient {
    async fn poll(&mut self, cursor: i64) -> Result<Snapshot> {
        debug!(cursor, url = %self.endpoint, "polling for submissions");

        let response = self
            .http
            .get(&self.endpoint)
            .header(header::AUTHORIZATION, &self.auth_header)
            .query(&[("from_date", cursor)])
            .send()
            .await
            .map_err(|source| HomewatchError::Transport {
                url: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(HomewatchError::BadStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
                cursor,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|source| HomewatchError::BadBody {
                url: self.endpoint.clone(),
                source,
            })?;

        // A failure the API embeds in a 200 body is still a failure.
        for key in FAILURE_KEYS {
            if let Some(value) = payload.get(key) {
                return Err(HomewatchError::ApiReported {
                    key,
                    value: value.to_string(),
                    cursor,
                });
            }
        }

        validate::check_response(&payload)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mockito::Matcher;

    fn from_date(cursor: &str) -> Matcher {
        Matcher::UrlEncoded("from_date".into(), cursor.into())
    }

    #[tokio::test]
    async fn poll_returns_typed_snapshot() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(from_date("0"))
            .match_header("authorization", "OAuth token-123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"homeworks":[{"homework_name":"hw1","status":"approved","date_updated":1700000000}],"current_date":1700000100}"#,
            )
            .create_async()
            .await;

        let mut client = HomeworkClient::new(&server.url(), "token-123").unwrap();
        let snapshot = client.poll(0).await.unwrap();

        mock.assert_async().await;
        assert_eq!(snapshot.homeworks.len(), 1);
        assert_eq!(snapshot.homeworks[0].homework_name.as_deref(), Some("hw1"));
        assert_eq!(snapshot.homeworks[0].date_updated, Some(1_700_000_000));
        assert_eq!(snapshot.current_date, Some(1_700_000_100));
    }

    #[tokio::test]
    async fn poll_passes_cursor_as_from_date() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(from_date("1700000000"))
            .with_status(200)
            .with_body(r#"{"homeworks":[],"current_date":1700000200}"#)
            .create_async()
            .await;

        let mut client = HomeworkClient::new(&server.url(), "t").unwrap();
        let snapshot = client.poll(1_700_000_000).await.unwrap();

        mock.assert_async().await;
        assert!(snapshot.homeworks.is_empty());
    }

    #[tokio::test]
    async fn non_ok_status_is_a_protocol_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let mut client = HomeworkClient::new(&server.url(), "t").unwrap();
        let err = client.poll(0).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert!(matches!(err, HomewatchError::BadStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn embedded_error_key_is_not_ignored() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"error":"not_found"}"#)
            .create_async()
            .await;

        let mut client = HomeworkClient::new(&server.url(), "t").unwrap();
        let err = client.poll(0).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Protocol);
        let HomewatchError::ApiReported { key, value, .. } = err else {
            panic!("expected ApiReported, got {err:?}")
        };
        assert_eq!(key, "error");
        assert_eq!(value, r#""not_found""#);
    }

    #[tokio::test]
    async fn embedded_code_key_is_not_ignored() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"code":"UnknownError"}"#)
            .create_async()
            .await;

        let mut client = HomeworkClient::new(&server.url(), "t").unwrap();
        let err = client.poll(0).await.unwrap_err();

        assert!(matches!(err, HomewatchError::ApiReported { key: "code", .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_a_protocol_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<!doctype html>")
            .create_async()
            .await;

        let mut client = HomeworkClient::new(&server.url(), "t").unwrap();
        let err = client.poll(0).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert!(matches!(err, HomewatchError::BadBody { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Nothing listens on the discard port; connection is refused fast.
        let mut client = HomeworkClient::new("http://127.0.0.1:9", "t").unwrap();
        let err = client.poll(0).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn shape_errors_surface_through_poll() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"current_date":1}"#)
            .create_async()
            .await;

        let mut client = HomeworkClient::new(&server.url(), "t").unwrap();
        let err = client.poll(0).await.unwrap_err();
        assert!(matches!(err, HomewatchError::MissingKey("homeworks")));
    }
}
