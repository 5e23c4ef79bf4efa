//! HTTP client for the remote wishlist API

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, StatusCode};
use url::Url;

use eventhub_domain::{Credential, EventId};
use eventhub_shared::{StatusResponse, WishlistListResponse};

use crate::application::config::ClientConfig;
use crate::ports::outbound::{ApiError, MutationAck, WishlistApiPort};

/// Client for the `wishlist/` REST endpoints
#[derive(Clone)]
pub struct WishlistHttpClient {
    client: Client,
    base_url: Url,
    success_code: i64,
}

impl WishlistHttpClient {
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.api_base_url.clone(),
            success_code: config.success_code,
        }
    }

    /// Build `{base}/{segments...}/`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("'{}' cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder, credential: &Credential) -> RequestBuilder {
        request
            .header(AUTHORIZATION, credential.bearer_header())
            .header(ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(map_send_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_send_error)?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(body)
    }

    async fn mutate(&self, request: RequestBuilder) -> Result<MutationAck, ApiError> {
        let body = self.send(request).await?;
        let response: StatusResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))?;

        if !response.is_success(self.success_code) {
            return Err(ApiError::Rejected {
                status_code: response.status_code,
                message: response.message(),
            });
        }
        Ok(MutationAck {
            message: response.message(),
        })
    }
}

#[async_trait]
impl WishlistApiPort for WishlistHttpClient {
    async fn list(&self, credential: &Credential) -> Result<Vec<EventId>, ApiError> {
        let url = self.endpoint(&["wishlist"])?;
        let body = self
            .send(self.authorized(self.client.get(url), credential))
            .await?;

        let listing: WishlistListResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))?;
        if !listing.is_success(self.success_code) {
            return Err(ApiError::Rejected {
                status_code: listing.status_code.unwrap_or_default(),
                message: None,
            });
        }
        Ok(listing.event_ids().cloned().collect())
    }

    async fn add(
        &self,
        credential: &Credential,
        event_id: &EventId,
    ) -> Result<MutationAck, ApiError> {
        let url = self.endpoint(&["wishlist", "add", event_id.as_str()])?;
        self.mutate(self.authorized(self.client.post(url), credential))
            .await
    }

    async fn remove(
        &self,
        credential: &Credential,
        event_id: &EventId,
    ) -> Result<MutationAck, ApiError> {
        let url = self.endpoint(&["wishlist", "remove", event_id.as_str()])?;
        self.mutate(self.authorized(self.client.delete(url), credential))
            .await
    }
}

fn map_send_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Transport(e.to_string())
    }
}

/// Pull a human-readable message out of an error body, if it has one.
fn error_message(body: &str) -> Option<String> {
    if let Ok(status) = serde_json::from_str::<StatusResponse>(body) {
        return status.message();
    }
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "detail", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::time::Duration;

    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    const TOKEN: &str = "token-abc";

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map_or(false, |v| v == format!("Bearer {}", TOKEN))
    }

    async fn list(headers: HeaderMap) -> (AxumStatus, Json<Value>) {
        if !authorized(&headers) {
            return (
                AxumStatus::UNAUTHORIZED,
                Json(json!({ "detail": "Invalid token" })),
            );
        }
        (
            AxumStatus::OK,
            Json(json!({
                "status_code": 6000,
                "data": [
                    { "event": { "id": 7, "title": "Jazz Night" } },
                    { "event": { "id": "12", "title": "Food Fair" } }
                ]
            })),
        )
    }

    async fn add(headers: HeaderMap, Path(event_id): Path<String>) -> Json<Value> {
        if !authorized(&headers) {
            return Json(json!({ "status_code": 6001, "data": { "message": "Not allowed" } }));
        }
        if event_id == "7" {
            return Json(json!({
                "status_code": 6001,
                "data": { "message": "Event already in wishlist" }
            }));
        }
        Json(json!({ "status_code": 6000, "data": { "message": "Added to wishlist" } }))
    }

    async fn remove(Path(event_id): Path<String>) -> (AxumStatus, Json<Value>) {
        if event_id == "500" {
            return (
                AxumStatus::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "database unavailable" })),
            );
        }
        if event_id == "garbage" {
            return (AxumStatus::OK, Json(json!({ "unexpected": true })));
        }
        (AxumStatus::OK, Json(json!({ "status_code": 6000 })))
    }

    async fn slow() -> Json<Value> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Json(json!({ "data": [] }))
    }

    async fn spawn_server() -> SocketAddr {
        let app = Router::new()
            .route("/api/v1/wishlist/", get(list))
            .route("/api/v1/wishlist/add/{event_id}/", post(add))
            .route("/api/v1/wishlist/remove/{event_id}/", delete(remove))
            .route("/slow/wishlist/", get(slow));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        addr
    }

    fn client_for(addr: SocketAddr, path: &str) -> WishlistHttpClient {
        let url = Url::parse(&format!("http://{}/{}", addr, path)).expect("test url");
        WishlistHttpClient::new(&ClientConfig::new(url))
    }

    fn credential() -> Credential {
        Credential::new(TOKEN).expect("valid token")
    }

    #[test]
    fn endpoint_appends_segments_with_trailing_slash() {
        let with_slash = Url::parse("http://example.com/api/v1/").expect("url");
        let client =
            WishlistHttpClient::new(&ClientConfig::new(with_slash));
        let url = client
            .endpoint(&["wishlist", "add", "42"])
            .expect("endpoint");
        assert_eq!(url.as_str(), "http://example.com/api/v1/wishlist/add/42/");

        let odd = client
            .endpoint(&["wishlist", "add", "a b?"])
            .expect("endpoint");
        assert_eq!(odd.as_str(), "http://example.com/api/v1/wishlist/add/a%20b%3F/");
    }

    #[test]
    fn error_message_reads_common_shapes() {
        assert_eq!(
            error_message(r#"{ "detail": "Not found." }"#).as_deref(),
            Some("Not found.")
        );
        assert_eq!(
            error_message(r#"{ "status_code": 6001, "data": { "message": "nope" } }"#).as_deref(),
            Some("nope")
        );
        assert_eq!(error_message("<html>502</html>"), None);
    }

    #[tokio::test]
    async fn list_extracts_event_ids() {
        let addr = spawn_server().await;
        let client = client_for(addr, "api/v1");

        let ids = client.list(&credential()).await.expect("list succeeds");

        assert_eq!(ids, vec![EventId::from(7), EventId::from(12)]);
    }

    #[tokio::test]
    async fn list_with_rejected_token_is_unauthorized() {
        let addr = spawn_server().await;
        let client = client_for(addr, "api/v1");
        let bad = Credential::new("wrong").expect("valid token");

        let result = client.list(&bad).await;

        assert_eq!(result, Err(ApiError::Unauthorized { status: 401 }));
    }

    #[tokio::test]
    async fn add_maps_success_code_to_ack() {
        let addr = spawn_server().await;
        let client = client_for(addr, "api/v1");

        let ack = client
            .add(&credential(), &EventId::from(9))
            .await
            .expect("add succeeds");

        assert_eq!(ack, MutationAck::with_message("Added to wishlist"));
    }

    #[tokio::test]
    async fn add_without_success_code_is_rejected_even_on_http_200() {
        let addr = spawn_server().await;
        let client = client_for(addr, "api/v1");

        let result = client.add(&credential(), &EventId::from(7)).await;

        assert_eq!(
            result,
            Err(ApiError::Rejected {
                status_code: 6001,
                message: Some("Event already in wishlist".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn remove_maps_http_errors_and_malformed_bodies() {
        let addr = spawn_server().await;
        let client = client_for(addr, "api/v1");

        assert!(client
            .remove(&credential(), &EventId::from(3))
            .await
            .is_ok());

        let server_error = client
            .remove(&credential(), &EventId::from(500))
            .await;
        assert_eq!(
            server_error,
            Err(ApiError::Http {
                status: 500,
                message: Some("database unavailable".to_string()),
            })
        );

        let garbage = EventId::new("garbage").expect("valid id");
        assert!(matches!(
            client.remove(&credential(), &garbage).await,
            Err(ApiError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn slow_responses_time_out() {
        let addr = spawn_server().await;
        let url = Url::parse(&format!("http://{}/slow", addr)).expect("test url");
        let client = WishlistHttpClient::new(
            &ClientConfig::new(url).with_timeout(Duration::from_millis(50)),
        );

        assert_eq!(client.list(&credential()).await, Err(ApiError::Timeout));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let client = client_for(addr, "api/v1");

        assert!(matches!(
            client.list(&credential()).await,
            Err(ApiError::Transport(_))
        ));
    }
}
