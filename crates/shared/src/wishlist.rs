//! Wishlist endpoint payloads
//!
//! The backend wraps every response in an envelope carrying an
//! application-level `status_code`. HTTP 2xx alone does not mean success:
//! only `SUCCESS_STATUS_CODE` does.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use eventhub_domain::EventId;

/// Application-level sentinel marking a logically successful response.
pub const SUCCESS_STATUS_CODE: i64 = 6000;

// =============================================================================
// List
// =============================================================================

/// `GET .../wishlist/` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistListResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<i64>,
    pub data: Vec<WishlistItemDto>,
}

impl WishlistListResponse {
    pub fn event_ids(&self) -> impl Iterator<Item = &EventId> {
        self.data.iter().map(|item| &item.event.id)
    }

    /// Listings without a `status_code` are accepted as-is; when present it
    /// must match the success sentinel.
    pub fn is_success(&self, success_code: i64) -> bool {
        self.status_code.map_or(true, |code| code == success_code)
    }
}

/// One wishlist row; only the nested event reference is consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItemDto {
    pub event: EventRefDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRefDto {
    pub id: EventId,
}

// =============================================================================
// Add / Remove
// =============================================================================

/// `POST .../wishlist/add/{id}/` and `DELETE .../wishlist/remove/{id}/` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status_code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status_code: SUCCESS_STATUS_CODE,
            data: Some(serde_json::json!({ "message": message.into() })),
            message: None,
        }
    }

    pub fn rejected(status_code: i64, message: impl Into<String>) -> Self {
        Self {
            status_code,
            data: Some(serde_json::json!({ "message": message.into() })),
            message: None,
        }
    }

    pub fn is_success(&self, success_code: i64) -> bool {
        self.status_code == success_code
    }

    /// Human-readable server message.
    ///
    /// Looks at `data.message`, then top-level `message`, then `data.detail`,
    /// and finally `data` itself when it is a bare string.
    pub fn message(&self) -> Option<String> {
        let from_data = |key: &str| {
            self.data
                .as_ref()
                .and_then(|d| d.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        from_data("message")
            .or_else(|| self.message.clone())
            .or_else(|| from_data("detail"))
            .or_else(|| {
                self.data
                    .as_ref()
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_extracts_nested_event_ids_and_ignores_extra_fields() {
        let body = r#"{
            "status_code": 6000,
            "data": [
                { "id": 1, "event": { "id": 7, "title": "Jazz Night", "price": 20 } },
                { "id": 2, "event": { "id": "12", "title": "Food Fair" } }
            ]
        }"#;

        let response: WishlistListResponse = serde_json::from_str(body).expect("decode list");
        let ids: Vec<&str> = response.event_ids().map(EventId::as_str).collect();
        assert_eq!(ids, vec!["7", "12"]);
        assert!(response.is_success(SUCCESS_STATUS_CODE));
    }

    #[test]
    fn list_without_status_code_is_success() {
        let response: WishlistListResponse =
            serde_json::from_str(r#"{ "data": [] }"#).expect("decode list");
        assert!(response.is_success(SUCCESS_STATUS_CODE));

        let rejected: WishlistListResponse =
            serde_json::from_str(r#"{ "status_code": 6001, "data": [] }"#).expect("decode list");
        assert!(!rejected.is_success(SUCCESS_STATUS_CODE));
    }

    #[test]
    fn list_missing_event_id_is_malformed() {
        let result = serde_json::from_str::<WishlistListResponse>(r#"{ "data": [ { "event": {} } ] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn status_message_prefers_data_message() {
        let response: StatusResponse = serde_json::from_str(
            r#"{ "status_code": 6001, "message": "top", "data": { "message": "Already in wishlist" } }"#,
        )
        .expect("decode status");
        assert!(!response.is_success(SUCCESS_STATUS_CODE));
        assert_eq!(response.message().as_deref(), Some("Already in wishlist"));
    }

    #[test]
    fn status_message_falls_back_through_fields() {
        let top: StatusResponse =
            serde_json::from_str(r#"{ "status_code": 6001, "message": "top" }"#).expect("decode");
        assert_eq!(top.message().as_deref(), Some("top"));

        let detail: StatusResponse = serde_json::from_str(
            r#"{ "status_code": 6001, "data": { "detail": "Event not found" } }"#,
        )
        .expect("decode");
        assert_eq!(detail.message().as_deref(), Some("Event not found"));

        let bare: StatusResponse =
            serde_json::from_str(r#"{ "status_code": 6001, "data": "nope" }"#).expect("decode");
        assert_eq!(bare.message().as_deref(), Some("nope"));

        let blank: StatusResponse =
            serde_json::from_str(r#"{ "status_code": 6001, "message": "  " }"#).expect("decode");
        assert_eq!(blank.message(), None);
    }
}
