//! Story API message types
//!
//! Field names follow the wire contract exactly; they are case-sensitive.

use serde::{Deserialize, Serialize};

// === Authentication ===

/// Body of `POST /api/User/Authentication`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    #[serde(rename = "userName")]
    pub user_name: &'a str,
    pub password: &'a str,
}

/// Successful authentication response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
}

// === Stories ===

/// Body of the create and edit requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPayload {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl StoryPayload {
    pub fn new(title: &str, description: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            url: url.to_string(),
        }
    }

    /// Payload with every required field left empty
    pub fn empty() -> Self {
        Self::new("", "", "")
    }
}

/// A story as returned by `GET /api/Story/All`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryRecord {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Url", default)]
    pub url: Option<String>,
}

/// Acknowledgment returned by the mutating endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponseEnvelope {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(rename = "storyId", default)]
    pub story_id: Option<String>,
}

impl ApiResponseEnvelope {
    /// The story id, if present and non-empty
    pub fn created_id(&self) -> Option<&str> {
        self.story_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_field_names() {
        let json = serde_json::to_value(LoginRequest {
            user_name: "alice",
            password: "secret",
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"userName": "alice", "password": "secret"}));
    }

    #[test]
    fn test_story_payload_is_lowercase() {
        let json = serde_json::to_value(StoryPayload::new("T", "D", "")).unwrap();
        assert_eq!(json, serde_json::json!({"title": "T", "description": "D", "url": ""}));
    }

    #[test]
    fn test_envelope_without_story_id() {
        let env: ApiResponseEnvelope =
            serde_json::from_str(r#"{"msg":"Successfully edited"}"#).unwrap();
        assert_eq!(env.msg.as_deref(), Some("Successfully edited"));
        assert!(env.story_id.is_none());
        assert!(env.created_id().is_none());
    }

    #[test]
    fn test_envelope_empty_story_id_is_not_created() {
        let env: ApiResponseEnvelope =
            serde_json::from_str(r#"{"msg":"Successfully created!","storyId":""}"#).unwrap();
        assert!(env.created_id().is_none());
    }

    #[test]
    fn test_story_record_capitalised_keys() {
        let records: Vec<StoryRecord> = serde_json::from_str(
            r#"[{"Title":"A","Description":"B","Url":"C"},{"Title":"Only title"}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url.as_deref(), Some("C"));
        assert!(records[1].description.is_none());
    }
}
