/// Wire types exchanged with the VisionFlow extraction API
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned record identifier.
///
/// The client never interprets it; it is only used to key table rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// One structured result produced by the extraction service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Comma-delimited feature list
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default)]
    pub pricing: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub extracted_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `GET /data` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct DataResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<ExtractionRecord>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /extract` request body
#[derive(Debug, Serialize)]
pub struct ExtractRequest<'a> {
    pub url: &'a str,
}

/// `POST /extract` response envelope
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtractResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub extraction_id: Option<RecordId>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /` health check body
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
}

/// Body of a non-2xx response; only the error text matters
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_server_row() {
        let json = r#"{
            "id": 7,
            "url": "https://openai.com",
            "name": "OpenAI",
            "description": "AI research",
            "features": "GPT, DALL-E",
            "pricing": "Freemium",
            "extracted_at": "2024-01-15 10:30:00",
            "status": "success"
        }"#;

        let record: ExtractionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, Some(RecordId::Number(7)));
        assert_eq!(record.name.as_deref(), Some("OpenAI"));
        assert_eq!(record.features.as_deref(), Some("GPT, DALL-E"));
        assert_eq!(record.extracted_at.as_deref(), Some("2024-01-15 10:30:00"));
    }

    #[test]
    fn test_record_tolerates_nulls_and_missing_fields() {
        let json = r#"{"url": "https://example.com", "name": null, "pricing": null}"#;

        let record: ExtractionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, None);
        assert_eq!(record.name, None);
        assert_eq!(record.description, None);
        assert_eq!(record.status, None);
    }

    #[test]
    fn test_record_id_accepts_strings() {
        let json = r#"{"id": "abc-123", "url": "https://example.com"}"#;

        let record: ExtractionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id.map(|id| id.to_string()), Some("abc-123".to_string()));
    }

    #[test]
    fn test_data_response_failure_without_data() {
        let json = r#"{"success": false, "error": "Database error: locked"}"#;

        let response: DataResponse = serde_json::from_str(json).unwrap();

        assert!(!response.success);
        assert!(response.data.is_empty());
        assert_eq!(response.error.as_deref(), Some("Database error: locked"));
    }

    #[test]
    fn test_extract_request_body() {
        let body = serde_json::to_string(&ExtractRequest { url: "https://openai.com" }).unwrap();
        assert_eq!(body, r#"{"url":"https://openai.com"}"#);
    }

    #[test]
    fn test_extract_response_success() {
        let json = r#"{"success": true, "extraction_id": 12, "message": "Data extracted successfully", "data": {}}"#;

        let response: ExtractResponse = serde_json::from_str(json).unwrap();

        assert!(response.success);
        assert_eq!(response.extraction_id, Some(RecordId::Number(12)));
        assert_eq!(response.error, None);
    }
}
