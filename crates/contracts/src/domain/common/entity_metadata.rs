use serde::{Deserialize, Serialize};

/// Lifecycle timestamps the backend attaches to every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl EntityMetadata {
    /// `2024-06-01 14:05`, or an empty string when unknown.
    pub fn created_display(&self) -> String {
        format_timestamp(self.created_at)
    }

    pub fn updated_display(&self) -> String {
        format_timestamp(self.updated_at)
    }
}

pub fn format_timestamp(ts: Option<chrono::DateTime<chrono::Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_backend_timestamps() {
        let meta: EntityMetadata =
            serde_json::from_str(r#"{"created_at":"2024-06-01T14:05:09.000000Z"}"#).unwrap();
        assert_eq!(meta.created_display(), "2024-06-01 14:05");
        assert_eq!(meta.updated_display(), "");
    }
}
