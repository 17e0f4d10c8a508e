//! Memory bank knowledge sources

use serde::{Deserialize, Serialize};

/// A named knowledge source listed in the memory bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryItem {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub status: String,
}

/// Body for `POST /memory`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMemoryItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: String,
    pub source: String,
    pub status: String,
}

impl NewMemoryItem {
    /// Attach the id the backend assigned
    pub fn into_item(self, id: i64) -> MemoryItem {
        MemoryItem {
            id,
            name: self.name,
            kind: self.kind,
            size: self.size,
            source: self.source,
            status: self.status,
        }
    }
}

/// Partial update for `PUT /memory/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl MemoryPatch {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_body_uses_type_key() {
        let item = NewMemoryItem {
            name: "Doc".into(),
            kind: "PDF".into(),
            size: "1MB".into(),
            source: "Upload".into(),
            status: "Pending".into(),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Doc", "type": "PDF", "size": "1MB",
                "source": "Upload", "status": "Pending"
            })
        );
    }

    #[test]
    fn test_patch_only_sends_set_fields() {
        let value = serde_json::to_value(MemoryPatch::status("Indexed")).unwrap();
        assert_eq!(value, serde_json::json!({"status": "Indexed"}));
    }
}
