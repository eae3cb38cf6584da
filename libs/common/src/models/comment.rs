//! Comment model, always nested under a hoot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserIdentity;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub text: String,
    #[serde(deserialize_with = "UserIdentity::populated_or_reference")]
    pub author: UserIdentity,
    pub created_at: DateTime<Utc>,
}

/// New comment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDraft {
    pub text: String,
}

impl CommentDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unpopulated_author() {
        let comment: Comment = serde_json::from_value(json!({
            "_id": "c1",
            "text": "first",
            "author": "u1",
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(comment.author.id, "u1");
        assert_eq!(comment.author.username, "");
    }
}
