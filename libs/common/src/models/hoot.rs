//! Hoot model and related payloads

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Comment, UserIdentity};

/// Hoot category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    News,
    Sports,
    Games,
    Movies,
    Music,
    Television,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::News,
        Category::Sports,
        Category::Games,
        Category::Movies,
        Category::Music,
        Category::Television,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::News => "News",
            Category::Sports => "Sports",
            Category::Games => "Games",
            Category::Movies => "Movies",
            Category::Music => "Music",
            Category::Television => "Television",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Hoot entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hoot {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub text: String,
    pub category: Category,
    pub author: UserIdentity,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Hoot creation and update payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HootDraft {
    pub title: String,
    pub text: String,
    pub category: Category,
}

impl HootDraft {
    pub fn new(title: impl Into<String>, text: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            category,
        }
    }
}

impl From<&Hoot> for HootDraft {
    fn from(hoot: &Hoot) -> Self {
        Self {
            title: hoot.title.clone(),
            text: hoot.text.clone(),
            category: hoot.category,
        }
    }
}

/// Identity of a deleted hoot; the server may echo more fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedHoot {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
}
