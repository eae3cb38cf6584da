//! Typed operations on the hoot resource and its nested comments
//!
//! Every operation is one round trip through [`ApiClient`]. Authorization
//! is left entirely to the server; a refusal comes back as
//! [`ClientError::Server`](crate::error::ClientError::Server).

use common::models::{Comment, CommentDraft, DeletedHoot, Hoot, HootDraft};
use tracing::info;

use crate::{
    api::{ApiClient, parse_body},
    error::ClientResult,
};

const HOOTS_PATH: &str = "/hoots";

/// Hoot service
#[derive(Clone)]
pub struct HootService {
    api: ApiClient,
}

impl HootService {
    /// Create a new hoot service
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List the hoots visible to the caller, in server order
    pub async fn list(&self) -> ClientResult<Vec<Hoot>> {
        let hoots: Vec<Hoot> = parse_body(self.api.get(HOOTS_PATH).await?)?;
        info!("Fetched {} hoots", hoots.len());
        Ok(hoots)
    }

    /// Get a single hoot with its full comment list
    pub async fn get(&self, hoot_id: &str) -> ClientResult<Hoot> {
        parse_body(self.api.get(&hoot_path(hoot_id)).await?)
    }

    /// Create a hoot; the server assigns id, author and creation time
    pub async fn create(&self, draft: &HootDraft) -> ClientResult<Hoot> {
        let hoot: Hoot = parse_body(self.api.post(HOOTS_PATH, draft).await?)?;
        info!("Created hoot {}", hoot.id);
        Ok(hoot)
    }

    /// Update a hoot; only its author may do so
    pub async fn update(&self, hoot_id: &str, draft: &HootDraft) -> ClientResult<Hoot> {
        let hoot: Hoot = parse_body(self.api.put(&hoot_path(hoot_id), draft).await?)?;
        info!("Updated hoot {}", hoot.id);
        Ok(hoot)
    }

    /// Delete a hoot; only its author may do so
    pub async fn delete(&self, hoot_id: &str) -> ClientResult<DeletedHoot> {
        let deleted: DeletedHoot = parse_body(self.api.delete(&hoot_path(hoot_id)).await?)?;
        info!("Deleted hoot {}", deleted.id);
        Ok(deleted)
    }

    /// Add a comment to a hoot
    pub async fn add_comment(&self, hoot_id: &str, draft: &CommentDraft) -> ClientResult<Comment> {
        let path = format!("{}/comments", hoot_path(hoot_id));
        let comment: Comment = parse_body(self.api.post(&path, draft).await?)?;
        info!("Added comment {} to hoot {}", comment.id, hoot_id);
        Ok(comment)
    }
}

/// Path of one hoot; the id is a single escaped segment
fn hoot_path(hoot_id: &str) -> String {
    format!("{}/{}", HOOTS_PATH, urlencoding::encode(hoot_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hoot_path() {
        assert_eq!(hoot_path("abc"), "/hoots/abc");
    }

    #[test]
    fn test_hoot_path_escapes_id() {
        assert_eq!(hoot_path("x/comments"), "/hoots/x%2Fcomments");
        assert_eq!(hoot_path("a?b#c"), "/hoots/a%3Fb%23c");
        assert_eq!(hoot_path("../auth"), "/hoots/..%2Fauth");
    }
}
