//! In-memory repositories for users and hoots

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use common::models::{Comment, CommentDraft, Hoot, HootDraft, UserIdentity};
use tokio::sync::RwLock;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Clone)]
struct StoredUser {
    identity: UserIdentity,
    password_hash: String,
}

/// User repository
#[derive(Clone, Default)]
pub struct UserRepository {
    users: Arc<RwLock<Vec<StoredUser>>>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new user; usernames are unique
    pub async fn create(&self, username: &str, password: &str) -> ApiResult<UserIdentity> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.identity.username == username) {
            return Err(ApiError::BadRequest("Username already taken.".to_string()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                error!("Failed to hash password: {}", e);
                ApiError::InternalServerError
            })?
            .to_string();

        let identity = UserIdentity::new(new_id(), username);
        users.push(StoredUser {
            identity: identity.clone(),
            password_hash,
        });
        info!("Created user {}", identity.username);

        Ok(identity)
    }

    /// Check credentials and return the matching identity
    pub async fn verify(&self, username: &str, password: &str) -> Option<UserIdentity> {
        let users = self.users.read().await;
        let user = users.iter().find(|u| u.identity.username == username)?;
        let parsed = PasswordHash::new(&user.password_hash).ok()?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .ok()
            .map(|_| user.identity.clone())
    }
}

/// Hoot repository
#[derive(Clone, Default)]
pub struct HootRepository {
    hoots: Arc<RwLock<Vec<Hoot>>>,
}

impl HootRepository {
    /// Create a new hoot repository
    pub fn new() -> Self {
        Self::default()
    }

    /// All hoots, newest first
    pub async fn list(&self) -> Vec<Hoot> {
        self.hoots.read().await.iter().rev().cloned().collect()
    }

    /// Find a hoot by ID
    pub async fn find_by_id(&self, id: &str) -> ApiResult<Hoot> {
        self.hoots
            .read()
            .await
            .iter()
            .find(|h| h.id == id)
            .cloned()
            .ok_or(ApiError::NotFound("Hoot"))
    }

    /// Create a hoot authored by `author`
    pub async fn create(&self, author: &UserIdentity, draft: HootDraft) -> Hoot {
        let now = Utc::now();
        let hoot = Hoot {
            id: new_id(),
            title: draft.title,
            text: draft.text,
            category: draft.category,
            author: author.clone(),
            created_at: now,
            updated_at: Some(now),
            comments: vec![],
        };
        self.hoots.write().await.push(hoot.clone());
        hoot
    }

    /// Update a hoot; only its author may
    pub async fn update(
        &self,
        author: &UserIdentity,
        id: &str,
        draft: HootDraft,
    ) -> ApiResult<Hoot> {
        let mut hoots = self.hoots.write().await;
        let hoot = hoots
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(ApiError::NotFound("Hoot"))?;

        if hoot.author.id != author.id {
            return Err(ApiError::Forbidden);
        }

        hoot.title = draft.title;
        hoot.text = draft.text;
        hoot.category = draft.category;
        hoot.updated_at = Some(Utc::now());
        Ok(hoot.clone())
    }

    /// Delete a hoot; only its author may
    pub async fn delete(&self, author: &UserIdentity, id: &str) -> ApiResult<Hoot> {
        let mut hoots = self.hoots.write().await;
        let index = hoots
            .iter()
            .position(|h| h.id == id)
            .ok_or(ApiError::NotFound("Hoot"))?;

        if hoots[index].author.id != author.id {
            return Err(ApiError::Forbidden);
        }

        Ok(hoots.remove(index))
    }

    /// Append a comment to a hoot
    pub async fn add_comment(
        &self,
        author: &UserIdentity,
        hoot_id: &str,
        draft: CommentDraft,
    ) -> ApiResult<Comment> {
        let mut hoots = self.hoots.write().await;
        let hoot = hoots
            .iter_mut()
            .find(|h| h.id == hoot_id)
            .ok_or(ApiError::NotFound("Hoot"))?;

        let comment = Comment {
            id: new_id(),
            text: draft.text,
            author: author.clone(),
            created_at: Utc::now(),
        };
        hoot.comments.push(comment.clone());
        Ok(comment)
    }
}
