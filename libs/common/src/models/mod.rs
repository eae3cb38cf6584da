//! Wire models shared by the hoots client and the stub API

pub mod comment;
pub mod hoot;
pub mod user;

// Re-export for convenience
pub use comment::{Comment, CommentDraft};
pub use hoot::{Category, DeletedHoot, Hoot, HootDraft};
pub use user::{SignInForm, SignUpForm, TokenClaims, TokenResponse, UserIdentity};
