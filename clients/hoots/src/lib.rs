//! Client-side session and resource synchronization for the hoots API
//!
//! The crate holds the session token and the identity decoded from it,
//! performs authorized calls against the hoot REST API, and keeps an
//! in-memory hoot collection consistent with the server after each
//! mutation. [`AppController`] is the single owner of that state.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use common::{config::ClientConfig, models::SignInForm, storage::FileStorage};
//! use hoots::AppController;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let storage = Arc::new(FileStorage::new(&config.token_path));
//!     let mut app = AppController::new(&config, storage);
//!
//!     app.start().await?;
//!     if app.user().is_none() {
//!         let form = SignInForm {
//!             username: "ada".to_string(),
//!             password: "secret".to_string(),
//!         };
//!         app.sign_in(&form).await?;
//!     }
//!     println!("{} hoots", app.hoots().map_or(0, |h| h.len()));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod collection;
pub mod controller;
pub mod error;
pub mod gate;
pub mod service;
pub mod session;
pub mod state;
pub mod validation;

pub use collection::HootCollection;
pub use controller::AppController;
pub use error::{ClientError, ClientResult};
pub use gate::can_modify;
pub use session::{Session, SessionStore};
pub use state::{AppState, View};
