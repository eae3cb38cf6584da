//! Shared helpers for client integration tests

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc};

use common::{
    config::ClientConfig,
    models::{Category, HootDraft, SignUpForm, UserIdentity},
    storage::{MemoryStorage, TokenStorage},
};
use hoots::AppController;
use stub_api::{jwt::JwtConfig, spawn_local};

pub struct StubServer {
    pub addr: SocketAddr,
    _handle: tokio::task::JoinHandle<()>,
}

impl StubServer {
    pub async fn start() -> Self {
        let (addr, handle) = spawn_local(JwtConfig::default())
            .await
            .expect("stub API should start");
        Self {
            addr,
            _handle: handle,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::with_base_url(format!("http://{}", self.addr))
    }

    /// A controller with its own in-memory session storage
    pub fn controller(&self) -> AppController {
        AppController::new(&self.config(), Arc::new(MemoryStorage::new()))
    }

    pub fn controller_with(&self, storage: Arc<dyn TokenStorage>) -> AppController {
        AppController::new(&self.config(), storage)
    }
}

pub fn sign_up_form(username: &str) -> SignUpForm {
    SignUpForm {
        username: username.to_string(),
        password: "hunter2".to_string(),
        password_conf: "hunter2".to_string(),
    }
}

/// Sign up `username` on a fresh controller
pub async fn signed_up(server: &StubServer, username: &str) -> (AppController, UserIdentity) {
    let mut app = server.controller();
    let user = app
        .sign_up(&sign_up_form(username))
        .await
        .expect("sign-up should succeed");
    (app, user)
}

pub fn draft(title: &str) -> HootDraft {
    HootDraft::new(title, format!("{} body", title), Category::News)
}
