//! Application controller
//!
//! Sole owner of the session and the loaded hoots. Each handler issues one
//! service call and, only on success, reconciles local state and picks the
//! next view. On failure the error is logged, state is left as it was and
//! the error is returned for the caller to surface or ignore.

use std::sync::Arc;

use common::{
    config::ClientConfig,
    models::{
        Comment, CommentDraft, DeletedHoot, Hoot, HootDraft, SignInForm, SignUpForm, UserIdentity,
    },
    storage::TokenStorage,
};
use tracing::{debug, error, info, warn};

use crate::{
    api::ApiClient,
    auth::{AuthService, SignedIn},
    collection::HootCollection,
    error::{ClientError, ClientResult},
    gate,
    service::HootService,
    session::SessionStore,
    state::{AppState, View},
};

/// Application controller
pub struct AppController {
    session: SessionStore,
    hoot_service: HootService,
    auth_service: AuthService,
    state: AppState,
}

impl AppController {
    /// Create a controller over the given token storage
    pub fn new(config: &ClientConfig, storage: Arc<dyn TokenStorage>) -> Self {
        let session = SessionStore::new(storage);
        let api = ApiClient::new(config, session.clone());

        Self {
            session,
            hoot_service: HootService::new(api.clone()),
            auth_service: AuthService::new(api),
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.state.user.as_ref()
    }

    pub fn hoots(&self) -> Option<&HootCollection> {
        self.state.hoots.as_ref()
    }

    pub fn detail(&self) -> Option<&Hoot> {
        self.state.detail.as_ref()
    }

    pub fn view(&self) -> &View {
        &self.state.view
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Plain screen change with no request behind it
    pub fn navigate(&mut self, view: View) {
        debug!("Navigating to {:?}", view);
        self.state.view = view;
    }

    /// Whether edit and delete should be offered for `hoot`
    pub fn can_modify(&self, hoot: &Hoot) -> bool {
        gate::can_modify(self.user(), &hoot.author)
    }

    /// Restore the persisted session and, when signed in, load the hoots
    pub async fn start(&mut self) -> ClientResult<()> {
        self.state.user = self.session.get_user();

        match &self.state.user {
            Some(user) => {
                info!("Restored session for user: {}", user.username);
                self.state.view = View::Dashboard;
                self.refresh_hoots().await
            }
            None => {
                self.state.view = View::Landing;
                Ok(())
            }
        }
    }

    /// Create an account and sign in with it
    pub async fn sign_up(&mut self, form: &SignUpForm) -> ClientResult<UserIdentity> {
        let signed_in = self
            .auth_service
            .sign_up(form)
            .await
            .inspect_err(|e| error!("Sign-up failed: {}", e))?;
        self.establish(signed_in).await
    }

    /// Sign in with existing credentials
    pub async fn sign_in(&mut self, form: &SignInForm) -> ClientResult<UserIdentity> {
        let signed_in = self
            .auth_service
            .sign_in(form)
            .await
            .inspect_err(|e| error!("Sign-in failed: {}", e))?;
        self.establish(signed_in).await
    }

    /// Anonymous -> Authenticated, followed by the initial load
    ///
    /// A failed initial load does not undo the sign-in; the collection just
    /// stays unloaded.
    async fn establish(&mut self, signed_in: SignedIn) -> ClientResult<UserIdentity> {
        self.session.set_token(&signed_in.token)?;
        info!("Signed in as {}", signed_in.user.username);

        self.state.user = Some(signed_in.user.clone());
        self.state.hoots = None;
        self.state.detail = None;
        self.state.view = View::Dashboard;

        if let Err(e) = self.refresh_hoots().await {
            warn!("Initial hoot load failed, collection left unloaded: {}", e);
        }

        Ok(signed_in.user)
    }

    /// Replace the whole collection with a fresh listing
    pub async fn refresh_hoots(&mut self) -> ClientResult<()> {
        let hoots = self
            .hoot_service
            .list()
            .await
            .inspect_err(|e| error!("Failed to load hoots: {}", e))?;
        self.state.hoots = Some(HootCollection::new(hoots));
        Ok(())
    }

    /// Fetch one hoot into the detail view
    pub async fn show_hoot(&mut self, hoot_id: &str) -> ClientResult<&Hoot> {
        let hoot = self
            .hoot_service
            .get(hoot_id)
            .await
            .inspect_err(|e| error!("Failed to load hoot {}: {}", hoot_id, e))?;
        self.state.view = View::HootDetail(hoot.id.clone());
        Ok(&*self.state.detail.insert(hoot))
    }

    /// Create a hoot and append it to the collection
    pub async fn add_hoot(&mut self, draft: &HootDraft) -> ClientResult<Hoot> {
        let hoot = self
            .hoot_service
            .create(draft)
            .await
            .inspect_err(|e| error!("Failed to create hoot: {}", e))?;

        match self.state.hoots.as_mut() {
            Some(hoots) => hoots.append(hoot.clone()),
            None => debug!("Hoots not loaded yet, created hoot {} not appended", hoot.id),
        }
        self.state.view = View::HootList;
        Ok(hoot)
    }

    /// Update a hoot and replace its collection entry in place
    pub async fn update_hoot(&mut self, hoot_id: &str, draft: &HootDraft) -> ClientResult<Hoot> {
        let hoot = self
            .hoot_service
            .update(hoot_id, draft)
            .await
            .inspect_err(|e| error!("Failed to update hoot {}: {}", hoot_id, e))?;

        if let Some(hoots) = self.state.hoots.as_mut() {
            if !hoots.replace(hoot.clone()) {
                debug!("Updated hoot {} is not in the loaded collection", hoot.id);
            }
        }
        // The detail screen shows the server's copy, as a fresh fetch would
        self.state.detail = Some(hoot.clone());
        self.state.view = View::HootDetail(hoot_id.to_string());
        Ok(hoot)
    }

    /// Delete a hoot and drop it from the collection
    pub async fn delete_hoot(&mut self, hoot_id: &str) -> ClientResult<DeletedHoot> {
        let deleted = self
            .hoot_service
            .delete(hoot_id)
            .await
            .inspect_err(|e| error!("Failed to delete hoot {}: {}", hoot_id, e))?;

        if let Some(hoots) = self.state.hoots.as_mut() {
            hoots.remove(&deleted.id);
        }
        if self.state.detail.as_ref().is_some_and(|h| h.id == deleted.id) {
            self.state.detail = None;
        }
        self.state.view = View::HootList;
        Ok(deleted)
    }

    /// Comment on the hoot shown in the detail view
    ///
    /// Only the detail copy gains the comment; the list collection is not
    /// touched and the view does not change.
    pub async fn add_comment(&mut self, draft: &CommentDraft) -> ClientResult<Comment> {
        let hoot_id = self
            .state
            .detail
            .as_ref()
            .map(|h| h.id.clone())
            .ok_or(ClientError::NoDetail)?;

        let comment = self
            .hoot_service
            .add_comment(&hoot_id, draft)
            .await
            .inspect_err(|e| error!("Failed to comment on hoot {}: {}", hoot_id, e))?;

        if let Some(detail) = self.state.detail.as_mut() {
            detail.comments.push(comment.clone());
        }
        Ok(comment)
    }

    /// Authenticated -> Anonymous
    pub fn sign_out(&mut self) -> ClientResult<()> {
        self.session.clear()?;
        if let Some(user) = self.state.user.take() {
            info!("Signed out user: {}", user.username);
        }
        self.state.hoots = None;
        self.state.detail = None;
        self.state.view = View::Landing;
        Ok(())
    }
}
