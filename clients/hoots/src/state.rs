//! Application state owned by the controller

use common::models::{Hoot, UserIdentity};

use crate::collection::HootCollection;

/// Screen the front end should show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    /// Unauthenticated landing page
    #[default]
    Landing,
    SignIn,
    SignUp,
    /// Signed-in home
    Dashboard,
    /// Hoot collection listing
    HootList,
    HootDetail(String),
    NewHoot,
    EditHoot(String),
}

/// Client state
///
/// `hoots` and `detail` are two independently fetched views of the same
/// data. A comment added through the detail view does not reach the list
/// until the next listing.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub user: Option<UserIdentity>,
    /// `None` until a listing succeeds; distinct from an empty listing
    pub hoots: Option<HootCollection>,
    pub detail: Option<Hoot>,
    pub view: View,
}

impl AppState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
