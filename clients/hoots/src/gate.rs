//! Advisory ownership gate
//!
//! Decides whether edit and delete affordances are offered. It never
//! enforces anything: the server checks authorship on every mutation.

use common::models::UserIdentity;

/// True iff a user is signed in and is the resource's author
///
/// Identities are compared by id only.
pub fn can_modify(current_user: Option<&UserIdentity>, author: &UserIdentity) -> bool {
    current_user.is_some_and(|user| user.id == author.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_may_modify() {
        let ada = UserIdentity::new("u1", "ada");
        assert!(can_modify(Some(&ada), &ada));
    }

    #[test]
    fn test_same_id_other_fields_differ() {
        let current = UserIdentity::new("u1", "ada");
        let stale = UserIdentity::new("u1", "ada_renamed");
        assert!(can_modify(Some(&current), &stale));
    }

    #[test]
    fn test_other_user_may_not_modify() {
        let ada = UserIdentity::new("u1", "ada");
        let bob = UserIdentity::new("u2", "ada");
        assert!(!can_modify(Some(&bob), &ada));
    }

    #[test]
    fn test_anonymous_may_not_modify() {
        assert!(!can_modify(None, &UserIdentity::new("u1", "ada")));
    }

    #[test]
    fn test_gate_matches_id_equality_exhaustively() {
        let ids = ["u1", "u2", "", "U1"];
        for a in ids {
            for b in ids {
                let user = UserIdentity::new(a, "x");
                let author = UserIdentity::new(b, "y");
                assert_eq!(can_modify(Some(&user), &author), a == b);
            }
        }
    }
}
