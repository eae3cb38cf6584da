//! User identity and authentication payloads

use serde::{Deserialize, Deserializer, Serialize};

/// Identity of a user as carried in a session token and on authored resources
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }

    /// Accepts either a populated author object or a bare author id.
    ///
    /// The list endpoint leaves comment authors unpopulated, so they arrive
    /// as plain id strings with no username.
    pub fn populated_or_reference<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum AuthorRef {
            Populated(UserIdentity),
            Reference(String),
        }

        Ok(match AuthorRef::deserialize(deserializer)? {
            AuthorRef::Populated(user) => user,
            AuthorRef::Reference(id) => UserIdentity {
                id,
                username: String::new(),
            },
        })
    }
}

/// Sign-up form payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub username: String,
    pub password: String,
    pub password_conf: String,
}

/// Sign-in form payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}

/// Response of both authentication endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Session token claims; the identity lives under `payload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub payload: UserIdentity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_uses_document_id() {
        let user: UserIdentity =
            serde_json::from_value(json!({"_id": "u1", "username": "ada"})).unwrap();
        assert_eq!(user, UserIdentity::new("u1", "ada"));

        let wire = serde_json::to_value(&user).unwrap();
        assert_eq!(wire, json!({"_id": "u1", "username": "ada"}));
    }

    #[test]
    fn test_identity_accepts_plain_id() {
        let user: UserIdentity = serde_json::from_value(json!({"id": "u2"})).unwrap();
        assert_eq!(user.id, "u2");
        assert!(user.username.is_empty());
    }

    #[test]
    fn test_sign_up_form_wire_names() {
        let form = SignUpForm {
            username: "ada".to_string(),
            password: "secret".to_string(),
            password_conf: "secret".to_string(),
        };
        let wire = serde_json::to_value(&form).unwrap();
        assert_eq!(wire["passwordConf"], "secret");
    }
}
