use cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{
    ROLE_ADMIN, ROLE_USER, SESSION_COOKIE_MAX_AGE_DAYS, SESSION_COOKIE_NAME,
};
use crate::shared::serde_ext::optional_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    /// Backend user id; older backends send it as a number
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// Logged-in user, stored JSON-serialized in the `token` cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub user: SessionUser,
}

impl Session {
    pub fn new(id: Option<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            user: SessionUser {
                id,
                email: email.into(),
                role,
            },
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Name recorded in `updated_by` / `assigned_by` fields
    pub fn actor(&self) -> &str {
        self.user_id().unwrap_or(&self.user.email)
    }

    /// Parse a raw cookie value. Browsers may hand the JSON back
    /// percent-encoded; anything unreadable means "no session".
    pub fn from_cookie_value(raw: &str) -> Option<Self> {
        let decoded = urlencoding::decode(raw).ok()?;
        match serde_json::from_str::<Session>(decoded.trim()) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::debug!("Ignoring malformed session cookie: {}", e);
                None
            }
        }
    }

    fn cookie_value(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        urlencoding::encode(&json).into_owned()
    }

    /// `Set-Cookie` for this session
    pub fn to_cookie(&self, secure: bool) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, self.cookie_value()))
            .path("/")
            .same_site(SameSite::Lax)
            .secure(secure)
            .max_age(CookieDuration::days(SESSION_COOKIE_MAX_AGE_DAYS))
            .build()
    }

    /// `Set-Cookie` that removes the session
    pub fn removal_cookie(secure: bool) -> Cookie<'static> {
        let mut cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
            .path("/")
            .same_site(SameSite::Lax)
            .secure(secure)
            .build();
        cookie.make_removal();
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_and_encoded_cookie() {
        let plain = r#"{"user":{"id":"u1","email":"a@b.co","role":"admin"}}"#;
        let session = Session::from_cookie_value(plain).unwrap();
        assert!(session.is_admin());
        assert_eq!(session.user_id(), Some("u1"));

        let encoded = urlencoding::encode(plain).into_owned();
        assert_eq!(Session::from_cookie_value(&encoded), Some(session));
    }

    #[test]
    fn test_numeric_user_id() {
        let raw = r#"{"user":{"id":42,"email":"a@b.co","role":"user"}}"#;
        let session = Session::from_cookie_value(raw).unwrap();
        assert_eq!(session.user_id(), Some("42"));
        assert!(!session.is_admin());
    }

    #[test]
    fn test_malformed_cookie_is_no_session() {
        assert!(Session::from_cookie_value("not json").is_none());
        assert!(Session::from_cookie_value(r#"{"user":"x"}"#).is_none());
        assert!(Session::from_cookie_value(r#"{"user":{"email":"a","role":"root"}}"#).is_none());
        assert!(Session::from_cookie_value("").is_none());
    }

    #[test]
    fn test_cookie_attributes() {
        let session = Session::new(Some("u1".to_string()), "a@b.co", Role::User);
        let cookie = session.to_cookie(false);
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(CookieDuration::days(1)));
        assert_eq!(Session::from_cookie_value(cookie.value()), Some(session));

        let removal = Session::removal_cookie(true);
        assert_eq!(removal.value(), "");
        assert_eq!(removal.secure(), Some(true));
        assert_eq!(removal.max_age(), Some(CookieDuration::ZERO));
    }
}
