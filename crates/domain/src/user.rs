//! User record and account API payloads.

use serde::{Deserialize, Serialize};

/// Snapshot of a user's profile as returned by the server.
///
/// Fetched as a whole and replaced as a whole; the client never merges
/// partial updates into a cached copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned user id.
    #[serde(rename = "userID")]
    pub id: String,
    /// First name.
    #[serde(rename = "firstName")]
    pub first_name: String,
    /// Last name.
    #[serde(rename = "surName")]
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Avatar reference.
    #[serde(rename = "imageLink", default)]
    pub image: String,
    /// Chat identifier.
    #[serde(rename = "chatID", default)]
    pub chat_id: String,
    /// Chat session identifier.
    #[serde(rename = "sessionID", default)]
    pub session_id: String,
}

impl User {
    /// Returns "First Last", trimmed when either part is missing.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Returns true if chat linkage has been set up for this user.
    #[must_use]
    pub fn has_chat(&self) -> bool {
        !self.chat_id.is_empty() && !self.session_id.is_empty()
    }
}

/// Body of `POST /login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest<'a> {
    /// Login identifier (the account email).
    pub login: &'a str,
    /// Plain-text password.
    pub password: &'a str,
}

impl std::fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of a successful `POST /login` response.
///
/// The server returns a string map; only `accessToken` is required and any
/// other keys are ignored.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    /// Opaque access token.
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Body of `POST /registration/new`.
#[derive(Clone, Serialize)]
pub struct RegistrationRequest<'a> {
    /// First name.
    #[serde(rename = "firstName")]
    pub first_name: &'a str,
    /// Last name.
    #[serde(rename = "surName")]
    pub last_name: &'a str,
    /// Email address, also the login identifier.
    pub email: &'a str,
    /// Plain-text password.
    pub password: &'a str,
}

impl std::fmt::Debug for RegistrationRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /email/code`.
#[derive(Debug, Clone, Serialize)]
pub struct EmailCodeRequest<'a> {
    /// Address the server should send the code to.
    pub email: &'a str,
}

/// Body of `POST /email/verify`.
#[derive(Debug, Clone, Serialize)]
pub struct EmailCodeSubmission<'a> {
    /// Address being verified.
    pub email: &'a str,
    /// Code received by email.
    pub code: &'a str,
}

/// Body of `PATCH /user/chat/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCredentials {
    /// Chat identifier.
    #[serde(rename = "chatID")]
    pub chat_id: String,
    /// Chat session identifier.
    #[serde(rename = "sessionID")]
    pub session_id: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_user_field_mapping() {
        let json = r#"{
            "userID": "u-42",
            "firstName": "Anna",
            "surName": "Petrova",
            "email": "anna@petland.test",
            "imageLink": "https://cdn.petland.test/a.png",
            "chatID": "c-1",
            "sessionID": "s-1"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u-42");
        assert_eq!(user.first_name, "Anna");
        assert_eq!(user.last_name, "Petrova");
        assert_eq!(user.image, "https://cdn.petland.test/a.png");
        assert_eq!(user.chat_id, "c-1");
        assert_eq!(user.session_id, "s-1");
        assert_eq!(user.display_name(), "Anna Petrova");
        assert!(user.has_chat());
    }

    #[test]
    fn test_user_optional_fields_default_to_empty() {
        let json = r#"{"userID":"u-1","firstName":"A","surName":"B","email":"a@b.c"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.image, "");
        assert!(!user.has_chat());
    }

    #[test]
    fn test_user_missing_id_is_rejected() {
        let json = r#"{"firstName":"A","surName":"B","email":"a@b.c"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn test_registration_body_uses_server_names() {
        let body = serde_json::to_value(RegistrationRequest {
            first_name: "Anna",
            last_name: "Petrova",
            email: "anna@petland.test",
            password: "hunter2",
        })
        .unwrap();

        assert_eq!(body["firstName"], "Anna");
        assert_eq!(body["surName"], "Petrova");
        assert_eq!(body["email"], "anna@petland.test");
        assert_eq!(body["password"], "hunter2");
    }

    #[test]
    fn test_login_response_ignores_extra_keys() {
        let json = r#"{"accessToken":"tok","refreshToken":"r"}"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "tok");
    }

    #[test]
    fn test_password_is_redacted_in_debug() {
        let req = LoginRequest {
            login: "anna@petland.test",
            password: "hunter2",
        };
        assert!(!format!("{req:?}").contains("hunter2"));
    }

    #[test]
    fn test_chat_credentials_body() {
        let body = serde_json::to_value(ChatCredentials {
            chat_id: "c-9".to_string(),
            session_id: "s-9".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"chatID": "c-9", "sessionID": "s-9"}));
    }
}
