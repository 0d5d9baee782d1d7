//! Credential Types
//!
//! The relay never mints or refreshes platform sessions itself. A `Credential`
//! arrives with every request and is threaded explicitly through each remote
//! call.

use serde::{Deserialize, Serialize};

/// Bearer token plus site identifier for one platform session
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub bearer_token: String,
    pub site_id: String,
}

impl Credential {
    pub fn new(bearer_token: impl Into<String>, site_id: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            site_id: site_id.into(),
        }
    }
}

// Keep tokens out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("bearer_token", &"<redacted>")
            .field("site_id", &self.site_id)
            .finish()
    }
}

/// Sign-in secret forwarded to the platform
///
/// Untagged so the browser can post either shape directly.
#[derive(Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SignInSecret {
    /// Personal access token
    #[serde(rename_all = "camelCase")]
    PersonalAccessToken {
        personal_access_token_name: String,
        personal_access_token_secret: String,
    },
    /// Username and password
    Password { name: String, password: String },
}

impl std::fmt::Debug for SignInSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersonalAccessToken {
                personal_access_token_name,
                ..
            } => f
                .debug_struct("PersonalAccessToken")
                .field("name", personal_access_token_name)
                .finish_non_exhaustive(),
            Self::Password { name, .. } => f
                .debug_struct("Password")
                .field("name", name)
                .finish_non_exhaustive(),
        }
    }
}

/// Sign-in request body
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[serde(flatten)]
    pub secret: SignInSecret,
    /// Site content URL; the configured default is used when absent
    #[serde(default)]
    pub content_url: Option<String>,
}

/// Sign-in response body
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: String,
    pub site_id: String,
}

impl From<Credential> for SignInResponse {
    fn from(credential: Credential) -> Self {
        Self {
            token: credential.bearer_token,
            site_id: credential.site_id,
        }
    }
}
