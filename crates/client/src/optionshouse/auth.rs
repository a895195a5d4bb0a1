//! Session messages: `auth.login`, `auth.logout`, `auth.keepAlive`

use super::de;
use super::envelope::{Reply, StatusReply};
use crate::traits::ApiRequest;
use crate::types::Page;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("user_name", &self.user_name)
            .field("password", &"***")
            .finish()
    }
}

impl ApiRequest for LoginRequest {
    const ACTION: &'static str = "auth.login";
    const PAGE: Page = Page::M;
    type Response = Reply<LoginData>;
}

/// Market data agreement flags for one exchange
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExchangeAgreement {
    #[serde(deserialize_with = "de::bool")]
    pub professional: bool,
    #[serde(deserialize_with = "de::bool")]
    pub agree: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginData {
    #[serde(deserialize_with = "de::string")]
    pub auth_token: String,
    #[serde(deserialize_with = "de::string")]
    pub first_name: String,
    #[serde(deserialize_with = "de::string")]
    pub last_name: String,
    #[serde(deserialize_with = "de::bool")]
    pub funded: bool,
    #[serde(deserialize_with = "de::bool")]
    pub delayed_quotes: bool,
    #[serde(deserialize_with = "de::string")]
    pub access: String,
    #[serde(deserialize_with = "de::bool")]
    pub professional: bool,
    #[serde(deserialize_with = "de::bool")]
    pub requires_account_creation: bool,
    #[serde(deserialize_with = "de::object")]
    pub nasdaq: Option<ExchangeAgreement>,
    #[serde(deserialize_with = "de::object")]
    pub nyse: Option<ExchangeAgreement>,
    #[serde(deserialize_with = "de::object")]
    pub opera: Option<ExchangeAgreement>,
}

impl LoginData {
    /// The server hands out a token only when the credentials were accepted
    pub fn login_success(&self) -> bool {
        !self.auth_token.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoutRequest {
    #[serde(rename = "authToken")]
    pub auth_token: String,
}

impl LogoutRequest {
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
        }
    }
}

impl ApiRequest for LogoutRequest {
    const ACTION: &'static str = "auth.logout";
    const PAGE: Page = Page::M;
    type Response = Reply<LogoutData>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogoutData {
    /// `None` when the server left the field out
    pub auth_token: Option<String>,
}

impl Reply<LogoutData> {
    /// Token still attached to the session, falling back to the one we
    /// sent when the server did not echo it
    pub fn remaining_token<'a>(&'a self, sent: &'a str) -> &'a str {
        self.data().auth_token.as_deref().unwrap_or(sent)
    }

    /// A logout took effect when the server returns an empty token
    pub fn logged_out(&self, sent: &str) -> bool {
        self.remaining_token(sent).is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct KeepAliveRequest {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    pub account: String,
}

impl KeepAliveRequest {
    pub fn new(auth_token: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            account: account.into(),
        }
    }
}

impl ApiRequest for KeepAliveRequest {
    const ACTION: &'static str = "auth.keepAlive";
    const PAGE: Page = Page::M;
    type Response = StatusReply;
}
