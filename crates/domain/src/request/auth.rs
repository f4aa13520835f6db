//! Basic authentication credentials

use std::fmt;

use serde::{Deserialize, Serialize};

/// Login and API token sent as HTTP Basic authentication.
///
/// The token never appears in `Debug` output so results and requests can be
/// logged freely.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    /// Account login (usually an email address).
    pub login: String,
    /// API token used as the password.
    pub token: String,
}

impl BasicAuth {
    /// Creates basic credentials.
    #[must_use]
    pub fn new(login: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("login", &self.login)
            .field("token", &"<redacted>")
            .finish()
    }
}
