use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
/// Login credentials for the Okapi gateway.
pub struct Credentials {
    /// The FOLIO username.
    pub username: String,
    /// The password of the user.
    pub password: String,
}

impl Credentials {
    /// Creates a new `Credentials` struct.
    pub fn new(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
