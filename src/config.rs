use crate::{Credentials, FolioError, FolioResult};

/// Environment variable holding the Okapi base URL.
pub const ENV_ENDPOINT: &str = "FOLIO_ENDPOINT";
/// Environment variable holding the login username.
pub const ENV_USERNAME: &str = "FOLIO_USERNAME";
/// Environment variable holding the login password.
pub const ENV_PASSWORD: &str = "FOLIO_PASSWORD";
/// Environment variable holding the tenant identifier.
pub const ENV_TENANT: &str = "FOLIO_OKAPI_TENANT";

/// Connection settings for a FOLIO tenant.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Okapi gateway, e.g. `https://okapi.example.org`.
    pub okapi_url: String,
    /// Tenant identifier sent as `x-okapi-tenant`.
    pub tenant: String,
    /// Login credentials.
    pub credentials: Credentials,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// A `.env` file in the working directory (or one of its parents) is loaded first, if present.
    /// Variables already set in the environment take precedence over the file.
    pub fn from_env() -> FolioResult<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> FolioResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).ok_or(FolioError::MissingEnv(key));

        Ok(Config {
            okapi_url: get(ENV_ENDPOINT)?,
            tenant: get(ENV_TENANT)?,
            credentials: Credentials {
                username: get(ENV_USERNAME)?,
                password: get(ENV_PASSWORD)?,
            },
        })
    }
}
