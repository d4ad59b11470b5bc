use reqwest::StatusCode;
use serde_json::json;
use tracing::debug;

use crate::requests::Request;
use crate::responses::CredentialsExistence;
use crate::{Authenticated, FolioClient, FolioResult};

const CREDENTIALS: &str = "/authn/credentials";

impl FolioClient<Authenticated> {
    /// Returns whether a user has login credentials (a PIN).
    pub async fn pin_exists(&self, user_id: &str) -> FolioResult<bool> {
        let request = Request::get("/authn/credentials-existence").param("userId", user_id);
        let existence: CredentialsExistence = self.execute_json(&request).await?;
        Ok(existence.credentials_exist)
    }

    /// Removes the login credentials of a user.
    pub async fn remove_pin(&self, user_id: &str) -> FolioResult<StatusCode> {
        self.execute_status(&Request::delete(CREDENTIALS).param("userId", user_id))
            .await
    }

    /// Sets the login credentials of a user. Fails if the user already has some.
    pub async fn set_pin(&self, user_id: &str, pin: &str) -> FolioResult<StatusCode> {
        debug!(user_id, "setting credentials");
        let request = Request::post(CREDENTIALS)
            .json(&json!({ "userId": user_id, "password": pin }))?
            .status_only();
        self.execute_status(&request).await
    }
}
