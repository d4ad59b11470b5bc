use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::params::escape_cql;
use crate::requests::Request;
use crate::responses::{HasRecords, PermissionUserCollection};
use crate::{Authenticated, FolioClient, FolioResult, Parameters};

const PERMISSION_USERS: &str = "/perms/users";

/// Permissions given to a patron created by a self-registration flow.
pub const DEFAULT_PATRON_PERMISSIONS: [&str; 3] = [
    "patron.all",
    "users.collection.get",
    "circulation.requests.item.get",
];

impl FolioClient<Authenticated> {
    /// Creates the permission user record of a new user with the default patron permissions.
    pub async fn add_new_permissions(&self, user_id: &str) -> FolioResult<Value> {
        self.add_permissions(user_id, &DEFAULT_PATRON_PERMISSIONS)
            .await
    }

    /// Creates the permission user record of a user.
    pub async fn add_permissions<S>(&self, user_id: &str, permissions: &[S]) -> FolioResult<Value>
    where
        S: AsRef<str>,
    {
        let permissions: Vec<&str> = permissions.iter().map(AsRef::as_ref).collect();
        let request = Request::post(PERMISSION_USERS).json(&json!({
            "userId": user_id,
            "permissions": permissions,
        }))?;
        self.execute_json(&request).await
    }

    /// Replaces the permissions of an existing permission user record.
    ///
    /// `permissions_id` is the id of the permission user record, see [`get_permissions_id`](Self::get_permissions_id).
    pub async fn set_existing_permissions<S>(
        &self,
        permissions_id: &str,
        user_id: &str,
        permissions: &[S],
    ) -> FolioResult<StatusCode>
    where
        S: AsRef<str>,
    {
        let permissions: Vec<&str> = permissions.iter().map(AsRef::as_ref).collect();
        let request = Request::put(PERMISSION_USERS)
            .segment(permissions_id)
            .json(&json!({
                "id": permissions_id,
                "userId": user_id,
                "permissions": permissions,
            }))?;
        self.execute_status(&request).await
    }

    /// Returns the id of the permission user record belonging to a user, if there is one.
    pub async fn get_permissions_id(&self, user_id: &str) -> FolioResult<Option<String>> {
        let params = Parameters::new().query(&format!("userId==\"{}\"", escape_cql(user_id)));
        let records: PermissionUserCollection = self
            .execute_json(&Request::get(PERMISSION_USERS).params(params))
            .await?;

        Ok(records.records().first().map(|record| record.id.clone()))
    }
}
