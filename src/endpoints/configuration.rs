use serde_json::Value;

use crate::requests::Request;
use crate::{Authenticated, FolioClient, FolioResult};

impl FolioClient<Authenticated> {
    /// Reads the audit trail of configuration entries.
    pub async fn get_configurations_audit(&self) -> FolioResult<Value> {
        self.execute_json(&Request::get("/configurations/audit"))
            .await
    }
}
