use reqwest::StatusCode;
use serde_json::Value;

use crate::requests::Request;
use crate::responses::FormattedRecord;
use crate::{Authenticated, FolioClient, FolioResult, Parameters};

const RECORDS: &str = "/source-storage/records";

impl FolioClient<Authenticated> {
    /// Lists source records, optionally including records marked as deleted.
    pub async fn get_source_records(&self, limit: u32, deleted: bool) -> FolioResult<Value> {
        let params = Parameters::new().limit(limit).param("deleted", deleted);
        self.execute_json(&Request::get("/source-storage/source-records").params(params))
            .await
    }

    /// Resolves the id of the source record (SRS) behind an instance.
    pub async fn get_srs_record_id(&self, instance_id: &str) -> FolioResult<String> {
        let request = Request::get(RECORDS)
            .segment(instance_id)
            .segment("formatted")
            .param("idType", "INSTANCE");
        let record: FormattedRecord = self.execute_json(&request).await?;
        Ok(record.id)
    }

    /// Deletes a source record.
    pub async fn delete_srs_record(&self, record_id: &str) -> FolioResult<StatusCode> {
        self.execute_status(&Request::delete(RECORDS).segment(record_id))
            .await
    }
}
