use std::path::Path;

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use crate::requests::Request;
use crate::responses::{ImportReceipt, JobProfileInfo, ProcessFilesRequest, UploadDefinition};
use crate::{Authenticated, FolioClient, FolioError, FolioResult};

const UPLOAD_DEFINITIONS: &str = "/data-import/uploadDefinitions";
const MAPPING_RULES: &str = "/mapping-rules";

impl FolioClient<Authenticated> {
    /// Registers a new upload containing one file.
    pub async fn upload_definitions(&self, file_name: &str) -> FolioResult<Value> {
        let request = Request::post(UPLOAD_DEFINITIONS).json(&json!({
            "fileDefinitions": [{ "name": file_name }],
        }))?;
        self.execute_json(&request).await
    }

    /// Uploads the content of a file registered with an upload definition.
    pub async fn upload_file(
        &self,
        upload_definition_id: &str,
        file_definition_id: &str,
        content: Vec<u8>,
    ) -> FolioResult<Value> {
        debug!(bytes = content.len(), "uploading file");
        let request = Request::post(UPLOAD_DEFINITIONS)
            .segment(upload_definition_id)
            .segment("files")
            .segment(file_definition_id)
            .bytes(content);
        self.execute_json(&request).await
    }

    /// Starts processing the files of an upload with a job profile.
    pub async fn process_files(
        &self,
        upload_definition_id: &str,
        process: &ProcessFilesRequest,
    ) -> FolioResult<StatusCode> {
        let request = Request::post(UPLOAD_DEFINITIONS)
            .segment(upload_definition_id)
            .segment("processFiles")
            .param("defaultMapping", true)
            .json(process)?
            .status_only();
        self.execute_status(&request).await
    }

    /// Imports a MARC file: registers the upload, uploads the content and starts processing it.
    ///
    /// Processing runs asynchronously on the server; the receipt only says it was accepted.
    #[instrument(skip(self, content, job_profile), fields(bytes = content.len()))]
    pub async fn import_marc(
        &self,
        file_name: &str,
        content: Vec<u8>,
        job_profile: &JobProfileInfo,
    ) -> FolioResult<ImportReceipt> {
        let definition: UploadDefinition =
            serde_json::from_value(self.upload_definitions(file_name).await?).map_err(|err| {
                FolioError::UnexpectedResponse(format!("invalid upload definition: {err}"))
            })?;
        let file_definition_id = definition
            .file_definitions
            .first()
            .map(|file| file.id.clone())
            .ok_or_else(|| {
                FolioError::UnexpectedResponse(
                    "upload definition has no file definitions".to_string(),
                )
            })?;
        debug!(upload_definition_id = %definition.id, %file_definition_id, "upload registered");

        let uploaded = self
            .upload_file(&definition.id, &file_definition_id, content)
            .await?;

        let process = ProcessFilesRequest {
            upload_definition: uploaded.clone(),
            job_profile_info: job_profile.clone(),
        };
        let status = self.process_files(&definition.id, &process).await?;
        info!(upload_definition_id = %definition.id, "MARC import started");

        Ok(ImportReceipt {
            upload_definition_id: definition.id,
            file_definition_id,
            upload_definition: uploaded,
            status,
        })
    }

    /// Retrieves the MARC mapping rules and writes them as pretty-printed JSON to `snapshot`.
    pub async fn get_mapping_rules(&self, snapshot: impl AsRef<Path>) -> FolioResult<Value> {
        let rules: Value = self.execute_json(&Request::get(MAPPING_RULES)).await?;

        let snapshot = snapshot.as_ref();
        tokio::fs::write(snapshot, serde_json::to_string_pretty(&rules)?).await?;
        info!(path = %snapshot.display(), "wrote mapping rules snapshot");

        Ok(rules)
    }

    /// Replaces the MARC mapping rules.
    pub async fn update_mapping_rules<T>(&self, rules: &T) -> FolioResult<StatusCode>
    where
        T: Serialize + ?Sized,
    {
        self.execute_status(&Request::put(MAPPING_RULES).json(rules)?)
            .await
    }

    /// Restores the default MARC mapping rules.
    pub async fn restore_mapping_rules(&self) -> FolioResult<StatusCode> {
        self.execute_status(&Request::put(MAPPING_RULES).segment("restore"))
            .await
    }
}
