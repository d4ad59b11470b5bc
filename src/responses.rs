use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection_response;
use crate::{FolioError, FolioResult};

/// Successful result of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The parsed JSON body.
    Json(Value),
    /// The status code; the body was not inspected.
    Status(StatusCode),
}

impl Outcome {
    /// Returns the JSON payload, or an error if only a status was requested.
    pub fn into_json(self) -> FolioResult<Value> {
        match self {
            Outcome::Json(value) => Ok(value),
            Outcome::Status(status) => Err(FolioError::UnexpectedResponse(format!(
                "expected a JSON payload, got status {status}"
            ))),
        }
    }

    /// Returns the JSON payload, if any.
    pub fn json(&self) -> Option<&Value> {
        match self {
            Outcome::Json(value) => Some(value),
            Outcome::Status(_) => None,
        }
    }

    /// Returns the status code, if only a status was requested.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Outcome::Status(status) => Some(*status),
            Outcome::Json(_) => None,
        }
    }
}

/// Trait for collection responses that contain a list of records.
pub trait HasRecords<T> {
    /// The records of this page.
    fn records(&self) -> &[T];
    /// Consumes the response and returns its records.
    fn into_records(self) -> Vec<T>;
    /// The number of records matching the query, across all pages.
    fn total_records(&self) -> u64;
}

/// `resultInfo` block of a collection response.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ResultInfo {
    /// The number of records matching the query.
    #[serde(rename = "totalRecords", default)]
    pub total_records: Option<u64>,
}

/// A user record.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct User {
    /// The UUID of the user.
    pub id: String,
    /// The login name.
    #[serde(default)]
    pub username: Option<String>,
    /// The library card barcode.
    #[serde(default)]
    pub barcode: Option<String>,
    /// All remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// An address type, e.g. `Home` or `Work`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AddressType {
    /// The UUID of the address type.
    pub id: String,
    /// The name of the address type.
    #[serde(rename = "addressType")]
    pub address_type: String,
    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

/// The permissions assigned to a user.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PermissionUser {
    /// The UUID of the permission user record (not of the user).
    pub id: String,
    /// The UUID of the user.
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Assigned permission names.
    #[serde(default)]
    pub permissions: Vec<String>,
}

collection_response!(UserCollection, "users", User);
collection_response!(AddressTypeCollection, "addressTypes", AddressType);
collection_response!(PermissionUserCollection, "permissionUsers", PermissionUser);

/// Response of `GET /authn/credentials-existence`.
#[derive(Deserialize, Debug, Clone)]
pub struct CredentialsExistence {
    /// Whether the user has login credentials (a PIN) set.
    #[serde(rename = "credentialsExist")]
    pub credentials_exist: bool,
}

/// A source record, as far as it is needed to resolve its id.
#[derive(Deserialize, Debug, Clone)]
pub struct FormattedRecord {
    /// The UUID of the source record.
    pub id: String,
}

/// Upload definition returned by the data import module.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UploadDefinition {
    /// The UUID of the upload definition.
    pub id: String,
    /// The files registered with this upload.
    #[serde(rename = "fileDefinitions", default)]
    pub file_definitions: Vec<FileDefinition>,
    /// All remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A file registered with an upload definition.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct FileDefinition {
    /// The UUID of the file definition.
    pub id: String,
    /// The file name.
    #[serde(default)]
    pub name: Option<String>,
    /// All remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Job profile used when processing uploaded files.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct JobProfileInfo {
    /// The UUID of the job profile.
    pub id: String,
    /// The name of the job profile.
    pub name: String,
    /// The type of the imported data, usually `MARC`.
    #[serde(rename = "dataType")]
    pub data_type: String,
}

impl JobProfileInfo {
    /// Creates a job profile reference for MARC data.
    pub fn marc(id: &str, name: &str) -> Self {
        JobProfileInfo {
            id: id.to_string(),
            name: name.to_string(),
            data_type: "MARC".to_string(),
        }
    }
}

/// Request body of `POST /data-import/uploadDefinitions/{id}/processFiles`.
#[derive(Serialize, Debug, Clone)]
pub struct ProcessFilesRequest {
    /// The upload definition, exactly as returned after uploading the file.
    #[serde(rename = "uploadDefinition")]
    pub upload_definition: Value,
    /// The job profile to process the files with.
    #[serde(rename = "jobProfileInfo")]
    pub job_profile_info: JobProfileInfo,
}

/// Result of a complete MARC import.
#[derive(Debug, Clone)]
pub struct ImportReceipt {
    /// The UUID of the upload definition.
    pub upload_definition_id: String,
    /// The UUID of the uploaded file definition.
    pub file_definition_id: String,
    /// The upload definition as returned after the file upload.
    pub upload_definition: Value,
    /// The status returned when processing was triggered.
    pub status: StatusCode,
}
