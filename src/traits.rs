use serde::de::DeserializeOwned;

use crate::requests::Request;
use crate::responses::HasRecords;
use crate::{Authenticated, FolioClient, FolioResult, Parameters};

/// Trait for the FolioRecord derive macro.
///
/// Binds a record type to the storage path it lives under, so it can be fetched without spelling out
/// the path and the collection key at every call site.
#[folio_rs::async_trait]
pub trait FolioRecord: Sized + Send + DeserializeOwned {
    /// The path of the list endpoint, e.g. `/item-storage/items`.
    const PATH: &'static str;
    /// The key of the record array in a collection response, e.g. `items`.
    const COLLECTION: &'static str;
    /// The `limit` used when none is given.
    const LIMIT: u32 = 10;

    /// The collection response type.
    type Collection: DeserializeOwned + HasRecords<Self> + Send;

    /// Retrieves records of this type, optionally filtered by a CQL query.
    async fn fetch(
        client: &FolioClient<Authenticated>,
        query: Option<&str>,
        limit: Option<u32>,
    ) -> FolioResult<Self::Collection> {
        let mut params = Parameters::new().limit(limit.unwrap_or(Self::LIMIT));
        if let Some(query) = query {
            params = params.query(query);
        }
        client
            .execute_json(&Request::get(Self::PATH).params(params))
            .await
    }

    /// Retrieves a single record by its id.
    async fn fetch_by_id(client: &FolioClient<Authenticated>, id: &str) -> FolioResult<Self> {
        client
            .execute_json(&Request::get(Self::PATH).segment(id))
            .await
    }
}
