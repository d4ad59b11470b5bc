use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::requests::{Accept, Request};
use crate::{Authenticated, FolioClient, FolioResult, Parameters};

const INSTANCES: &str = "/instance-storage/instances";
const INSTANCE_RELATIONSHIPS: &str = "/instance-storage/instance-relationships";
const PRECEDING_SUCCEEDING_TITLES: &str = "/preceding-succeeding-titles";
const ITEMS: &str = "/item-storage/items";
const HOLDINGS: &str = "/holdings-storage/holdings";

impl FolioClient<Authenticated> {
    /// Retrieves a specific instance.
    pub async fn get_instance(&self, instance_id: &str) -> FolioResult<Value> {
        self.execute_json(&Request::get(INSTANCES).segment(instance_id))
            .await
    }

    /// Retrieves instances matching a CQL query, at most `limit` of them.
    pub async fn get_instances(&self, query: &str, limit: u32) -> FolioResult<Value> {
        let params = Parameters::new().query(query).limit(limit);
        self.execute_json(&Request::get(INSTANCES).params(params))
            .await
    }

    /// Deletes an instance.
    ///
    /// A `500` usually means the instance cannot be deleted because other records still refer to it.
    pub async fn delete_instance(&self, instance_id: &str) -> FolioResult<StatusCode> {
        self.execute_status(&Request::delete(INSTANCES).segment(instance_id))
            .await
    }

    /// Lists instance relationships.
    pub async fn get_instance_relationships(&self, limit: u32) -> FolioResult<Value> {
        self.execute_json(&Request::get(INSTANCE_RELATIONSHIPS).param("limit", limit))
            .await
    }

    /// Deletes an instance relationship.
    pub async fn delete_instance_relationship(&self, relationship_id: &str) -> FolioResult<StatusCode> {
        self.execute_status(&Request::delete(INSTANCE_RELATIONSHIPS).segment(relationship_id))
            .await
    }

    /// Lists preceding/succeeding title links.
    pub async fn get_preceding_succeeding_titles(&self, limit: u32) -> FolioResult<Value> {
        self.execute_json(&Request::get(PRECEDING_SUCCEEDING_TITLES).param("limit", limit))
            .await
    }

    /// Deletes a preceding/succeeding title link.
    pub async fn delete_preceding_succeeding_title(&self, title_id: &str) -> FolioResult<StatusCode> {
        self.execute_status(&Request::delete(PRECEDING_SUCCEEDING_TITLES).segment(title_id))
            .await
    }

    /// Retrieves items matching a CQL query, at most `limit` of them.
    pub async fn get_items(&self, query: &str, limit: u32) -> FolioResult<Value> {
        let params = Parameters::new().query(query).limit(limit);
        self.execute_json(&Request::get(ITEMS).params(params)).await
    }

    /// Deletes an item.
    pub async fn delete_item(&self, item_id: &str) -> FolioResult<StatusCode> {
        self.execute_status(&Request::delete(ITEMS).segment(item_id))
            .await
    }

    /// Replaces an item through the inventory business logic module.
    pub async fn update_item<T>(&self, item_id: &str, item: &T) -> FolioResult<StatusCode>
    where
        T: Serialize + ?Sized,
    {
        let request = Request::put("/inventory/items").segment(item_id).json(item)?;
        self.execute_status(&request).await
    }

    /// Creates or updates items in one synchronous batch.
    pub async fn import_items<T>(&self, items: &T) -> FolioResult<StatusCode>
    where
        T: Serialize + ?Sized,
    {
        let request = Request::post("/item-storage/batch/synchronous")
            .json(items)?
            .status_only();
        self.execute_status(&request).await
    }

    /// Retrieves holdings records matching a CQL query, at most `limit` of them.
    pub async fn get_holdings_storage(&self, query: &str, limit: u32) -> FolioResult<Value> {
        let params = Parameters::new().query(query).limit(limit);
        self.execute_json(&Request::get(HOLDINGS).params(params))
            .await
    }

    /// Retrieves a specific holdings record.
    pub async fn get_holdings(&self, holdings_id: &str) -> FolioResult<Value> {
        self.execute_json(&Request::get(HOLDINGS).segment(holdings_id))
            .await
    }

    /// Replaces a holdings record, e.g. to set a call number suffix.
    pub async fn update_holdings<T>(&self, holdings_id: &str, holdings: &T) -> FolioResult<StatusCode>
    where
        T: Serialize + ?Sized,
    {
        let request = Request::put(HOLDINGS)
            .segment(holdings_id)
            .json(holdings)?
            .accept(Accept::Text);
        self.execute_status(&request).await
    }

    /// Deletes a holdings record.
    pub async fn delete_holdings_record(&self, holdings_id: &str) -> FolioResult<StatusCode> {
        self.execute_status(&Request::delete(HOLDINGS).segment(holdings_id))
            .await
    }

    /// Creates or updates holdings records in one synchronous batch.
    pub async fn import_holdings<T>(&self, holdings: &T) -> FolioResult<StatusCode>
    where
        T: Serialize + ?Sized,
    {
        let request = Request::post("/holdings-storage/batch/synchronous")
            .json(holdings)?
            .status_only();
        self.execute_status(&request).await
    }

    /// Lists shelving locations.
    pub async fn get_locations(&self) -> FolioResult<Value> {
        self.execute_json(&Request::get("/locations").param("limit", 1000))
            .await
    }

    /// Lists material types.
    pub async fn get_material_types(&self) -> FolioResult<Value> {
        self.execute_json(&Request::get("/material-types").param("limit", 100))
            .await
    }

    /// Lists loan types.
    pub async fn get_loan_types(&self) -> FolioResult<Value> {
        self.execute_json(&Request::get("/loan-types").param("limit", 200))
            .await
    }

    /// Lists call number types.
    pub async fn get_call_number_types(&self) -> FolioResult<Value> {
        self.execute_json(&Request::get("/call-number-types").param("limit", 20))
            .await
    }

    /// Deletes a service point.
    pub async fn delete_service_point(&self, service_point_id: &str) -> FolioResult<StatusCode> {
        self.execute_status(&Request::delete("/service-points").segment(service_point_id))
            .await
    }
}
