use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::params::escape_cql;
use crate::requests::Request;
use crate::{Authenticated, FolioClient, FolioResult, Parameters};

const LOANS: &str = "/circulation/loans";
const REQUESTS: &str = "/circulation/requests";
const CIRCULATION_LOG: &str = "/audit-data/circulation/logs";

/// Builds the CQL query selecting open loans due within `[from, to]`.
pub fn due_date_query(from: &str, to: &str) -> String {
    format!(
        "(dueDate>=\"{}\" and dueDate<=\"{}\" and status.name==Open)",
        escape_cql(from),
        escape_cql(to)
    )
}

impl FolioClient<Authenticated> {
    /// Lists loans.
    pub async fn get_loans(&self, limit: u32) -> FolioResult<Value> {
        self.execute_json(&Request::get(LOANS).param("limit", limit))
            .await
    }

    /// Lists up to 1000 open loans due between two dates (`YYYY-MM-DD` or full timestamps).
    pub async fn get_loans_by_due_date(&self, due_from: &str, due_to: &str) -> FolioResult<Value> {
        let params = Parameters::new()
            .limit(1000)
            .query(&due_date_query(due_from, due_to));
        self.execute_json(&Request::get(LOANS).params(params)).await
    }

    /// Deletes every loan in loan storage.
    pub async fn delete_loans(&self) -> FolioResult<StatusCode> {
        self.execute_status(&Request::delete("/loan-storage/loans"))
            .await
    }

    /// Lists up to 500 requests (holds) matching a CQL query.
    pub async fn get_holds(&self, query: &str) -> FolioResult<Value> {
        let params = Parameters::new().query(query).limit(500);
        self.execute_json(&Request::get(REQUESTS).params(params))
            .await
    }

    /// Moves a request to another item, optionally changing its type (`Hold`, `Page`, `Recall`).
    pub async fn move_hold(
        &self,
        request_id: &str,
        destination_item_id: &str,
        request_type: &str,
    ) -> FolioResult<Value> {
        let request = Request::post(REQUESTS)
            .segment(request_id)
            .segment("move")
            .json(&json!({
                "destinationItemId": destination_item_id,
                "requestType": request_type,
            }))?;
        self.execute_json(&request).await
    }

    /// Deletes every request in request storage.
    pub async fn delete_requests(&self) -> FolioResult<StatusCode> {
        self.execute_status(&Request::delete("/request-storage/requests"))
            .await
    }

    /// Checks out an item to a patron at a service point.
    pub async fn check_out_by_barcode(
        &self,
        item_barcode: &str,
        user_barcode: &str,
        service_point_id: &str,
    ) -> FolioResult<Value> {
        let request = Request::post("/circulation/check-out-by-barcode").json(&json!({
            "itemBarcode": item_barcode,
            "userBarcode": user_barcode,
            "servicePointId": service_point_id,
        }))?;
        self.execute_json(&request).await
    }

    /// Renews a loan.
    pub async fn renew_by_barcode(&self, item_barcode: &str, user_barcode: &str) -> FolioResult<Value> {
        let request = Request::post("/circulation/renew-by-barcode").json(&json!({
            "itemBarcode": item_barcode,
            "userBarcode": user_barcode,
        }))?;
        self.execute_json(&request).await
    }

    /// Runs the scheduled job that declares overdue items aged to lost.
    pub async fn run_aged_to_lost(&self) -> FolioResult<StatusCode> {
        self.execute_status(&Request::post("/circulation/scheduled-age-to-lost").status_only())
            .await
    }

    /// Runs the scheduled job that charges fees for items aged to lost.
    pub async fn run_aged_to_lost_fee_charging(&self) -> FolioResult<StatusCode> {
        let request =
            Request::post("/circulation/scheduled-age-to-lost-fee-charging").status_only();
        self.execute_status(&request).await
    }

    /// Reads the circulation log.
    pub async fn get_circulation_log(&self, limit: u32) -> FolioResult<Value> {
        self.execute_json(&Request::get(CIRCULATION_LOG).param("limit", limit))
            .await
    }

    /// Deletes the circulation log.
    pub async fn delete_circulation_log(&self) -> FolioResult<StatusCode> {
        self.execute_status(&Request::delete(CIRCULATION_LOG))
            .await
    }
}
