use folio_rs::requests::Request;
use folio_rs::responses::HasRecords;
use folio_rs::{collection, collection_response, Authenticated, FolioClient, Parameters};
use serde::Deserialize;

async fn get_json_value(client: &FolioClient<Authenticated>) {
    let outcome = client
        .execute(&Request::get("/material-types").params(collection! {
            "limit" => "5",
        }))
        .await
        .unwrap();

    println!("{:#?}", outcome);
}

#[derive(Deserialize, serde::Serialize, Debug, Clone)]
pub struct LoanType {
    pub id: String,
    pub name: String,
}

collection_response!(LoanTypes, "loantypes", LoanType);

async fn get_deserialized_value(client: &FolioClient<Authenticated>) {
    let loan_types: LoanTypes = client
        .execute_json(&Request::get("/loan-types").params(Parameters::new().limit(20)))
        .await
        .unwrap();

    println!("{} loan types", loan_types.total_records());
    for loan_type in loan_types.records() {
        println!("{:?}", loan_type);
    }
}

#[tokio::main]
async fn main() {
    // Reads FOLIO_ENDPOINT, FOLIO_OKAPI_TENANT, FOLIO_USERNAME and FOLIO_PASSWORD, from .env if present.
    let client = FolioClient::from_env().expect("incomplete FOLIO_* environment");

    let client = client.login().await.expect("failed to log in");

    get_json_value(&client).await;
    get_deserialized_value(&client).await;
}
