use folio_rs::responses::HasRecords;
use folio_rs::{FolioClient, FolioRecord};

#[derive(FolioRecord, Debug, serde::Deserialize, Clone)]
#[folio(path = "/service-points", collection = "servicepoints", limit = 50)]
pub struct ServicePoint {
    pub id: String,
    pub name: String,
    pub code: String,
}

#[tokio::main]
async fn main() {
    // Construct a new client from the FOLIO_* environment.
    let client = FolioClient::from_env().unwrap();

    // Log in.
    let client = client.login().await.unwrap();

    // Retrieve the service points.
    let service_points = ServicePoint::fetch(&client, Some("pickupLocation==true"), None)
        .await
        .unwrap();

    for service_point in service_points.into_records() {
        println!("{:?}", service_point);
    }
}
