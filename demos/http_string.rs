use folio_rs::requests::{Request, RequestToHttpString};
use folio_rs::{Credentials, FolioClient};

#[tokio::main]
async fn main() {
    let okapi_url = std::env::var("FOLIO_ENDPOINT").expect("FOLIO_ENDPOINT not set");
    let tenant = std::env::var("FOLIO_OKAPI_TENANT").expect("FOLIO_OKAPI_TENANT not set");
    let username = std::env::var("FOLIO_USERNAME").expect("FOLIO_USERNAME not set");
    let password = std::env::var("FOLIO_PASSWORD").expect("FOLIO_PASSWORD not set");

    let client = FolioClient::builder()
        .okapi_url(&okapi_url)
        .tenant(&tenant)
        .credentials(Credentials::new(&username, &password))
        .build()
        .expect("invalid Okapi URL");

    let client = client.login().await.expect("failed to log in");

    let request = client
        .prepare_request(
            &Request::get("/instance-storage/instances")
                .param("query", "title=\"Hamlet*\"")
                .param("limit", 10),
        )
        .await
        .expect("invalid request");

    // The session token is printed as <redacted>.
    println!("{}", request.to_http_string().unwrap());
}
