use folio_rs::requests::{Request, RequestToHttpString};
use folio_rs::{Authenticated, Credentials, ErrorKind, FolioClient, FolioError, Outcome, StatusCode};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TENANT: &str = "diku";

fn client_for(uri: &str) -> FolioClient {
    FolioClient::builder()
        .okapi_url(uri)
        .tenant(TENANT)
        .credentials(Credentials::new("diku_admin", "admin"))
        .build()
        .unwrap()
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/authn/login"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("x-okapi-token", token)
                .set_body_json(json!({ "username": "diku_admin" })),
        )
        .mount(server)
        .await;
}

async fn logged_in(server: &MockServer) -> FolioClient<Authenticated> {
    mount_login(server, "token-1").await;
    client_for(&server.uri()).login().await.unwrap()
}

#[tokio::test]
async fn login_captures_token_and_sends_it_on_later_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authn/login"))
        .and(header("x-okapi-tenant", TENANT))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "username": "diku_admin", "password": "admin" })))
        .respond_with(ResponseTemplate::new(201).insert_header("x-okapi-token", "token-1"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/instance-storage/instances/inst-1"))
        .and(header("x-okapi-tenant", TENANT))
        .and(header("x-okapi-token", "token-1"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "inst-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri()).login().await.unwrap();
    assert_eq!(client.token().await.unwrap(), "token-1");

    let instance = client.get_instance("inst-1").await.unwrap();
    assert_eq!(instance["id"], "inst-1");
}

#[tokio::test]
async fn failed_login_reports_the_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authn/login"))
        .respond_with(ResponseTemplate::new(422).set_body_string("Password does not match"))
        .mount(&server)
        .await;

    let err = client_for(&server.uri()).login().await.err().unwrap();

    assert_eq!(err.kind(), ErrorKind::Http);
    assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
    assert!(!err.to_string().contains("Password does not match"));
    match err {
        FolioError::Http { message, .. } => assert_eq!(message, "Password does not match"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn login_without_token_header_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authn/login"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "username": "diku_admin" })))
        .mount(&server)
        .await;

    let err = client_for(&server.uri()).login().await.err().unwrap();

    assert!(matches!(err, FolioError::MissingToken));
    assert_eq!(err.kind(), ErrorKind::Authentication);
}

#[tokio::test]
async fn preset_token_skips_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authn/login"))
        .respond_with(ResponseTemplate::new(201).insert_header("x-okapi-token", "unused"))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .and(header("x-okapi-token", "preset"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "locations": [], "totalRecords": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FolioClient::builder()
        .okapi_url(&server.uri())
        .tenant(TENANT)
        .credentials(Credentials::new("diku_admin", "admin"))
        .token("preset")
        .build()
        .unwrap()
        .login()
        .await
        .unwrap();

    let locations = client.get_locations().await.unwrap();
    assert_eq!(locations["totalRecords"], 0);
}

#[tokio::test]
async fn refresh_token_replaces_the_session_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authn/login"))
        .respond_with(ResponseTemplate::new(201).insert_header("x-okapi-token", "token-1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_login(&server, "token-2").await;
    Mock::given(method("GET"))
        .and(path("/configurations/audit"))
        .and(header("x-okapi-token", "token-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "audits": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri()).login().await.unwrap();
    assert_eq!(client.token().await.unwrap(), "token-1");

    client.refresh_token().await.unwrap();
    assert_eq!(client.token().await.unwrap(), "token-2");

    client.get_configurations_audit().await.unwrap();
}

#[tokio::test]
async fn error_status_is_reported_exactly() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/item-storage/items"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/instance-storage/instances/inst-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("still referenced"))
        .mount(&server)
        .await;

    let err = client.get_items("barcode==1", 1).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    let err = client.delete_instance("inst-1").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    match err {
        FolioError::Http { url, message, .. } => {
            assert!(url.ends_with("/instance-storage/instances/inst-1"));
            assert_eq!(message, "still referenced");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = FolioClient::builder()
        .okapi_url("http://127.0.0.1:1")
        .tenant(TENANT)
        .credentials(Credentials::new("diku_admin", "admin"))
        .token("preset")
        .build()
        .unwrap()
        .login()
        .await
        .unwrap();

    let err = client.get_instance("inst-1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn invalid_json_is_a_decode_error() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/material-types"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = client.get_material_types().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn deletes_accept_plain_text() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/item-storage/items/item-1"))
        .and(header("accept", "text/plain"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let status = client.delete_item("item-1").await.unwrap();

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn ids_are_percent_encoded() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/holdings-storage/holdings/a%20b%2Fc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "a b/c" })))
        .expect(1)
        .mount(&server)
        .await;

    let holdings = client.get_holdings("a b/c").await.unwrap();

    assert_eq!(holdings["id"], "a b/c");
}

#[tokio::test]
async fn cql_queries_are_passed_as_parameters() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/instance-storage/instances"))
        .and(query_param("query", "title=\"Hamlet*\""))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "instances": [], "totalRecords": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    client.get_instances("title=\"Hamlet*\"", 5).await.unwrap();
}

#[tokio::test]
async fn http_dump_redacts_the_token() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    let request = Request::get("/loan-storage/loans").param("limit", 2);
    let prepared = client.prepare_request(&request).await.unwrap();
    let dump = prepared.to_http_string().unwrap();

    assert!(dump.starts_with("GET /loan-storage/loans?limit=2 HTTP/1.1"));
    assert!(dump.contains("x-okapi-tenant: diku"));
    assert!(dump.contains("x-okapi-token: <redacted>"));
    assert!(!dump.contains("token-1"));
}

#[tokio::test]
async fn user_lookup_by_username() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("query", "username==\"P123\""))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "id": "user-1", "username": "P123", "active": true }],
            "totalRecords": 1,
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("query", "username==\"nobody\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "users": [], "totalRecords": 0 })))
        .mount(&server)
        .await;

    let users = client.user_exists("P123").await.unwrap().unwrap();
    assert_eq!(folio_rs::endpoints::users::get_user_uuid(&users), Some("user-1".to_string()));
    assert_eq!(client.get_user_id("P123").await.unwrap(), Some("user-1".to_string()));

    assert!(client.user_exists("nobody").await.unwrap().is_none());
    assert_eq!(client.get_user_id("nobody").await.unwrap(), None);
}

#[tokio::test]
async fn create_user_posts_the_user_document() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "user-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let user = folio_rs::NewUser::builder()
        .id("P123")
        .first_name("Ada")
        .last_name("Lovelace")
        .build();
    let created = client.create_user(&user, "group-1", "addr-1").await.unwrap();
    assert_eq!(created["id"], "user-1");

    let received = server.received_requests().await.unwrap();
    let sent: serde_json::Value = received
        .iter()
        .find(|request| request.url.path() == "/users")
        .map(|request| serde_json::from_slice(&request.body).unwrap())
        .unwrap();
    assert_eq!(sent["username"], "P123");
    assert_eq!(sent["barcode"], "P123");
    assert_eq!(sent["patronGroup"], "group-1");
    assert_eq!(sent["personal"]["addresses"][0]["addressTypeId"], "addr-1");
}

#[tokio::test]
async fn permissions_and_pins() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("POST"))
        .and(path("/perms/users"))
        .and(body_json(json!({
            "userId": "user-1",
            "permissions": ["patron.all", "users.collection.get", "circulation.requests.item.get"],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "perm-1", "userId": "user-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/perms/users"))
        .and(query_param("query", "userId==\"user-1\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "permissionUsers": [{ "id": "perm-1", "userId": "user-1", "permissions": [] }],
            "totalRecords": 1,
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/perms/users/perm-1"))
        .and(body_json(json!({ "id": "perm-1", "userId": "user-1", "permissions": ["patron.all"] })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/authn/credentials-existence"))
        .and(query_param("userId", "user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "credentialsExist": true })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/authn/credentials"))
        .and(query_param("userId", "user-1"))
        .and(header("x-okapi-token", "token-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/authn/credentials"))
        .and(body_json(json!({ "userId": "user-1", "password": "1234" })))
        .and(header("x-okapi-token", "token-1"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.add_new_permissions("user-1").await.unwrap();
    assert_eq!(created["id"], "perm-1");

    let permissions_id = client.get_permissions_id("user-1").await.unwrap();
    assert_eq!(permissions_id.as_deref(), Some("perm-1"));

    let status = client
        .set_existing_permissions("perm-1", "user-1", &["patron.all"])
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert!(client.pin_exists("user-1").await.unwrap());
    assert_eq!(client.remove_pin("user-1").await.unwrap(), StatusCode::NO_CONTENT);
    assert_eq!(client.set_pin("user-1", "1234").await.unwrap(), StatusCode::CREATED);
}

#[tokio::test]
async fn srs_record_id_is_resolved_from_the_instance() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/source-storage/records/inst-1/formatted"))
        .and(query_param("idType", "INSTANCE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "srs-1", "recordType": "MARC_BIB" })))
        .mount(&server)
        .await;

    assert_eq!(client.get_srs_record_id("inst-1").await.unwrap(), "srs-1");
}

#[tokio::test]
async fn execute_reports_status_for_status_only_requests() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/item-storage/items/item-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client
        .execute(&Request::delete("/item-storage/items").segment("item-1"))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Status(StatusCode::NO_CONTENT));
    assert_eq!(outcome.status(), Some(StatusCode::NO_CONTENT));
    assert!(outcome.json().is_none());
    assert!(outcome.into_json().is_err());
}

#[tokio::test]
async fn execute_parses_json_requests() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "usergroups": [], "totalRecords": 0 })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/inventory/items/item-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "item-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client.execute(&Request::get("/groups")).await.unwrap();
    assert_eq!(outcome.status(), None);
    assert_eq!(outcome.json().unwrap()["totalRecords"], 0);

    let updated = client
        .execute(
            &Request::put("/inventory/items")
                .segment("item-1")
                .json(&json!({ "id": "item-1" }))
                .unwrap()
                .expect_json(),
        )
        .await
        .unwrap()
        .into_json()
        .unwrap();
    assert_eq!(updated["id"], "item-1");
}

#[tokio::test]
async fn typed_helpers_refuse_a_mismatched_shape_without_sending() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/item-storage/items/item-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "locations": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .execute_json::<serde_json::Value>(&Request::delete("/item-storage/items").segment("item-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, FolioError::UnexpectedResponse(_)));

    let err = client
        .execute_status(&Request::get("/locations"))
        .await
        .unwrap_err();
    assert!(matches!(err, FolioError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn get_data_sends_query_and_limit() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/orders/composite-orders"))
        .and(query_param("query", "poNumber==\"10001\""))
        .and(query_param("limit", "3"))
        .and(header("x-okapi-token", "token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "purchaseOrders": [], "totalRecords": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let orders = client
        .get_data("/orders/composite-orders", "poNumber==\"10001\"", 3)
        .await
        .unwrap();

    assert_eq!(orders["totalRecords"], 0);
}

#[tokio::test]
async fn post_data_returns_the_status() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("POST"))
        .and(path("/service-points"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "name": "Main desk", "code": "main" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "sp-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client
        .post_data("/service-points", &json!({ "name": "Main desk", "code": "main" }))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn put_data_accepts_plain_text() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("PUT"))
        .and(path("/users/user-1"))
        .and(header("accept", "text/plain"))
        .and(body_json(json!({ "id": "user-1", "active": false })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let status = client
        .put_data("/users/user-1", &json!({ "id": "user-1", "active": false }))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn user_lookup_counts_result_info_total() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "id": "user-1", "username": "P123" }],
            "resultInfo": { "totalRecords": 1 },
        })))
        .mount(&server)
        .await;

    let users = client.user_exists("P123").await.unwrap().unwrap();

    assert_eq!(users.records.len(), 1);
    assert_eq!(client.get_user_id("P123").await.unwrap(), Some("user-1".to_string()));
}
