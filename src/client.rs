use std::marker::PhantomData;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};
use typed_builder::TypedBuilder;
use url::Url;

use crate::client::states::*;
use crate::requests::{Accept, Body, Request, ResponseShape};
use crate::{Config, Credentials, FolioError, FolioResult, Outcome, Parameters};

/// Header carrying the tenant identifier.
pub const OKAPI_TENANT_HEADER: &str = "x-okapi-tenant";
/// Header carrying the session token.
pub const OKAPI_TOKEN_HEADER: &str = "x-okapi-token";

const LOGIN_PATH: &str = "/authn/login";
const JSON_CONTENT: &str = "application/json";
const BINARY_CONTENT: &str = "application/octet-stream";

/// The internal builder for constructing a `FolioClient`
#[derive(TypedBuilder)]
#[builder(build_method(into = FolioResult<FolioClient<Unauthenticated>>))]
pub struct InternalFolioClient {
    /// Full URL of the Okapi gateway
    ///
    /// Example: `https://okapi.example.org`
    #[builder(setter(transform = |url: &str| url.to_string()))]
    okapi_url: String,
    /// Tenant identifier
    #[builder(setter(transform = |tenant: &str| tenant.to_string()))]
    tenant: String,
    /// Login credentials
    credentials: Credentials,
    /// An existing session token; `login()` will not contact the server if set
    #[builder(default, setter(transform = |token: &str| Some(token.to_string())))]
    token: Option<String>,
    /// Allow unsafe SSL certificates
    #[builder(default = false)]
    allow_insecure: bool,
    /// Timeout for each request
    #[builder(default = Duration::from_secs(60))]
    timeout: Duration,
}

/// Contains the states the client can be in
pub mod states {
    /// The state of the client
    ///
    /// Unauthenticated: no login has been performed
    pub struct Unauthenticated;
    /// The state of the client
    ///
    /// Authenticated: the client holds a session token
    pub struct Authenticated;
}

/// The web client for the Okapi gateway of a FOLIO tenant
pub struct FolioClient<State = Unauthenticated> {
    /// Base URL of the Okapi gateway
    okapi_url: Url,
    /// Tenant identifier
    tenant: String,
    /// Login credentials, kept for token refreshes
    credentials: Credentials,
    /// Current session token
    token: RwLock<Option<String>>,
    /// The client
    client: reqwest::Client,

    state: PhantomData<State>,
}

impl From<InternalFolioClient> for FolioResult<FolioClient<Unauthenticated>> {
    fn from(client: InternalFolioClient) -> Self {
        let okapi_url = Url::parse(&client.okapi_url)?;
        if okapi_url.cannot_be_a_base() {
            return Err(FolioError::InvalidBaseUrl);
        }

        let req_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(client.allow_insecure)
            .timeout(client.timeout)
            .build()?;

        Ok(FolioClient {
            okapi_url,
            tenant: client.tenant,
            credentials: client.credentials,
            token: RwLock::new(client.token),
            client: req_client,
            state: PhantomData::<Unauthenticated>,
        })
    }
}

impl FolioClient {
    /// Creates a builder for the client
    pub fn builder() -> InternalFolioClientBuilder {
        InternalFolioClient::builder()
    }

    /// Creates a client from a [`Config`]
    pub fn from_config(config: Config) -> FolioResult<FolioClient<Unauthenticated>> {
        FolioClient::builder()
            .okapi_url(&config.okapi_url)
            .tenant(&config.tenant)
            .credentials(config.credentials)
            .build()
    }

    /// Creates a client from the `FOLIO_*` environment variables, see [`Config::from_env`]
    pub fn from_env() -> FolioResult<FolioClient<Unauthenticated>> {
        Self::from_config(Config::from_env()?)
    }

    /// Logs in and returns an authenticated client.
    ///
    /// If a token was passed to the builder, it is used as is and no request is made.
    /// A failed login is an error; a client without a valid token is never returned.
    pub async fn login(mut self) -> FolioResult<FolioClient<Authenticated>> {
        let token = match self.token.get_mut().take() {
            Some(token) => {
                debug!(tenant = %self.tenant, "using preset okapi token");
                token
            }
            None => self.fetch_token().await?,
        };

        Ok(FolioClient {
            okapi_url: self.okapi_url,
            tenant: self.tenant,
            credentials: self.credentials,
            token: RwLock::new(Some(token)),
            client: self.client,
            state: PhantomData::<Authenticated>,
        })
    }
}

impl<State> FolioClient<State> {
    /// Returns the tenant identifier
    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// Returns the base URL of the Okapi gateway
    pub fn okapi_url(&self) -> &Url {
        &self.okapi_url
    }

    /// Builds the URL for a path relative to the Okapi URL, followed by percent-encoded segments.
    pub fn url_for(&self, path: &str, segments: &[String]) -> FolioResult<Url> {
        let mut url = self.okapi_url.clone();
        {
            let mut parts = url
                .path_segments_mut()
                .map_err(|_| FolioError::InvalidBaseUrl)?;
            parts.pop_if_empty();
            parts.extend(path.split('/').filter(|part| !part.is_empty()));
            parts.extend(segments);
        }
        Ok(url)
    }

    /// Returns the headers sent with every request.
    ///
    /// A new map is built on each call, so per-request overrides never leak into other requests.
    pub fn headers(
        &self,
        accept: Accept,
        content_type: &'static str,
        token: Option<&str>,
    ) -> FolioResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(accept.as_str()));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers.insert(OKAPI_TENANT_HEADER, HeaderValue::from_str(&self.tenant)?);

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(token)?;
            value.set_sensitive(true);
            headers.insert(OKAPI_TOKEN_HEADER, value);
        }

        Ok(headers)
    }

    /// Posts the credentials to the login endpoint and returns the token from the response header.
    #[instrument(skip(self), fields(tenant = %self.tenant, username = %self.credentials.username))]
    async fn fetch_token(&self) -> FolioResult<String> {
        info!("requesting okapi token");
        let url = self.url_for(LOGIN_PATH, &[])?;
        let headers = self.headers(Accept::Json, JSON_CONTENT, None)?;

        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(&self.credentials)
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, "login request failed");
                FolioError::from(err)
            })?;
        let response = ensure_success(response).await?;

        let token = response
            .headers()
            .get(OKAPI_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                error!("login response did not contain a session token");
                FolioError::MissingToken
            })?;

        info!("acquired okapi token");
        Ok(token.to_string())
    }
}

impl FolioClient<Authenticated> {
    /// Returns the current session token
    pub async fn token(&self) -> FolioResult<String> {
        self.token
            .read()
            .await
            .clone()
            .ok_or(FolioError::NotAuthenticated)
    }

    /// Logs in again and replaces the session token.
    ///
    /// The previous token is kept if the login fails.
    pub async fn refresh_token(&self) -> FolioResult<()> {
        let token = self.fetch_token().await?;
        *self.token.write().await = Some(token);
        info!(tenant = %self.tenant, "refreshed okapi token");
        Ok(())
    }

    /// Builds the `reqwest::Request` for a descriptor without sending it.
    pub async fn prepare_request(&self, request: &Request) -> FolioResult<reqwest::Request> {
        let token = self.token().await?;
        let url = self.url_for(&request.path, &request.segments)?;
        let content_type = match request.body {
            Body::Bytes(_) => BINARY_CONTENT,
            _ => JSON_CONTENT,
        };
        let headers = self.headers(request.accept, content_type, Some(&token))?;

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .headers(headers);
        if !request.params.is_empty() {
            builder = builder.query(request.params.as_pairs());
        }
        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Bytes(bytes) => builder.body(bytes.clone()),
        };

        Ok(builder.build()?)
    }

    /// Sends a request and returns the response if its status is a success.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: &Request) -> FolioResult<Response> {
        let prepared = self.prepare_request(request).await?;
        debug!(url = %prepared.url().path(), "sending request");

        let response = self.client.execute(prepared).await.map_err(|err| {
            error!(error = %err, "request failed before a response was received");
            FolioError::from(err)
        })?;
        let response = ensure_success(response).await?;

        info!(status = response.status().as_u16(), "request completed");
        Ok(response)
    }

    /// Performs a request and returns its outcome according to the request's response shape.
    pub async fn execute(&self, request: &Request) -> FolioResult<Outcome> {
        let response = self.send(request).await?;
        match request.shape {
            ResponseShape::StatusOnly => Ok(Outcome::Status(response.status())),
            ResponseShape::Json => Ok(Outcome::Json(read_json(response).await?)),
        }
    }

    /// Performs a request and deserializes the response body to the type `T`.
    ///
    /// The request must have the [`ResponseShape::Json`] shape; a status-only request is rejected
    /// before anything is sent.
    pub async fn execute_json<T>(&self, request: &Request) -> FolioResult<T>
    where
        T: DeserializeOwned,
    {
        expect_shape(request, ResponseShape::Json)?;
        let value = self.execute(request).await?.into_json()?;

        serde_json::from_value(value).map_err(|err| {
            error!(error = %err, "response body does not match the expected type");
            FolioError::from(err)
        })
    }

    /// Performs a status-only request and returns the status code.
    ///
    /// The request must have the [`ResponseShape::StatusOnly`] shape; other requests are rejected
    /// before anything is sent.
    pub async fn execute_status(&self, request: &Request) -> FolioResult<StatusCode> {
        expect_shape(request, ResponseShape::StatusOnly)?;
        match self.execute(request).await? {
            Outcome::Status(status) => Ok(status),
            Outcome::Json(_) => Err(FolioError::UnexpectedResponse(
                "expected a status-only outcome".to_string(),
            )),
        }
    }

    /// Retrieves records from any list endpoint using a CQL query.
    pub async fn get_data(&self, path: &str, query: &str, limit: u32) -> FolioResult<Value> {
        let request =
            Request::get(path).params(Parameters::new().query(query).limit(limit));
        self.execute_json(&request).await
    }

    /// Posts a JSON document to any endpoint.
    pub async fn post_data<T>(&self, path: &str, payload: &T) -> FolioResult<StatusCode>
    where
        T: Serialize + ?Sized,
    {
        let request = Request::post(path).json(payload)?.status_only();
        self.execute_status(&request).await
    }

    /// Puts a JSON document to any endpoint, accepting a plain text answer.
    pub async fn put_data<T>(&self, path: &str, payload: &T) -> FolioResult<StatusCode>
    where
        T: Serialize + ?Sized,
    {
        let request = Request::put(path).json(payload)?.accept(Accept::Text);
        self.execute_status(&request).await
    }
}

fn expect_shape(request: &Request, shape: ResponseShape) -> FolioResult<()> {
    if request.shape == shape {
        return Ok(());
    }

    Err(FolioError::UnexpectedResponse(format!(
        "{} {} is described as {:?}, not {:?}",
        request.method, request.path, request.shape, shape
    )))
}

/// Turns a non-success response into [`FolioError::Http`].
async fn ensure_success(response: Response) -> FolioResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut url = response.url().clone();
    url.set_query(None);
    let message = response.text().await.unwrap_or_default();
    error!(status = status.as_u16(), url = %url, "HTTP error occurred");

    Err(FolioError::Http {
        status,
        url: url.to_string(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> FolioResult<T> {
    let bytes = response.bytes().await?;
    debug!(bytes = bytes.len(), "received response body");

    serde_json::from_slice(&bytes).map_err(|err| {
        error!(error = %err, "response body is not the expected JSON");
        FolioError::from(err)
    })
}
