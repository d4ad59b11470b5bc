use std::fmt::Write;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::client::OKAPI_TOKEN_HEADER;
use crate::{FolioError, Parameters};

/// Value of the `Accept` header of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accept {
    /// `application/json`
    #[default]
    Json,
    /// `text/plain`, which the storage modules expect for deletes and some updates.
    Text,
}

impl Accept {
    /// The header value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Accept::Json => "application/json",
            Accept::Text => "text/plain",
        }
    }
}

/// How the body of a success response is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseShape {
    /// Parse the body as JSON.
    #[default]
    Json,
    /// Only report the status code.
    StatusOnly,
}

/// Body of a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// A JSON document.
    Json(Value),
    /// Raw bytes, sent as `application/octet-stream`.
    Bytes(Vec<u8>),
}

/// Describes a single call to the Okapi gateway.
///
/// ## Example
///
/// ```
/// use folio_rs::requests::{Accept, Request, ResponseShape};
///
/// let request = Request::delete("/item-storage/items").segment("0b96a642-5e7f-452d-9cae-9cee66c9a892");
/// assert_eq!(request.accept, Accept::Text);
/// assert_eq!(request.shape, ResponseShape::StatusOnly);
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method.
    pub method: Method,
    /// The static path, relative to the Okapi URL, e.g. `/instance-storage/instances`.
    pub path: String,
    /// Dynamic path segments (ids), appended to `path` and percent-encoded.
    pub segments: Vec<String>,
    /// Query parameters.
    pub params: Parameters,
    /// The request body.
    pub body: Body,
    /// The `Accept` header.
    pub accept: Accept,
    /// How to interpret a success response.
    pub shape: ResponseShape,
}

impl Request {
    /// Creates a request with JSON accept and JSON response shape.
    pub fn new(method: Method, path: &str) -> Self {
        Request {
            method,
            path: path.to_string(),
            segments: Vec::new(),
            params: Parameters::new(),
            body: Body::Empty,
            accept: Accept::Json,
            shape: ResponseShape::Json,
        }
    }

    /// A `GET` request.
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    /// A `POST` request.
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    /// A `PUT` request, reporting only the status.
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path).status_only()
    }

    /// A `DELETE` request with `Accept: text/plain`, reporting only the status.
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
            .accept(Accept::Text)
            .status_only()
    }

    /// Appends a path segment, e.g. a record id.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Adds a query parameter.
    pub fn param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        self.params = self.params.param(key, value);
        self
    }

    /// Replaces the query parameters.
    pub fn params(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    /// Sets a JSON body from any serializable value.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, FolioError> {
        self.body = Body::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Sets a raw byte body.
    pub fn bytes(mut self, body: Vec<u8>) -> Self {
        self.body = Body::Bytes(body);
        self
    }

    /// Sets the `Accept` header.
    pub fn accept(mut self, accept: Accept) -> Self {
        self.accept = accept;
        self
    }

    /// Only report the status code of a success response.
    pub fn status_only(mut self) -> Self {
        self.shape = ResponseShape::StatusOnly;
        self
    }

    /// Parse the body of a success response as JSON.
    pub fn expect_json(mut self) -> Self {
        self.shape = ResponseShape::Json;
        self
    }
}

/// Trait for converting a `reqwest::Request` to a HTTP string.
///
/// The session token is redacted, everything else is printed as it would be sent.
pub trait RequestToHttpString {
    /// Converts the `reqwest::Request` to a HTTP string.
    fn to_http_string(&self) -> Result<String, std::fmt::Error>;
}

impl RequestToHttpString for reqwest::Request {
    fn to_http_string(&self) -> Result<String, std::fmt::Error> {
        let mut result = String::new();

        let query = self.url().query().map(|q| format!("?{q}")).unwrap_or_default();
        writeln!(
            result,
            "{} {}{} HTTP/1.1",
            self.method(),
            self.url().path(),
            query
        )?;

        if let Some(host) = self.url().host_str() {
            if let Some(port) = self.url().port() {
                writeln!(result, "host: {}:{}", host, port)?;
            } else {
                writeln!(result, "host: {}", host)?;
            }
        }

        for (name, value) in self.headers() {
            if name.as_str().eq_ignore_ascii_case(OKAPI_TOKEN_HEADER) {
                writeln!(result, "{}: <redacted>", name)?;
            } else {
                writeln!(result, "{}: {}", name, value.to_str().unwrap_or("<binary>"))?;
            }
        }

        writeln!(result)?;

        if let Some(body) = self.body() {
            if let Some(bytes) = body.as_bytes() {
                result.push_str(&String::from_utf8_lossy(bytes));
            } else {
                result.push_str("[streaming body - cannot display]");
            }
        }

        Ok(result)
    }
}
