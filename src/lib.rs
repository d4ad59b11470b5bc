#![warn(missing_docs)]
#![crate_name = "folio_rs"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # FOLIO Client
//!
//! `folio_rs` is a web client for the Okapi gateway of the FOLIO library services platform:
//! inventory, source records, circulation, users, permissions and MARC data import.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use folio_rs::{Credentials, FolioClient};
//!
//! #[tokio::main]
//! async fn main() -> miette::Result<()> {
//!     let client = FolioClient::builder()
//!         .okapi_url("https://okapi.example.org")
//!         .tenant("diku")
//!         .credentials(Credentials::new("diku_admin", "admin"))
//!         .build()?;
//!     let client = client.login().await?;
//!
//!     let instances = client.get_instances("title=\"Hamlet*\"", 10).await?;
//!     println!("{:#}", instances);
//!
//!     match client.delete_item("0b96a642-5e7f-452d-9cae-9cee66c9a892").await {
//!         Ok(status) => println!("deleted: {}", status),
//!         Err(err) => println!("could not delete ({:?}): {}", err.status(), err),
//!     }
//!     Ok(())
//! }
//! ```

extern crate self as folio_rs;

/// Module containing the client and the request executor.
pub mod client;
/// Module containing the environment configuration.
pub mod config;
/// Module containing the endpoint catalog.
pub mod endpoints;
/// Module containing the error type.
pub mod error;
/// Module containing the macros.
pub mod macros;
/// Module containing query parameters.
pub mod params;
/// Module containing the request descriptor.
pub mod requests;
/// Module containing common response types.
pub mod responses;
/// Module containing traits for typed records.
#[cfg(feature = "derive")]
pub mod traits;

mod credentials;

pub use client::states::*;
pub use client::FolioClient;
pub use config::Config;
pub use credentials::Credentials;
pub use endpoints::users::NewUser;
pub use error::{ErrorKind, FolioError};
pub use params::Parameters;
pub use requests::Request;
pub use responses::Outcome;
pub use reqwest::{Method, StatusCode};
pub use serde_json::Value;

#[cfg(feature = "derive")]
pub use async_trait::async_trait;
#[cfg(feature = "derive")]
pub use folio_rs_derive::FolioRecord;
#[cfg(feature = "derive")]
pub use traits::FolioRecord;

/// Result type for the folio-rs crate.
pub type FolioResult<T> = std::result::Result<T, error::FolioError>;
