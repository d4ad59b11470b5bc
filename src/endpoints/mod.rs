//! Endpoint catalog.
//!
//! Each operation is a thin method on [`FolioClient<Authenticated>`](crate::FolioClient) that
//! describes one call with a [`Request`](crate::Request) and hands it to the executor.

/// Login credentials (PINs).
pub mod authn;
/// Circulation: loans, requests, check out and scheduled jobs.
pub mod circulation;
/// Configuration module.
pub mod configuration;
/// Data import and MARC mapping rules.
pub mod data_import;
/// Inventory storage: instances, holdings, items and reference data.
pub mod inventory;
/// Permission assignments.
pub mod permissions;
/// Source record storage.
pub mod source_storage;
/// Users, patron groups and address types.
pub mod users;
