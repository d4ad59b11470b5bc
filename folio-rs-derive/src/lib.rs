#![warn(missing_docs)]
#![crate_name = "folio_rs_derive"]
//! # folio-rs-derive
//!
//! This is a set of macros to derive the traits from folio-rs.

extern crate proc_macro;

use darling::FromDeriveInput;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

#[derive(FromDeriveInput)]
#[darling(attributes(folio), supports(struct_named))]
struct FolioRecordAttributes {
    path: String,
    collection: String,
    #[darling(default)]
    limit: Option<u32>,
}

/// Generates a collection response struct and binds the record to its storage path.
///
/// For a struct `Item` this generates `ItemCollection`, holding the records found under the
/// `collection` key and the `totalRecords` count.
///
/// ## Example
/// ```ignore
/// use folio_rs::FolioRecord;
///
/// #[derive(FolioRecord, serde::Deserialize, Clone)]
/// #[folio(path = "/item-storage/items", collection = "items", limit = 50)]
/// pub struct Item {
///     pub id: String,
///     pub barcode: Option<String>,
/// }
/// ```
#[proc_macro_derive(FolioRecord, attributes(folio))]
pub fn folio_record_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let attributes = match FolioRecordAttributes::from_derive_input(&ast) {
        Ok(attributes) => attributes,
        Err(err) => return err.write_errors().into(),
    };
    let FolioRecordAttributes {
        path,
        collection,
        limit,
    } = attributes;

    let name = &ast.ident;
    let vis = &ast.vis;
    let collection_ident = syn::Ident::new(&format!("{}Collection", name), name.span());

    let record_limit = match limit {
        Some(limit) => quote! {
            const LIMIT: u32 = #limit;
        },
        None => quote! {},
    };

    let gen = quote! {
        /// Collection response of a FOLIO list endpoint.
        #[derive(serde::Deserialize, Debug, Clone)]
        #vis struct #collection_ident {
            /// The records of this page.
            #[serde(rename = #collection, default)]
            pub records: Vec<#name>,
            /// The number of records matching the query, across all pages.
            #[serde(rename = "totalRecords", default)]
            pub total_records: Option<u64>,
        }

        impl folio_rs::responses::HasRecords<#name> for #collection_ident {
            fn records(&self) -> &[#name] {
                &self.records
            }

            fn into_records(self) -> Vec<#name> {
                self.records
            }

            fn total_records(&self) -> u64 {
                self.total_records.unwrap_or(self.records.len() as u64)
            }
        }

        #[folio_rs::async_trait]
        impl folio_rs::traits::FolioRecord for #name {
            const PATH: &'static str = #path;
            const COLLECTION: &'static str = #collection;
            #record_limit

            type Collection = #collection_ident;
        }
    };

    gen.into()
}
