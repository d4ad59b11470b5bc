/// Generates a typed wrapper for a FOLIO collection response.
///
/// FOLIO list endpoints answer with an object holding the records under an endpoint specific key,
/// plus `totalRecords` and (on most modules) `resultInfo`.
///
/// ## Example
///
/// Generating a response struct for `GET /material-types`:
///
/// ```
/// use folio_rs::collection_response;
///
/// #[derive(serde::Deserialize, serde::Serialize, Debug, Clone)]
/// pub struct MaterialType {
///     pub id: String,
///     pub name: String,
/// }
///
/// collection_response!(MaterialTypeCollection, "mtypes", MaterialType);
/// ```
#[macro_export]
macro_rules! collection_response {
    ($name:ident, $list_name:literal, $record:ty) => {
        /// Collection response of a FOLIO list endpoint.
        #[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default)]
        pub struct $name {
            /// The records of this page.
            #[serde(rename = $list_name, default)]
            pub records: Vec<$record>,
            /// The number of records matching the query, across all pages.
            #[serde(rename = "totalRecords", default)]
            pub total_records: u64,
            /// Additional information about the result set.
            #[serde(rename = "resultInfo", default, skip_serializing_if = "Option::is_none")]
            pub result_info: Option<$crate::responses::ResultInfo>,
        }

        impl $crate::responses::HasRecords<$record> for $name {
            fn records(&self) -> &[$record] {
                &self.records
            }

            fn into_records(self) -> Vec<$record> {
                self.records
            }

            fn total_records(&self) -> u64 {
                self.result_info
                    .as_ref()
                    .and_then(|info| info.total_records)
                    .unwrap_or(self.total_records)
            }
        }
    };
}

/// Generates a collection with syntactic sugar for vecs, sets and maps.
///
/// ## Example
///
/// ```
/// use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
/// use folio_rs::{collection, Parameters};
///
/// let s: Vec<_> = collection![1, 2, 3];
/// println!("{:?}", s);
/// let s: BTreeSet<_> = collection!{ 1, 2, 3 };
/// println!("{:?}", s);
/// let s: HashMap<_, _> = collection!{ 1 => 2, 3 => 4 };
/// println!("{:?}", s);
/// let p: Parameters = collection!{ "limit" => "10", "query" => "title=\"Hamlet*\"" };
/// println!("{:?}", p);
/// ```
#[macro_export]
macro_rules! collection {
    ($($k:expr => $v:expr),* $(,)?) => {{
        core::convert::From::from([$(($k, $v),)*])
    }};
    ($($v:expr),* $(,)?) => {{
        core::convert::From::from([$($v,)*])
    }};
}
