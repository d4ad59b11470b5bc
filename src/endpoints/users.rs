use chrono::{Local, NaiveDate};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::params::escape_cql;
use crate::requests::Request;
use crate::responses::{AddressTypeCollection, HasRecords, UserCollection};
use crate::{Authenticated, FolioClient, FolioResult, Parameters};

const USERS: &str = "/users";

/// Preferred contact type `002` is e-mail.
const CONTACT_TYPE_EMAIL: &str = "002";

/// A patron to be created with [`FolioClient::create_user`].
///
/// The `id` is the local patron identifier; it becomes the username, the external system id and the
/// barcode of the new user.
#[derive(TypedBuilder, Debug, Clone)]
pub struct NewUser {
    /// Local patron identifier
    #[builder(setter(into))]
    pub id: String,
    /// First name
    #[builder(setter(into))]
    pub first_name: String,
    /// Middle name
    #[builder(default, setter(into, strip_option))]
    pub middle_name: Option<String>,
    /// Last name
    #[builder(setter(into))]
    pub last_name: String,
    /// E-mail address
    #[builder(default, setter(into, strip_option))]
    pub email: Option<String>,
    /// First address line
    #[builder(default, setter(into, strip_option))]
    pub street_address: Option<String>,
    /// Second address line, usually a PO box
    #[builder(default, setter(into, strip_option))]
    pub po_box: Option<String>,
    /// City
    #[builder(default, setter(into, strip_option))]
    pub city: Option<String>,
    /// Postal code
    #[builder(default, setter(into, strip_option))]
    pub postal_code: Option<String>,
    /// ISO country code of the address
    #[builder(default = "SE".to_string(), setter(into))]
    pub country_id: String,
    /// Date the patron account expires
    #[builder(default, setter(strip_option))]
    pub expiration_date: Option<NaiveDate>,
    /// Date of birth
    #[builder(default, setter(strip_option))]
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct UserDocument<'a> {
    username: &'a str,
    external_system_id: &'a str,
    barcode: &'a str,
    active: bool,
    patron_group: &'a str,
    enrollment_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration_date: Option<NaiveDate>,
    personal: Personal<'a>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Personal<'a> {
    first_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    middle_name: Option<&'a str>,
    last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_of_birth: Option<NaiveDate>,
    preferred_contact_type_id: &'static str,
    addresses: Vec<Address<'a>>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Address<'a> {
    country_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    address_line1: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address_line2: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<&'a str>,
    address_type_id: &'a str,
    primary_address: bool,
}

impl NewUser {
    /// Builds the FOLIO user document, enrolled at `enrollment_date`.
    pub fn to_document(
        &self,
        patron_group_id: &str,
        address_type_id: &str,
        enrollment_date: NaiveDate,
    ) -> FolioResult<Value> {
        let document = UserDocument {
            username: &self.id,
            external_system_id: &self.id,
            barcode: &self.id,
            active: true,
            patron_group: patron_group_id,
            enrollment_date,
            expiration_date: self.expiration_date,
            personal: Personal {
                first_name: &self.first_name,
                middle_name: self.middle_name.as_deref(),
                last_name: &self.last_name,
                email: self.email.as_deref(),
                date_of_birth: self.date_of_birth,
                preferred_contact_type_id: CONTACT_TYPE_EMAIL,
                addresses: vec![Address {
                    country_id: &self.country_id,
                    address_line1: self.street_address.as_deref(),
                    address_line2: self.po_box.as_deref(),
                    city: self.city.as_deref(),
                    postal_code: self.postal_code.as_deref(),
                    address_type_id,
                    primary_address: true,
                }],
            },
        };

        Ok(serde_json::to_value(document)?)
    }
}

/// Returns the id of the only user in a search result.
///
/// Returns `None` if the result reports more than one record or holds no records at all.
pub fn get_user_uuid(users: &UserCollection) -> Option<String> {
    let total_records = users.total_records();
    if total_records > 1 {
        debug!(
            total_records,
            "more than one user in search result, no unique id"
        );
        return None;
    }

    users.records().first().map(|user| user.id.clone())
}

/// Returns the id of the first address type named exactly `address_type`.
pub fn get_address_type_uuid(address_types: &AddressTypeCollection, address_type: &str) -> Option<String> {
    address_types
        .records()
        .iter()
        .find(|record| record.address_type == address_type)
        .map(|record| record.id.clone())
}

fn username_query(username: &str) -> Parameters {
    Parameters::new()
        .limit(1)
        .query(&format!("username==\"{}\"", escape_cql(username)))
}

impl FolioClient<Authenticated> {
    /// Looks up a user by username. Returns `None` if there is no such user.
    pub async fn user_exists(&self, username: &str) -> FolioResult<Option<UserCollection>> {
        let users: UserCollection = self
            .execute_json(&Request::get(USERS).params(username_query(username)))
            .await?;

        if users.total_records() > 0 {
            Ok(Some(users))
        } else {
            Ok(None)
        }
    }

    /// Returns the UUID of the user with the given username, or `None` if there is no such user.
    pub async fn get_user_id(&self, username: &str) -> FolioResult<Option<String>> {
        let users: UserCollection = self
            .execute_json(&Request::get(USERS).params(username_query(username)))
            .await?;

        if users.total_records() == 0 {
            return Ok(None);
        }
        Ok(users.records().first().map(|user| user.id.clone()))
    }

    /// Lists address types.
    pub async fn get_address_types(&self) -> FolioResult<AddressTypeCollection> {
        self.execute_json(&Request::get("/addresstypes").param("limit", 100))
            .await
    }

    /// Lists patron groups.
    pub async fn get_groups(&self) -> FolioResult<Value> {
        self.execute_json(&Request::get("/groups").param("limit", 100))
            .await
    }

    /// Creates a patron, enrolled today.
    pub async fn create_user(
        &self,
        user: &NewUser,
        patron_group_id: &str,
        address_type_id: &str,
    ) -> FolioResult<Value> {
        debug!(patron = %user.id, "creating user");
        let today = Local::now().date_naive();
        let document = user.to_document(patron_group_id, address_type_id, today)?;
        self.execute_json(&Request::post(USERS).json(&document)?)
            .await
    }

    /// Deletes a user.
    pub async fn delete_user(&self, user_id: &str) -> FolioResult<StatusCode> {
        self.execute_status(&Request::delete(USERS).segment(user_id))
            .await
    }

    /// Creates or updates users in bulk through the user import module.
    pub async fn import_users<T>(&self, users: &T) -> FolioResult<Value>
    where
        T: Serialize + ?Sized,
    {
        self.execute_json(&Request::post("/user-import").json(users)?)
            .await
    }
}
