//! Document shapes stored in each index.
//!
//! Field names serialize in camelCase to match the index manifests. These
//! types carry no validation; the API layer that writes them owns that.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::registry::IndexName;

/// A document type bound to one of the registry's indices
pub trait IndexDocument: Serialize {
    const INDEX: IndexName;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    /// Opaque credential, stored as produced by the auth layer
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_type: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    #[serde(default = "one")]
    pub num_adults: i64,
    #[serde(default)]
    pub num_children: i64,
    #[serde(default)]
    pub num_infants: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPackage {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Exact-match token such as "4.5", not a number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_nights: Option<i64>,
    #[serde(default)]
    pub experiences: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default)]
    pub is_recommended: bool,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub package_id: String,
    pub booking_date: DateTime<Utc>,
    pub travel_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    #[serde(default = "one")]
    pub num_adults: i64,
    #[serde(default)]
    pub num_children: i64,
    #[serde(default)]
    pub num_infants: i64,
    pub total_price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub status: String,
    pub payment_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

fn one() -> i64 {
    1
}

impl IndexDocument for User {
    const INDEX: IndexName = IndexName::Users;
}

impl IndexDocument for Preference {
    const INDEX: IndexName = IndexName::Preferences;
}

impl IndexDocument for TravelPackage {
    const INDEX: IndexName = IndexName::TravelPackages;
}

impl IndexDocument for Booking {
    const INDEX: IndexName = IndexName::Bookings;
}
