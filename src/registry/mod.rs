//! Schema Registry
//!
//! Single source of truth for the indices the backend relies on:
//! the fixed set of index names and, for each, the field type manifest
//! used to create it.
//!
//! ```text
//! yookve_users            id, username, password, name, email
//! yookve_preferences      id, userId, destination, travelType, interests, ...
//! yookve_travel_packages  id, title, description, destination, rating, ...
//! yookve_bookings         id, userId, packageId, bookingDate, status, ...
//! ```

mod field_type;
mod indices;
mod manifest;

pub use field_type::FieldType;
pub use indices::{
    IndexName, INDEX_BOOKINGS, INDEX_PREFERENCES, INDEX_TRAVEL_PACKAGES, INDEX_USERS,
};
pub use manifest::Manifest;

use crate::error::Result;

/// The canonical index names, in provisioning order
pub fn index_names() -> [&'static str; 4] {
    IndexName::ALL.map(|index| index.as_str())
}

/// Look up the manifest of a named index.
///
/// Names outside the registry are a programming error and fail with
/// `UnknownIndex`; there is no fallback manifest.
pub fn manifest_for(name: &str) -> Result<&'static Manifest> {
    Ok(name.parse::<IndexName>()?.manifest())
}

/// Check every manifest once at startup
pub fn validate() -> Result<()> {
    for index in IndexName::ALL {
        index.manifest().validate(index.as_str())?;
    }
    Ok(())
}
