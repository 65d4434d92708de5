//! The four Yookve indices and their field tables.

use crate::error::{ProvisionError, Result};
use crate::registry::{FieldType, Manifest};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use FieldType::{Boolean, Date, Integer, Keyword, Text};

pub const INDEX_USERS: &str = "yookve_users";
pub const INDEX_PREFERENCES: &str = "yookve_preferences";
pub const INDEX_TRAVEL_PACKAGES: &str = "yookve_travel_packages";
pub const INDEX_BOOKINGS: &str = "yookve_bookings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "&'static str")]
pub enum IndexName {
    Users,
    Preferences,
    TravelPackages,
    Bookings,
}

static USERS: Manifest = Manifest::new(&[
    ("id", Keyword),
    ("username", Keyword),
    ("password", Keyword),
    ("name", Text),
    ("email", Keyword),
]);

static PREFERENCES: Manifest = Manifest::new(&[
    ("id", Keyword),
    ("userId", Keyword),
    ("destination", Text),
    ("travelType", Keyword),
    ("interests", Keyword),
    ("budget", Integer),
    ("departureDate", Date),
    ("returnDate", Date),
    ("numAdults", Integer),
    ("numChildren", Integer),
    ("numInfants", Integer),
    ("accommodationType", Keyword),
    ("createdAt", Date),
]);

// `rating` is a keyword, not a number: existing data is indexed that way,
// so numeric sort and range filters on it are unavailable.
static TRAVEL_PACKAGES: Manifest = Manifest::new(&[
    ("id", Keyword),
    ("title", Text),
    ("description", Text),
    ("destination", Text),
    ("imageUrl", Keyword),
    ("rating", Keyword),
    ("reviewCount", Integer),
    ("accommodationName", Text),
    ("accommodationType", Keyword),
    ("transportType", Keyword),
    ("durationDays", Integer),
    ("durationNights", Integer),
    ("experiences", Text),
    ("price", Integer),
    ("isRecommended", Boolean),
    ("categories", Keyword),
]);

static BOOKINGS: Manifest = Manifest::new(&[
    ("id", Keyword),
    ("userId", Keyword),
    ("packageId", Keyword),
    ("bookingDate", Date),
    ("travelDate", Date),
    ("returnDate", Date),
    ("numAdults", Integer),
    ("numChildren", Integer),
    ("numInfants", Integer),
    ("totalPrice", Integer),
    ("specialRequests", Text),
    ("status", Keyword),
    ("paymentStatus", Keyword),
    ("contactPhone", Keyword),
    ("contactEmail", Keyword),
]);

impl IndexName {
    /// Provisioning order
    pub const ALL: [IndexName; 4] = [
        IndexName::Users,
        IndexName::Preferences,
        IndexName::TravelPackages,
        IndexName::Bookings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexName::Users => INDEX_USERS,
            IndexName::Preferences => INDEX_PREFERENCES,
            IndexName::TravelPackages => INDEX_TRAVEL_PACKAGES,
            IndexName::Bookings => INDEX_BOOKINGS,
        }
    }

    pub fn manifest(&self) -> &'static Manifest {
        match self {
            IndexName::Users => &USERS,
            IndexName::Preferences => &PREFERENCES,
            IndexName::TravelPackages => &TRAVEL_PACKAGES,
            IndexName::Bookings => &BOOKINGS,
        }
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<IndexName> for &'static str {
    fn from(index: IndexName) -> Self {
        index.as_str()
    }
}

impl FromStr for IndexName {
    type Err = ProvisionError;

    fn from_str(s: &str) -> Result<Self> {
        IndexName::ALL
            .into_iter()
            .find(|index| index.as_str() == s)
            .ok_or_else(|| ProvisionError::UnknownIndex { name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for index in IndexName::ALL {
            assert_eq!(index.as_str().parse::<IndexName>().unwrap(), index);
            assert_eq!(index.to_string(), index.as_str());
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "yookve_reviews".parse::<IndexName>().unwrap_err();
        assert!(matches!(err, ProvisionError::UnknownIndex { name } if name == "yookve_reviews"));
    }

    #[test]
    fn test_serializes_as_name() {
        assert_eq!(
            serde_json::to_string(&IndexName::TravelPackages).unwrap(),
            "\"yookve_travel_packages\""
        );
    }
}
