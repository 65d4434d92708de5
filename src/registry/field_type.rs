//! Field type vocabulary
//!
//! The closed set of OpenSearch field types used by every manifest.
//! Anything outside this set is rejected on parse.

use crate::error::{ProvisionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Stored and matched as a single unanalyzed token
    Keyword,
    /// Tokenized and analyzed, supports partial matches
    Text,
    Integer,
    /// ISO-8601 timestamp
    Date,
    Boolean,
}

impl FieldType {
    pub const ALL: [FieldType; 5] = [
        FieldType::Keyword,
        FieldType::Text,
        FieldType::Integer,
        FieldType::Date,
        FieldType::Boolean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Keyword => "keyword",
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ProvisionError;

    fn from_str(s: &str) -> Result<Self> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ProvisionError::InvalidMapping {
                cause: format!("unsupported field type '{}'", s),
            })
    }
}
