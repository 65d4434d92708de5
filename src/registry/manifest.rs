//! Index manifests
//!
//! A manifest is the ordered field table of one index. It renders to the
//! create-index body OpenSearch expects:
//!
//! ```json
//! {"mappings": {"properties": {"id": {"type": "keyword"}, ...}}}
//! ```

use crate::error::{ProvisionError, Result};
use crate::registry::FieldType;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};

/// Ordered (field name, type) pairs for one index
#[derive(Debug, PartialEq, Eq)]
pub struct Manifest {
    fields: &'static [(&'static str, FieldType)],
}

/// Wire shape of a create-index request body, read side
#[derive(Deserialize)]
struct MappingBody {
    mappings: Mappings,
}

#[derive(Deserialize)]
struct Mappings {
    properties: BTreeMap<String, FieldMapping>,
}

#[derive(Deserialize)]
struct FieldMapping {
    #[serde(rename = "type")]
    field_type: FieldType,
}

impl Manifest {
    pub const fn new(fields: &'static [(&'static str, FieldType)]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &'static [(&'static str, FieldType)] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, field_type)| *field_type)
    }

    pub fn field_map(&self) -> BTreeMap<String, FieldType> {
        self.fields
            .iter()
            .map(|(name, field_type)| (name.to_string(), *field_type))
            .collect()
    }

    /// Create-index request body as JSON.
    ///
    /// Built from the static table directly, so it cannot fail.
    pub fn to_mapping_body(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, field_type)| (name.to_string(), json!({ "type": field_type.as_str() })))
            .collect();
        json!({ "mappings": { "properties": properties } })
    }

    /// Parse a create-index body back into a field → type map.
    ///
    /// Fails on any type outside the five-type vocabulary.
    pub fn from_mapping_body(body: &Value) -> Result<BTreeMap<String, FieldType>> {
        let parsed: MappingBody = serde_json::from_value(body.clone())?;
        Ok(parsed
            .mappings
            .properties
            .into_iter()
            .map(|(name, mapping)| (name, mapping.field_type))
            .collect())
    }

    /// SHA256 of the canonical (key-sorted) mapping body
    pub fn fingerprint(&self) -> String {
        let canonical = self.to_mapping_body().to_string();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Structural checks run once at startup
    pub fn validate(&self, index: &str) -> Result<()> {
        if self.fields.is_empty() {
            return Err(ProvisionError::InvalidMapping {
                cause: format!("{} declares no fields", index),
            });
        }

        if self.field_type("id") != Some(FieldType::Keyword) {
            return Err(ProvisionError::InvalidMapping {
                cause: format!("{} must declare 'id' as keyword", index),
            });
        }

        let mut seen = HashSet::new();
        for (name, _) in self.fields {
            if !seen.insert(*name) {
                return Err(ProvisionError::InvalidMapping {
                    cause: format!("{} declares field '{}' more than once", index, name),
                });
            }
        }

        Ok(())
    }
}
