//! Mapping drift verification
//!
//! Compares the mapping each existing index carries with its declared
//! manifest. Read-only: drift is reported, never corrected, since changing
//! a field type requires a reindex that this service does not own.

use crate::error::Result;
use crate::registry::IndexName;
use crate::store::IndexStore;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Result of comparing every registry index with the store
#[derive(Debug, Clone, Default, Serialize)]
pub struct DriftReport {
    pub missing_indices: Vec<IndexName>,
    pub indices: Vec<IndexDrift>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexDrift {
    pub index: IndexName,
    pub missing_fields: Vec<String>,
    pub type_mismatches: Vec<TypeMismatch>,
    /// Fields present remotely but not declared, usually from dynamic mapping
    pub extra_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeMismatch {
    pub field: String,
    pub expected: String,
    pub found: String,
}

impl IndexDrift {
    fn new(index: IndexName) -> Self {
        Self {
            index,
            missing_fields: Vec::new(),
            type_mismatches: Vec::new(),
            extra_fields: Vec::new(),
        }
    }

    pub fn has_drift(&self) -> bool {
        !self.missing_fields.is_empty() || !self.type_mismatches.is_empty()
    }
}

impl DriftReport {
    pub fn passed(&self) -> bool {
        self.missing_indices.is_empty() && self.indices.iter().all(|d| !d.has_drift())
    }

    /// Human-readable summary of everything that does not match
    pub fn error_log(&self) -> String {
        let mut log = String::new();

        log.push_str("═══════════════════════════════════════════════════════════════\n");
        log.push_str("              INDEX MAPPING DRIFT DETECTED\n");
        log.push_str("═══════════════════════════════════════════════════════════════\n\n");

        if !self.missing_indices.is_empty() {
            log.push_str("MISSING INDICES:\n");
            for index in &self.missing_indices {
                log.push_str(&format!("  - {}\n", index));
            }
            log.push('\n');
        }

        for drift in self.indices.iter().filter(|d| d.has_drift()) {
            log.push_str(&format!("{}:\n", drift.index));
            for field in &drift.missing_fields {
                log.push_str(&format!("  - missing field '{}'\n", field));
            }
            for m in &drift.type_mismatches {
                log.push_str(&format!(
                    "  - field '{}' is {} (expected {})\n",
                    m.field, m.found, m.expected
                ));
            }
            log.push('\n');
        }

        log.push_str("═══════════════════════════════════════════════════════════════\n");
        log.push_str("ACTION REQUIRED: reindex affected indices with the declared mappings\n");
        log.push_str("═══════════════════════════════════════════════════════════════\n");

        log
    }
}

/// Compare every registry index with the mapping the store reports
pub async fn verify_mappings(store: &dyn IndexStore) -> Result<DriftReport> {
    let mut report = DriftReport::default();

    for index in IndexName::ALL {
        let name = index.as_str();

        let properties = match store.get_mapping(name).await? {
            Some(properties) => properties,
            None => {
                warn!("Index {} is missing", name);
                report.missing_indices.push(index);
                continue;
            }
        };

        let drift = compare_properties(index, &properties);

        if drift.has_drift() {
            warn!(
                "Index {} drifted: {} missing fields, {} type mismatches",
                name,
                drift.missing_fields.len(),
                drift.type_mismatches.len()
            );
        } else {
            debug!("Index {} matches its manifest", name);
        }

        report.indices.push(drift);
    }

    if report.passed() {
        info!("All {} index mappings match the registry", IndexName::ALL.len());
    }

    Ok(report)
}

fn compare_properties(index: IndexName, properties: &Value) -> IndexDrift {
    let mut drift = IndexDrift::new(index);
    let manifest = index.manifest();

    for (field, expected) in manifest.fields() {
        match properties.get(*field) {
            None => drift.missing_fields.push(field.to_string()),
            Some(mapping) => {
                // Object fields carry no "type" key
                let found = mapping["type"].as_str().unwrap_or("object");
                if found != expected.as_str() {
                    drift.type_mismatches.push(TypeMismatch {
                        field: field.to_string(),
                        expected: expected.to_string(),
                        found: found.to_string(),
                    });
                }
            }
        }
    }

    if let Some(remote) = properties.as_object() {
        drift.extra_fields = remote
            .keys()
            .filter(|name| manifest.field_type(name).is_none())
            .cloned()
            .collect();
    }

    drift
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::ensure_indices_exist;
    use crate::store::InMemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_freshly_provisioned_store_passes() {
        let store = InMemoryStore::new();
        ensure_indices_exist(&store).await.unwrap();

        let report = verify_mappings(&store).await.unwrap();
        assert!(report.passed());
        assert_eq!(report.indices.len(), 4);
        assert!(report.missing_indices.is_empty());
    }

    #[tokio::test]
    async fn test_missing_index_fails() {
        let store = InMemoryStore::new();

        let report = verify_mappings(&store).await.unwrap();
        assert!(!report.passed());
        assert_eq!(report.missing_indices, IndexName::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_numeric_rating_is_reported_as_mismatch() {
        let mut properties = IndexName::TravelPackages.manifest().to_mapping_body()["mappings"]
            ["properties"]
            .clone();
        properties["rating"] = json!({"type": "float"});
        properties.as_object_mut().unwrap().remove("categories");
        properties["promoCode"] = json!({"type": "keyword"});

        let store = InMemoryStore::new().with_index("yookve_travel_packages", properties);
        let report = verify_mappings(&store).await.unwrap();

        let drift = report
            .indices
            .iter()
            .find(|d| d.index == IndexName::TravelPackages)
            .unwrap();
        assert_eq!(
            drift.type_mismatches,
            vec![TypeMismatch {
                field: "rating".to_string(),
                expected: "keyword".to_string(),
                found: "float".to_string(),
            }]
        );
        assert_eq!(drift.missing_fields, vec!["categories".to_string()]);
        assert_eq!(drift.extra_fields, vec!["promoCode".to_string()]);
        assert!(!report.passed());

        let log = report.error_log();
        assert!(log.contains("field 'rating' is float (expected keyword)"));
        assert!(log.contains("missing field 'categories'"));
    }

    #[test]
    fn test_extra_fields_alone_are_not_drift() {
        let mut properties = IndexName::Users.manifest().to_mapping_body()["mappings"]["properties"].clone();
        properties["lastLogin"] = json!({"type": "date"});

        let drift = compare_properties(IndexName::Users, &properties);
        assert!(!drift.has_drift());
        assert_eq!(drift.extra_fields, vec!["lastLogin".to_string()]);
    }

    #[test]
    fn test_object_field_reported_as_object() {
        let mut properties = IndexName::Users.manifest().to_mapping_body()["mappings"]["properties"].clone();
        properties["name"] = json!({"properties": {"first": {"type": "text"}}});

        let drift = compare_properties(IndexName::Users, &properties);
        assert_eq!(drift.type_mismatches[0].found, "object");
    }
}
