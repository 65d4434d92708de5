//! Startup provisioning
//!
//! - [`ensure_indices_exist`] creates any registry index the store lacks
//! - [`verify_mappings`] compares existing indices against their manifests
//! - [`provision_at_startup`] wraps both for the binary's boot sequence

mod ensure;
mod startup;
mod verifier;

pub use ensure::{ensure_indices_exist, ProvisionReport};
pub use startup::provision_at_startup;
pub use verifier::{verify_mappings, DriftReport, IndexDrift, TypeMismatch};
