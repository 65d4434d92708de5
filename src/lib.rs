//! Yookve Provisioner Library
//!
//! OpenSearch connection settings, the index schema registry for the
//! travel-booking backend, and the startup step that provisions those
//! indices.

pub mod api;
pub mod config;
pub mod documents;
pub mod error;
pub mod provision;
pub mod registry;
pub mod store;
