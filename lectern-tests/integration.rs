//! Integration tests for Lectern
//!
//! These tests drive the catalog store, the ordering rules, and the web layer
//! together through their public interfaces.

#[path = "integration/catalog_lifecycle.rs"]
mod catalog_lifecycle;
#[path = "integration/ordering_scenarios.rs"]
mod ordering_scenarios;
#[path = "integration/web_rendering.rs"]
mod web_rendering;
