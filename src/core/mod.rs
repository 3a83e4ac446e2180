//! Core domain logic for htcap
//!
//! This module contains the probe model and the pure decision logic.
//! All network access is abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`HttpResponse`, `TestResult`, `Capability`, `TestDefinition`)
//! - `services/` - Response interpretation, built-in probe definitions, result cache
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
