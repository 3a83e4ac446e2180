//! Adapter implementations for port traits and other I/O
//!
//! - `http/` - Default blocking HTTP transport (reqwest)
//! - `fs/` - Fixture staging below the base directory

pub mod fs;
pub mod http;
