//! # Nyaya Common Library
//!
//! Shared code for the Nyaya legal-aid services including:
//! - Wire types exchanged between the REST backend and its clients
//! - Database schema and queries
//! - Configuration loading and root folder resolution
//! - Common error type and shared input checks

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod validation;

pub use error::{Error, Resource, Result};
