//! Band Catalog Service Library
//!
//! HTTP resource management for band records over a PostgreSQL table:
//! filter resolution, the record service operations, and the store
//! gateway they run against.

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod service;
pub mod store;
