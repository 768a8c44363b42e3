//! Shared utilities and common types for the Friend League backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT validation for bearer-token authentication
//! - Pagination helpers for list endpoints
//! - Common validation logic

pub mod jwt;
pub mod pagination;
pub mod validation;
