//! Roster API Library
//!
//! This library provides the core functionality for the Roster API:
//! the Member/Team domain, repository contracts with PostgreSQL
//! implementations, and the HTTP layer that exposes them.

pub mod api;
pub mod domain;
pub mod infrastructure;
