//! Outbound adapters implementing the domain repository ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: an in-process store for local runs and tests.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules.

pub mod memory;
pub mod persistence;
