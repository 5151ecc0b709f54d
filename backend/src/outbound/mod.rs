//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: MongoDB-backed repositories, plus an in-memory
//!   repository for tests.
//!
//! Adapters are thin translators between domain types and storage documents.
//! They contain no business logic.

pub mod persistence;
