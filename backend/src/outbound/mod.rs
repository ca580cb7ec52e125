//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local identity, profile, and booking stores
//! - **firebase**: Identity Toolkit and Firestore REST clients
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod firebase;
pub mod memory;
