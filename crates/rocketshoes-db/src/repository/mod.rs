//! # Repository Pattern
//!
//! Repositories translate between domain types and storage.
//!
//! ## Available Repositories
//!
//! - [`cart::CartRepository`] - The persisted cart snapshot

pub mod cart;
