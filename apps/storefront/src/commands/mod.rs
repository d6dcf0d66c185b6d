//! # Commands Module
//!
//! The operations the storefront UI (or the CLI) invokes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── Cart view and manipulation
//! └── product.rs  ◄─── Catalog listing
//! ```
//!
//! Every command takes the state it needs by reference and returns a
//! serialisable view or an [`ApiError`](crate::error::ApiError).

pub mod cart;
pub mod product;
