//! Almacén Core - Shared types library.
//!
//! This crate provides common types used across all Almacén components:
//! - `storefront` - Public-facing e-commerce API
//! - `admin` - Internal administration API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and their invariants - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`cart`] - The shopping cart and its line items
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartError, CartItem, ProductSnapshot};
pub use types::*;
