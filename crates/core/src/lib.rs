//! Dessert Devs Core - Shared domain library.
//!
//! This crate provides the domain types and the in-memory business logic
//! shared by all Dessert Devs components:
//! - `storefront` - Public JSON API consumed by the mobile app
//! - `admin` - Internal product/order management API
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. The three pieces of real logic live here:
//!
//! - [`cart`] - The cart ledger: line items keyed by product + variant,
//!   quantity merging, total/discount computation
//! - [`catalog`] - The catalog filter: multi-predicate product matching
//! - [`branch`] - Nearest pickup branch selection
//!
//! Everything takes plain arguments and returns plain results; persistence
//! and transport are the callers' concern.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod branch;
pub mod cart;
pub mod catalog;
pub mod types;

pub use branch::{Branch, BranchError, closest_branch};
pub use cart::{Cart, CartLine, Dietary, Variant};
pub use catalog::{DietaryFilter, FilterCriteria, PriceRange, Product, filter};
pub use types::*;
