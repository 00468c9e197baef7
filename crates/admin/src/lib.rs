//! Dessert Devs Admin - internal catalog and fulfillment API.
//!
//! Library crate exposing the admin modules for integration testing.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
