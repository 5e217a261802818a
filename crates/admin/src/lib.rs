//! Masoro Kitchen admin library.
//!
//! This crate provides the staff console as a library, allowing it to be
//! tested and reused. The binary in `main.rs` wires it to a socket.
//!
//! All data is mock data held in memory; a restart returns everything to
//! the seed set.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
