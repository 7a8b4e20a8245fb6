//! A users service and the console view that consumes it.
//!
//! `GET /users` and `POST /users` each map onto one SQL statement against a
//! single `users` table, created idempotently at startup.

pub mod api;
pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod server;
pub mod store;
pub mod user;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;
