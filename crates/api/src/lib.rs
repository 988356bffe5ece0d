//! HTTP API: configuration, routing, and request/response mapping for contacts.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
