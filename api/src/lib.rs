//! HTTP surface for OTP Gate
//!
//! Library exports for the binary and for integration tests.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
