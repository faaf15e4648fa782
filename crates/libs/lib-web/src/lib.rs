//! # Web Library
//!
//! axum HTTP API for the sales-robot backend: SMS registration, login,
//! mocked dashboard endpoints, middleware and server bootstrap.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

pub use server::{create_router, start_server, AppState, ServerConfig};
