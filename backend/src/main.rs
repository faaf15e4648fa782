//! # Backend Service
//!
//! Thin entry point that delegates to lib-web for server setup.
//! Configuration comes from the environment (see `lib_core::config`).

use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    start_server(ServerConfig::default()).await
}
