//! # Sales Robot Dashboard - Library Root
//!
//! Client side of the onboarding service: SMS registration, login and the
//! personal dashboard where a new customer sets up their calling robot.
//! This library crate holds everything the CLI binary (`main.rs`) drives, so
//! the same flows run against the real backend, the in-process mock, and tests.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              dashboard (this crate)                    │
//! ├────────────────────────────────────────────────────────┤
//! │  app        - App, flows, step gate, reducer           │
//! │  core       - ClientError, RemoteGateway, SessionStore │
//! │  services   - ApiClient, MockGateway, session stores   │
//! │  debug      - file logging                             │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP (reqwest)                 │ JSON file
//!          ▼                                ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Backend API    │          │   data/session.json     │
//! │  (Axum server)  │          │   (token + user)        │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dashboard::{App, MemorySessionStore, MockGateway};
//! use std::sync::Arc;
//!
//! # async fn run() -> dashboard::Result<()> {
//! let mut app = App::new(Arc::new(MockGateway::new()), Arc::new(MemorySessionStore::new()));
//!
//! app.register_phone("+7 (999) 123-45-67").await?;
//! app.register_code("1234").await?;
//! app.register_password("Passw0rd").await?;
//!
//! assert!(app.state.is_authenticated());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod core;
pub mod debug;
pub mod services;

pub use app::{App, AppState, Screen};
pub use core::{ClientError, PersistedSession, RemoteGateway, Result, SessionStore};
pub use services::{ApiClient, FileSessionStore, MemorySessionStore, MockGateway};
