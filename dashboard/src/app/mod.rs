//! # Application Orchestrator
//!
//! [`App`] owns the [`AppState`] and every flow controller, and is the only
//! place where flows, the session store and navigation meet:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  App                                                  │
//! │  - register_*() / login()    -> flows -> sign_in()    │
//! │  - dashboard handlers        -> gateway -> reduce()   │
//! │  - authenticated calls       -> session::guard()      │
//! └──────────┬──────────────────────────────┬────────────┘
//!            │ Arc<dyn RemoteGateway>       │ Arc<dyn SessionStore>
//!   ApiClient | MockGateway        FileSessionStore | MemorySessionStore
//! ```
//!
//! ## Key Components
//!
//! - **[`state`]**: [`AppState`] and the pure reducer
//! - **[`registration`]** / **[`login`]**: sign-in flow controllers
//! - **[`step_gate`]**: onboarding tab gating
//! - **[`tariffs`]**: payment page selection
//! - **[`session`]**: restore, persist and the 401 guard
//! - **[`handlers`]**: user actions, grouped by screen

pub mod handlers;
pub mod login;
pub mod registration;
pub mod session;
pub mod state;
pub mod step_gate;
pub mod tariffs;

pub use login::LoginFlow;
pub use registration::{RegistrationFlow, RegistrationStep};
pub use state::{reduce, Action, AppState, Screen};
pub use step_gate::{StepGate, StepStatus, STEPS};
pub use tariffs::TariffSelection;

use crate::core::error::{ClientError, Result};
use crate::core::service::{RemoteGateway, SessionStore};
use shared::AuthResponse;
use std::sync::Arc;

pub struct App {
    pub state: AppState,
    pub registration: RegistrationFlow,
    pub login_flow: LoginFlow,
    pub gate: StepGate,
    pub tariffs: TariffSelection,
    gateway: Arc<dyn RemoteGateway>,
    store: Arc<dyn SessionStore>,
}

impl App {
    /// Build the app, restoring a saved session. A restored session opens on
    /// the dashboard, otherwise the landing screen is shown.
    pub fn new(gateway: Arc<dyn RemoteGateway>, store: Arc<dyn SessionStore>) -> Self {
        let mut state = session::restore(store.as_ref());
        if state.is_authenticated() {
            state.apply(Action::Navigate(Screen::Dashboard));
        }

        Self {
            state,
            registration: RegistrationFlow::new(gateway.clone()),
            login_flow: LoginFlow::new(gateway.clone()),
            gate: StepGate::new(),
            tariffs: TariffSelection::default(),
            gateway,
            store,
        }
    }

    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    /// Change screens. Entering registration starts a fresh flow unless one
    /// is already underway.
    pub fn navigate(&mut self, screen: Screen) -> Screen {
        if screen == Screen::Register && self.registration.step() == RegistrationStep::Done {
            self.registration = RegistrationFlow::new(self.gateway.clone());
        }
        self.state.apply(Action::Navigate(screen));
        self.state.screen
    }

    pub fn logout(&mut self) {
        tracing::info!("Signing out");
        session::end(self.store.as_ref(), &mut self.state);
        self.gate = StepGate::new();
        self.state.apply(Action::Navigate(Screen::Landing));
    }

    /// Store the session, reset onboarding and open the dashboard.
    fn sign_in(&mut self, auth: AuthResponse) -> AuthResponse {
        session::persist(self.store.as_ref(), &mut self.state, auth.clone());
        self.gate = StepGate::new();
        self.state.apply(Action::Navigate(Screen::Dashboard));
        auth
    }

    fn token(&self) -> Result<String> {
        self.state.token.clone().ok_or(ClientError::Unauthorized)
    }

    /// Run `result` through the 401 guard.
    fn guarded<T>(&mut self, result: Result<T>) -> Result<T> {
        let result = session::guard(result, self.store.as_ref(), &mut self.state);
        if self.state.token.is_none() {
            self.gate = StepGate::new();
        }
        result
    }
}
