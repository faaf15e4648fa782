//! # Application State Types
//!
//! The client's whole state lives in one [`AppState`] value. It only changes
//! through [`reduce`], a pure function from `(state, action)` to the next state,
//! so every transition can be tested without I/O.

use shared::{CallSettings, Integration, KnowledgeItem, UserInfo};

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Landing page
    #[default]
    Landing,
    /// SMS registration (also the target after a session expires)
    Register,
    /// Phone/password login
    Login,
    /// Onboarding dashboard
    Dashboard,
    /// Tariff selection and payment
    Payment,
}

impl Screen {
    /// Get screen title for header display
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Landing => "AI Sales Robot",
            Screen::Register => "Registration",
            Screen::Login => "Sign in",
            Screen::Dashboard => "Dashboard",
            Screen::Payment => "Tariffs",
        }
    }

    /// Screens only reachable with a session.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Screen::Dashboard | Screen::Payment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub screen: Screen,
    pub user: Option<UserInfo>,
    pub token: Option<String>,
    pub knowledge_base: Vec<KnowledgeItem>,
    pub integrations: Vec<Integration>,
    pub call_settings: CallSettings,
}

impl AppState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Apply `action` in place.
    pub fn apply(&mut self, action: Action) {
        *self = reduce(std::mem::take(self), action);
    }
}

/// Every way the state can change.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Go to a screen. Auth-only screens redirect to registration without a session.
    Navigate(Screen),
    LoggedIn { user: UserInfo, token: String },
    UserRefreshed(UserInfo),
    /// Drop the session and per-user data. Call settings are kept.
    Logout,
    KnowledgeLoaded(Vec<KnowledgeItem>),
    IntegrationAdded(Integration),
    PhoneNumbersImported(Vec<String>),
    CallSettingsSaved(CallSettings),
}

pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::Navigate(screen) => {
            state.screen = if screen.requires_auth() && !state.is_authenticated() {
                Screen::Register
            } else {
                screen
            };
        }
        Action::LoggedIn { user, token } => {
            state.user = Some(user);
            state.token = Some(token);
        }
        Action::UserRefreshed(user) => {
            if state.is_authenticated() {
                state.user = Some(user);
            }
        }
        Action::Logout => {
            state.user = None;
            state.token = None;
            state.knowledge_base.clear();
            state.integrations.clear();
            if state.screen.requires_auth() {
                state.screen = Screen::Register;
            }
        }
        Action::KnowledgeLoaded(items) => state.knowledge_base = items,
        Action::IntegrationAdded(integration) => {
            // Same id replaces the earlier entry
            state.integrations.retain(|i| i.id != integration.id);
            state.integrations.push(integration);
        }
        Action::PhoneNumbersImported(numbers) => state.call_settings.phone_numbers = numbers,
        Action::CallSettingsSaved(settings) => state.call_settings = settings,
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            id: "1".to_string(),
            phone: "79991234567".to_string(),
            email: None,
            balance: 0,
            is_active: true,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn logged_in() -> AppState {
        reduce(
            AppState::default(),
            Action::LoggedIn {
                user: user(),
                token: "t".to_string(),
            },
        )
    }

    #[test]
    fn test_navigate_to_dashboard_requires_session() {
        let state = reduce(AppState::default(), Action::Navigate(Screen::Dashboard));
        assert_eq!(state.screen, Screen::Register);

        let state = reduce(logged_in(), Action::Navigate(Screen::Dashboard));
        assert_eq!(state.screen, Screen::Dashboard);
    }

    #[test]
    fn test_logout_keeps_call_settings() {
        let mut state = logged_in();
        state.apply(Action::Navigate(Screen::Dashboard));
        state.apply(Action::PhoneNumbersImported(vec!["79991234567".to_string()]));
        state.apply(Action::KnowledgeLoaded(vec![KnowledgeItem {
            id: "k".to_string(),
            question: "q".to_string(),
            answer: "a".to_string(),
            category: "general".to_string(),
            is_active: true,
        }]));

        state.apply(Action::Logout);

        assert!(!state.is_authenticated());
        assert!(state.user.is_none());
        assert!(state.knowledge_base.is_empty());
        assert_eq!(state.call_settings.phone_numbers, vec!["79991234567"]);
        assert_eq!(state.screen, Screen::Register);
    }

    #[test]
    fn test_refresh_ignored_when_logged_out() {
        let state = reduce(AppState::default(), Action::UserRefreshed(user()));
        assert!(state.user.is_none());
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let before = logged_in();
        let after = reduce(before.clone(), Action::Logout);
        assert!(before.is_authenticated());
        assert!(!after.is_authenticated());
    }
}
