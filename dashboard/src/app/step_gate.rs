//! # Onboarding Step Gate
//!
//! The dashboard walks the user through four tabs in order. A tab opens only
//! when every *required* tab before it is completed; `balance` is optional.
//!
//! | id | required |
//! |---|---|
//! | `knowledge` | yes |
//! | `integrations` | yes |
//! | `settings` | yes |
//! | `balance` | no |
//!
//! Completed ids are only ever added. Status precedence is
//! `completed` > `active` > `available` > `locked`.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub is_required: bool,
}

pub const STEPS: [StepDefinition; 4] = [
    StepDefinition {
        id: "knowledge",
        display_name: "Knowledge base",
        description: "Teach the robot about your product",
        is_required: true,
    },
    StepDefinition {
        id: "integrations",
        display_name: "Integrations",
        description: "Connect your CRM and call lists",
        is_required: true,
    },
    StepDefinition {
        id: "settings",
        display_name: "Settings",
        description: "Set calling hours and limits",
        is_required: true,
    },
    StepDefinition {
        id: "balance",
        display_name: "Balance",
        description: "Top up and manage payments",
        is_required: false,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Locked,
    Available,
    Active,
    Completed,
}

impl StepStatus {
    pub fn is_selectable(&self) -> bool {
        !matches!(self, StepStatus::Locked)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepGate {
    completed: HashSet<&'static str>,
    selected: &'static str,
}

impl Default for StepGate {
    fn default() -> Self {
        Self::new()
    }
}

impl StepGate {
    pub fn new() -> Self {
        Self {
            completed: HashSet::new(),
            selected: STEPS[0].id,
        }
    }

    pub fn steps(&self) -> &'static [StepDefinition] {
        &STEPS
    }

    pub fn selected_step(&self) -> &'static str {
        self.selected
    }

    pub fn is_completed(&self, step_id: &str) -> bool {
        self.completed.contains(step_id)
    }

    pub fn status(&self, step_id: &str) -> StepStatus {
        let Some(index) = index_of(step_id) else {
            return StepStatus::Locked;
        };

        if self.completed.contains(step_id) {
            StepStatus::Completed
        } else if self.selected == step_id {
            StepStatus::Active
        } else if self.can_access(index) {
            StepStatus::Available
        } else {
            StepStatus::Locked
        }
    }

    /// Switch tabs. Locked and unknown ids are ignored; returns whether
    /// `step_id` is now selected.
    pub fn select_step(&mut self, step_id: &str) -> bool {
        if !self.status(step_id).is_selectable() {
            tracing::debug!(step_id, "Ignoring selection of locked step");
            return false;
        }
        if let Some(index) = index_of(step_id) {
            self.selected = STEPS[index].id;
        }
        true
    }

    /// Mark a step done. Idempotent; unknown ids are ignored.
    pub fn complete(&mut self, step_id: &str) {
        if let Some(index) = index_of(step_id) {
            if self.completed.insert(STEPS[index].id) {
                tracing::info!(step_id, "Onboarding step completed");
            }
        }
    }

    /// `(completed required steps, total required steps)`.
    pub fn required_progress(&self) -> (usize, usize) {
        let required = STEPS.iter().filter(|s| s.is_required);
        let total = required.clone().count();
        let done = required.filter(|s| self.completed.contains(s.id)).count();
        (done, total)
    }

    pub fn all_required_completed(&self) -> bool {
        let (done, total) = self.required_progress();
        done == total
    }

    /// The step after the selected one, if it can be opened.
    pub fn next_step(&self) -> Option<&'static str> {
        let current = index_of(self.selected)?;
        let next = current + 1;
        (next < STEPS.len() && self.can_access(next)).then(|| STEPS[next].id)
    }

    /// The step before the selected one.
    pub fn previous_step(&self) -> Option<&'static str> {
        let current = index_of(self.selected)?;
        current.checked_sub(1).map(|i| STEPS[i].id)
    }

    fn can_access(&self, index: usize) -> bool {
        STEPS[..index]
            .iter()
            .all(|s| !s.is_required || self.completed.contains(s.id))
    }
}

fn index_of(step_id: &str) -> Option<usize> {
    STEPS.iter().position(|s| s.id == step_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_gate() {
        let gate = StepGate::new();

        assert_eq!(gate.selected_step(), "knowledge");
        assert_eq!(gate.status("knowledge"), StepStatus::Active);
        assert_eq!(gate.status("integrations"), StepStatus::Locked);
        assert_eq!(gate.status("settings"), StepStatus::Locked);
        assert_eq!(gate.status("balance"), StepStatus::Locked);
        assert_eq!(gate.required_progress(), (0, 3));
    }

    #[test]
    fn test_completing_knowledge_unlocks_integrations() {
        let mut gate = StepGate::new();
        assert!(!gate.select_step("integrations"));
        assert_eq!(gate.selected_step(), "knowledge");

        gate.complete("knowledge");

        assert_eq!(gate.status("knowledge"), StepStatus::Completed);
        assert_eq!(gate.status("integrations"), StepStatus::Available);
        assert_eq!(gate.status("settings"), StepStatus::Locked);
        assert!(gate.select_step("integrations"));
        assert_eq!(gate.status("integrations"), StepStatus::Active);
    }

    #[test]
    fn test_balance_needs_all_required() {
        let mut gate = StepGate::new();
        gate.complete("knowledge");
        gate.complete("integrations");
        assert_eq!(gate.status("balance"), StepStatus::Locked);

        gate.complete("settings");
        assert_eq!(gate.status("balance"), StepStatus::Available);
        assert!(gate.all_required_completed());
    }

    #[test]
    fn test_complete_is_idempotent_and_optional_not_counted() {
        let mut gate = StepGate::new();
        gate.complete("knowledge");
        gate.complete("knowledge");
        gate.complete("balance");

        assert_eq!(gate.required_progress(), (1, 3));
        assert_eq!(gate.status("balance"), StepStatus::Completed);
    }

    #[test]
    fn test_unknown_step() {
        let mut gate = StepGate::new();
        gate.complete("payments");

        assert_eq!(gate.status("payments"), StepStatus::Locked);
        assert!(!gate.select_step("payments"));
        assert_eq!(gate.required_progress(), (0, 3));
    }

    #[test]
    fn test_completed_step_stays_selectable() {
        let mut gate = StepGate::new();
        gate.complete("knowledge");
        gate.select_step("integrations");

        assert!(gate.select_step("knowledge"));
        assert_eq!(gate.status("knowledge"), StepStatus::Completed);
    }

    #[test]
    fn test_next_and_previous() {
        let mut gate = StepGate::new();
        assert_eq!(gate.next_step(), None);
        assert_eq!(gate.previous_step(), None);

        gate.complete("knowledge");
        assert_eq!(gate.next_step(), Some("integrations"));

        gate.select_step("integrations");
        assert_eq!(gate.previous_step(), Some("knowledge"));
        assert_eq!(gate.next_step(), None);
    }
}
