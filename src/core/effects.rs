//! Side effects requested by form actions
//!
//! Actions never touch the presentation layer directly. They return an
//! [`ActionOutcome`] and the calling layer decides what a refresh or a
//! redirect means for its framework.
//!
//! ```text
//! action ──▶ ActionOutcome { state, effects } ──▶ server::effects::apply
//!                                                    ├── Refresh(path)  → PageCache::invalidate
//!                                                    └── Redirect(path) → 303 See Other
//! ```

use crate::actions::ActionState;
use serde::{Deserialize, Serialize};

/// A single instruction for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum Effect {
    /// Discard any cached rendering of this path
    Refresh(String),
    /// Send the client to this path
    Redirect(String),
}

/// How an action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The mutation ran
    Completed,
    /// Input failed validation; nothing was persisted
    Rejected,
    /// The store failed the statement
    Failed,
    /// The target row does not exist (only under `MissingRowPolicy::Report`)
    NotFound,
    /// The authentication backend refused the credentials
    Unauthorized,
}

/// Result of a form action: what to show, and what to do
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub kind: OutcomeKind,
    pub state: ActionState,
    pub effects: Vec<Effect>,
}

impl ActionOutcome {
    pub fn completed(state: ActionState, effects: Vec<Effect>) -> Self {
        Self {
            kind: OutcomeKind::Completed,
            state,
            effects,
        }
    }

    /// An outcome with a message and no effects
    pub fn halted(kind: OutcomeKind, state: ActionState) -> Self {
        Self {
            kind,
            state,
            effects: Vec::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.kind == OutcomeKind::Completed
    }

    /// Target of the redirect effect, if any
    pub fn redirect_target(&self) -> Option<&str> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::Redirect(path) => Some(path.as_str()),
            Effect::Refresh(_) => None,
        })
    }

    /// Paths to refresh, in order
    pub fn refreshed_paths(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().filter_map(|effect| match effect {
            Effect::Refresh(path) => Some(path.as_str()),
            Effect::Redirect(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_target_and_refreshes() {
        let outcome = ActionOutcome::completed(
            ActionState::default(),
            vec![
                Effect::Refresh("/dashboard/invoices".into()),
                Effect::Redirect("/dashboard/invoices".into()),
            ],
        );

        assert!(outcome.is_completed());
        assert_eq!(outcome.redirect_target(), Some("/dashboard/invoices"));
        assert_eq!(
            outcome.refreshed_paths().collect::<Vec<_>>(),
            vec!["/dashboard/invoices"]
        );
    }

    #[test]
    fn test_halted_has_no_effects() {
        let outcome = ActionOutcome::halted(
            OutcomeKind::Failed,
            ActionState::message("Database Error: Failed to Create Invoice."),
        );
        assert!(outcome.effects.is_empty());
        assert_eq!(outcome.redirect_target(), None);
    }

    #[test]
    fn test_effect_serialization() {
        let json = serde_json::to_value(Effect::Redirect("/x".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "redirect", "path": "/x" }));
    }
}
