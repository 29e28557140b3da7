//! Preamble collaborators: search facets and batch actions.
//!
//! The search bar and the action bar are painted by the host. The table
//! only needs to know whether they exist (for the preamble layout) and,
//! for batch actions, whether each one is currently allowed. That check is
//! asynchronous: actions start out pending (rendered disabled) and flip
//! when their check resolves.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};

// =============================================================================
// Search facets
// =============================================================================

/// A facet offered by the search bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterFacet {
    /// Text shown to the user.
    pub label: String,
    /// Item field the facet filters on.
    pub name: String,
}

impl FilterFacet {
    pub fn new(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Batch actions
// =============================================================================

/// Capability check behind a batch action.
#[async_trait]
pub trait ActionService: Send + Sync {
    /// Resolves to whether the action may currently run.
    async fn allowed(&self) -> bool;
}

/// How the action bar presents an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Create,
    DeleteSelected,
    Link,
    #[default]
    Default,
}

/// Presentation of a batch action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionTemplate {
    #[serde(rename = "type", default)]
    pub kind: ActionKind,
    #[serde(default)]
    pub text: Option<String>,
}

impl ActionTemplate {
    pub fn new(kind: ActionKind) -> Self {
        Self { kind, text: None }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A batch action supplied by the host.
#[derive(Clone)]
pub struct BatchAction {
    pub id: String,
    pub service: Arc<dyn ActionService>,
    pub template: ActionTemplate,
}

impl BatchAction {
    pub fn new(
        id: impl Into<String>,
        service: Arc<dyn ActionService>,
        template: ActionTemplate,
    ) -> Self {
        Self {
            id: id.into(),
            service,
            template,
        }
    }
}

impl fmt::Debug for BatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchAction")
            .field("id", &self.id)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

/// Result of an action's allowed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AllowedState {
    /// The check has not resolved yet.
    #[default]
    Pending,
    Allowed,
    Denied,
}

/// An action as the view layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionView {
    pub id: String,
    pub template: ActionTemplate,
    pub state: AllowedState,
    /// Only allowed actions are enabled; pending ones render disabled.
    pub enabled: bool,
}

/// A resolved allowed check, tagged with the action set it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedOutcome {
    pub generation: u64,
    pub action_id: String,
    pub allowed: bool,
}

/// An in-flight allowed check.
pub type AllowedCheck = BoxFuture<'static, AllowedOutcome>;

#[derive(Debug, Clone)]
struct ActionEntry {
    action: BatchAction,
    state: AllowedState,
}

/// The current batch actions and the state of their allowed checks.
///
/// Replacing the actions starts a new generation. Outcomes from an older
/// generation, or for an action that no longer exists, are ignored.
#[derive(Debug, Clone, Default)]
pub struct ActionBar {
    generation: u64,
    entries: Vec<ActionEntry>,
}

impl ActionBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the actions and returns one allowed check per action.
    ///
    /// The checks are not polled here; the host drives them (or hands them
    /// to [`ActionBar::settle`]) and feeds the outcomes to
    /// [`ActionBar::apply`].
    pub fn set_actions(&mut self, actions: Vec<BatchAction>) -> Vec<AllowedCheck> {
        self.generation += 1;
        let generation = self.generation;

        let checks = actions
            .iter()
            .map(|action| {
                let service = Arc::clone(&action.service);
                let action_id = action.id.clone();
                async move {
                    let allowed = service.allowed().await;
                    AllowedOutcome {
                        generation,
                        action_id,
                        allowed,
                    }
                }
                .boxed()
            })
            .collect();

        self.entries = actions
            .into_iter()
            .map(|action| ActionEntry {
                action,
                state: AllowedState::Pending,
            })
            .collect();

        log::debug!(
            "Batch actions replaced ({} actions, generation {})",
            self.entries.len(),
            generation
        );
        checks
    }

    /// Records a resolved check. Returns true if an action changed state.
    pub fn apply(&mut self, outcome: AllowedOutcome) -> bool {
        if outcome.generation != self.generation {
            log::trace!(
                "Ignoring stale allowed check for '{}' (generation {}, current {})",
                outcome.action_id,
                outcome.generation,
                self.generation
            );
            return false;
        }

        let state = if outcome.allowed {
            AllowedState::Allowed
        } else {
            AllowedState::Denied
        };
        let mut changed = false;
        for entry in self
            .entries
            .iter_mut()
            .filter(|e| e.action.id == outcome.action_id)
        {
            changed |= entry.state != state;
            entry.state = state;
        }
        if !changed {
            log::trace!("Allowed check for '{}' changed nothing", outcome.action_id);
        }
        changed
    }

    /// Drives `checks` to completion, applying each outcome as it arrives.
    pub async fn settle(&mut self, checks: Vec<AllowedCheck>) {
        let mut pending: FuturesUnordered<AllowedCheck> = checks.into_iter().collect();
        while let Some(outcome) = pending.next().await {
            self.apply(outcome);
        }
    }

    /// Current generation number.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// State of an action's check.
    pub fn state(&self, id: &str) -> Option<AllowedState> {
        self.entries
            .iter()
            .find(|e| e.action.id == id)
            .map(|e| e.state)
    }

    /// The actions as the view layer sees them.
    pub fn views(&self) -> Vec<ActionView> {
        self.entries
            .iter()
            .map(|e| ActionView {
                id: e.action.id.clone(),
                template: e.action.template.clone(),
                state: e.state,
                enabled: e.state == AllowedState::Allowed,
            })
            .collect()
    }
}
