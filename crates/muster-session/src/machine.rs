//! The per-session state machine.
//!
//! Sync and effect-free: each inbound event maps to a [`Step`] describing
//! the externally visible consequence, and the actor in `runtime` performs
//! the actual collaborator calls. Keeping the machine pure keeps the funnel
//! deterministic and directly testable.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use muster_core::{
    ActivityMetadata, Allocation, DifficultyBand, Participant, RoleCatalog, SelectionError,
    SelectionSnapshot, SelectionState, allocate,
};

use crate::events::{CompositionChoice, EventKind, InboundEvent};

/// Lifecycle phase. `Open` is the only non-terminal phase; each terminal
/// phase is entered at most once and ends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Accepting selection and lifecycle events.
    Open,
    /// The group was created.
    Confirmed,
    /// The initiator cancelled.
    Cancelled,
    /// The idle deadline passed first.
    TimedOut,
}

impl SessionPhase {
    /// Whether the session stopped accepting events.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Open)
    }
}

/// Terminal outcome reported exactly once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionOutcome {
    /// Confirmed; the group was announced.
    #[serde(rename = "created")]
    Created,
    /// Cancelled by the initiator.
    #[serde(rename = "cancelled")]
    Cancelled,
    /// Timed out before the group was created.
    #[serde(rename = "timeoutBeforeCreation")]
    TimeoutBeforeCreation,
}

impl SessionOutcome {
    /// Wire label, matching the persisted status values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Cancelled => "cancelled",
            Self::TimeoutBeforeCreation => "timeoutBeforeCreation",
        }
    }
}

impl std::fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Externally visible consequence of one handled event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Redraw the prompt: an accepted mutation, a recoverable selection
    /// error, or a refused confirmation (corrective notice included in the
    /// prompt text).
    Render {
        /// Prompt text, possibly with a corrective notice appended.
        prompt: String,
        /// Current state of all four selectable fields.
        snapshot: SelectionSnapshot,
    },
    /// Dropped without effect: wrong sender, terminal phase, or the
    /// composition sentinel.
    Ignored,
    /// Confirmation succeeded; the session is closed.
    Confirmed(Allocation),
    /// The initiator cancelled; the session is closed.
    Cancelled,
}

/// State machine for one formation session.
pub struct SessionMachine {
    session_id: String,
    initiator: Participant,
    metadata: ActivityMetadata,
    catalog: Arc<RoleCatalog>,
    selection: SelectionState,
    phase: SessionPhase,
    opened_at: DateTime<Utc>,
}

impl SessionMachine {
    /// Open a session for one initiator.
    pub fn new(
        session_id: impl Into<String>,
        initiator: Participant,
        metadata: ActivityMetadata,
        band: DifficultyBand,
        catalog: Arc<RoleCatalog>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            initiator,
            metadata,
            catalog,
            selection: SelectionState::new(band),
            phase: SessionPhase::Open,
            opened_at: Utc::now(),
        }
    }

    /// Session id.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The initiator, the only accepted event source.
    pub fn initiator(&self) -> &Participant {
        &self.initiator
    }

    /// Activity metadata captured at open time.
    pub fn metadata(&self) -> &ActivityMetadata {
        &self.metadata
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// When the session was opened.
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// The current selection state.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Base prompt text shown above the selection widgets.
    pub fn prompt(&self) -> String {
        format!("You are creating a group for {}.", self.metadata.activity)
    }

    fn prompt_with_notice(&self, notice: &str) -> String {
        format!("{}\n**{notice}**", self.prompt())
    }

    /// Feed one inbound event through the machine.
    pub fn handle(&mut self, event: &InboundEvent) -> Step {
        if self.phase.is_terminal() {
            tracing::debug!(
                session_id = %self.session_id,
                phase = ?self.phase,
                kind = event.kind.label(),
                "event after terminal phase dropped"
            );
            return Step::Ignored;
        }
        if event.source_user_id != self.initiator.user_id {
            tracing::debug!(
                session_id = %self.session_id,
                source = %event.source_user_id,
                kind = event.kind.label(),
                "event from non-initiator dropped"
            );
            return Step::Ignored;
        }

        match &event.kind {
            EventKind::Difficulty(level) => {
                let result = self.selection.set_difficulty(*level);
                self.render_after(result)
            }
            EventKind::OwnRole(role) => {
                let result = self.selection.set_own_role(&self.catalog, role.clone());
                self.render_after(result)
            }
            EventKind::Composition(CompositionChoice::NoneSelected) => {
                // The menu was opened before a role was committed; nothing
                // to store.
                Step::Ignored
            }
            EventKind::Composition(CompositionChoice::Roles(roles)) => {
                let result = self.selection.set_needed_roles(&self.catalog, roles.clone());
                self.render_after(result)
            }
            EventKind::Requirements(tags) => {
                self.selection.set_requirements(tags.clone());
                self.render_after(Ok(()))
            }
            EventKind::Confirm => self.confirm(),
            EventKind::Cancel => {
                self.phase = SessionPhase::Cancelled;
                Step::Cancelled
            }
        }
    }

    fn render_after(&self, result: Result<(), SelectionError>) -> Step {
        let prompt = match result {
            Ok(()) => self.prompt(),
            Err(ref error) => self.prompt_with_notice(&error.to_string()),
        };
        Step::Render {
            prompt,
            snapshot: self.selection.snapshot(),
        }
    }

    fn confirm(&mut self) -> Step {
        if let Some(missing) = self.selection.first_missing() {
            return Step::Render {
                prompt: self.prompt_with_notice(missing.corrective_message()),
                snapshot: self.selection.snapshot(),
            };
        }
        let (Some(own_role), Some(needed)) = (
            self.selection.own_role().cloned(),
            self.selection.needed_roles().cloned(),
        ) else {
            return Step::Ignored;
        };

        match allocate(&self.catalog, &self.initiator, &own_role, &needed) {
            Ok(allocation) => {
                self.phase = SessionPhase::Confirmed;
                Step::Confirmed(allocation)
            }
            Err(error) => {
                // Roles were validated when stored, so this indicates a
                // catalog mismatch; keep the session open and surface it.
                tracing::error!(
                    session_id = %self.session_id,
                    %error,
                    "allocation failed at confirm"
                );
                Step::Render {
                    prompt: self.prompt_with_notice("Something went wrong creating the group."),
                    snapshot: self.selection.snapshot(),
                }
            }
        }
    }

    /// The idle deadline passed; close the session if still open.
    ///
    /// Returns false when a terminal phase was already reached — the timer
    /// lost the race and no transition happens.
    pub fn timeout(&mut self) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        self.phase = SessionPhase::TimedOut;
        true
    }
}
