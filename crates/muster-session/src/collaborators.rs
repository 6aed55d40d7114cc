//! Trait seam for the external collaborators a session delegates to.
//!
//! Widget rendering, transport, announcement formatting, and outcome
//! persistence all live behind these traits; the core never blocks on
//! network or storage directly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use muster_core::{ActivityMetadata, Roster, SelectionSnapshot};

use crate::machine::SessionOutcome;

/// Redraws the interactive prompt.
///
/// Invoked after every accepted open-state mutation and on refused
/// confirmation; the full snapshot is passed so the widget layer can restore
/// every menu's state (placeholders for unset fields).
#[async_trait]
pub trait PromptRenderer: Send + Sync {
    /// Redraw the prompt with the current selections.
    async fn render(&self, prompt: &str, snapshot: &SelectionSnapshot) -> anyhow::Result<()>;

    /// Show a standalone notice (cancellation, timeout, generic failure).
    async fn notify(&self, notice: &str) -> anyhow::Result<()>;
}

/// Publishes the final roster; invoked exactly once, only on confirmation.
#[async_trait]
pub trait GroupAnnouncer: Send + Sync {
    /// Announce the confirmed group.
    async fn announce(&self, roster: &Roster, metadata: &ActivityMetadata) -> anyhow::Result<()>;
}

/// Terminal outcome row for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeRecord {
    /// The session the outcome belongs to.
    pub session_id: String,
    /// The initiator the session belonged to.
    pub initiator_id: String,
    /// How the session ended.
    pub outcome: SessionOutcome,
    /// When the outcome was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Receives exactly one terminal outcome per session, for logging and
/// persistence.
#[async_trait]
pub trait OutcomeReporter: Send + Sync {
    /// Record a session's terminal outcome.
    async fn report(&self, record: &OutcomeRecord) -> anyhow::Result<()>;
}
