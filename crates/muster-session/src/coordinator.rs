//! Multi-session registry.
//!
//! Sessions run independently and concurrently; the only shared state is the
//! read-only role catalog. The coordinator opens sessions, hands the
//! transport a per-session event sender, prunes the registry when a session
//! reaches a terminal phase, and forwards each terminal outcome exactly once
//! on the completion channel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::mpsc;
use uuid::Uuid;

use muster_core::{ActivityMetadata, DifficultyBand, Participant, RoleCatalog};

use crate::events::InboundEvent;
use crate::machine::{SessionMachine, SessionOutcome};
use crate::runtime::{SessionCollaborators, SessionRuntimeConfig, run_session};

const CLOSED_CHANNEL_CAPACITY: usize = 64;

/// Terminal notification for one session.
#[derive(Debug, Clone)]
pub struct SessionClosed {
    /// The session that ended.
    pub session_id: String,
    /// Its initiator.
    pub initiator_id: String,
    /// How it ended.
    pub outcome: SessionOutcome,
}

/// Everything needed to open one session.
#[derive(Debug, Clone)]
pub struct OpenSessionRequest {
    /// The only participant whose events the session will accept.
    pub initiator: Participant,
    /// Activity details captured from the opening command.
    pub metadata: ActivityMetadata,
    /// Difficulty band derived from the listing context.
    pub band: DifficultyBand,
}

/// Handle returned to the transport for one opened session.
pub struct SessionTicket {
    /// Id of the new session.
    pub session_id: String,
    /// Feed inbound events here. Dropping the sender parks the session until
    /// its idle deadline.
    pub events: mpsc::Sender<InboundEvent>,
}

/// Registry of independently running formation sessions.
pub struct SessionCoordinator {
    catalog: Arc<RoleCatalog>,
    collaborators: SessionCollaborators,
    config: SessionRuntimeConfig,
    sessions: StdMutex<HashMap<String, mpsc::Sender<InboundEvent>>>,
    closed_tx: mpsc::Sender<SessionClosed>,
}

impl SessionCoordinator {
    /// Start a coordinator. Returns the shared handle plus the channel that
    /// receives each session's terminal outcome exactly once.
    pub fn start(
        catalog: Arc<RoleCatalog>,
        collaborators: SessionCollaborators,
        config: SessionRuntimeConfig,
    ) -> (Arc<Self>, mpsc::Receiver<SessionClosed>) {
        let (closed_tx, closed_rx) = mpsc::channel(CLOSED_CHANNEL_CAPACITY);
        let coordinator = Arc::new(Self {
            catalog,
            collaborators,
            config,
            sessions: StdMutex::new(HashMap::new()),
            closed_tx,
        });
        (coordinator, closed_rx)
    }

    /// Open a new session and spawn its actor.
    pub fn open_session(self: &Arc<Self>, request: OpenSessionRequest) -> SessionTicket {
        let session_id = Uuid::new_v4().to_string();
        let (events_tx, events_rx) = mpsc::channel(self.config.inbound_queue_capacity);

        let machine = SessionMachine::new(
            session_id.clone(),
            request.initiator.clone(),
            request.metadata.clone(),
            request.band,
            Arc::clone(&self.catalog),
        );

        self.lock_sessions()
            .insert(session_id.clone(), events_tx.clone());
        tracing::info!(
            event = "session.opened",
            session_id = %session_id,
            initiator = %request.initiator.user_id,
            activity = %request.metadata.activity,
            "formation session opened"
        );

        let coordinator = Arc::clone(self);
        let collaborators = self.collaborators.clone();
        let config = self.config.clone();
        let initiator_id = request.initiator.user_id.clone();
        let task_session_id = session_id.clone();
        tokio::spawn(async move {
            let outcome = run_session(machine, events_rx, collaborators, config).await;
            coordinator
                .finish_session(task_session_id, initiator_id, outcome)
                .await;
        });

        SessionTicket {
            session_id,
            events: events_tx,
        }
    }

    /// Sender for an open session, for transports that look sessions up by
    /// id. `None` once the session has closed.
    pub fn session_events(&self, session_id: &str) -> Option<mpsc::Sender<InboundEvent>> {
        self.lock_sessions().get(session_id).cloned()
    }

    /// Sessions still open.
    pub fn active_sessions(&self) -> usize {
        self.lock_sessions().len()
    }

    async fn finish_session(
        &self,
        session_id: String,
        initiator_id: String,
        outcome: SessionOutcome,
    ) {
        self.lock_sessions().remove(&session_id);
        let closed = SessionClosed {
            session_id,
            initiator_id,
            outcome,
        };
        if self.closed_tx.send(closed).await.is_err() {
            tracing::debug!("session close listener dropped");
        }
    }

    fn lock_sessions(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<String, mpsc::Sender<InboundEvent>>> {
        self.sessions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
