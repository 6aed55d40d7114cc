//! Per-session actor: one task owning one machine.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::Instant;

use muster_core::Allocation;

use crate::collaborators::{GroupAnnouncer, OutcomeRecord, OutcomeReporter, PromptRenderer};
use crate::events::InboundEvent;
use crate::machine::{SessionMachine, SessionOutcome, Step};

/// Default idle window before an unconfirmed session times out.
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 90_000;

/// Default capacity of a session's inbound event queue.
pub const DEFAULT_INBOUND_QUEUE_CAPACITY: usize = 64;

const TIMEOUT_NOTICE: &str = "Group creation timed out! Start a new session to list your key.";
const CANCELLED_NOTICE: &str = "Group creation cancelled by the user.";
const FAILURE_NOTICE: &str = "Something went wrong while processing the group.";

/// Knobs for one session actor.
#[derive(Debug, Clone)]
pub struct SessionRuntimeConfig {
    /// Idle window with no accepted event before the session times out.
    pub idle_timeout: Duration,
    /// Bounded capacity of the inbound event queue.
    pub inbound_queue_capacity: usize,
}

impl Default for SessionRuntimeConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_millis(DEFAULT_IDLE_TIMEOUT_MS),
            inbound_queue_capacity: DEFAULT_INBOUND_QUEUE_CAPACITY,
        }
    }
}

/// The collaborator bundle a session performs its external effects through.
#[derive(Clone)]
pub struct SessionCollaborators {
    /// Prompt redraw / notice surface.
    pub renderer: Arc<dyn PromptRenderer>,
    /// Final roster publisher.
    pub announcer: Arc<dyn GroupAnnouncer>,
    /// Terminal outcome sink.
    pub reporter: Arc<dyn OutcomeReporter>,
}

/// Drive one session to its terminal phase and return the outcome.
///
/// Inbound events race the idle deadline; the deadline advances on every
/// initiator interaction that produces a render (silently ignored events do
/// not touch it), and the first terminal transition disarms the timer by
/// ending the loop. Collaborator failures are logged and surfaced as a
/// generic notice — they never reverse a completed transition.
pub(crate) async fn run_session(
    mut machine: SessionMachine,
    mut events: mpsc::Receiver<InboundEvent>,
    collaborators: SessionCollaborators,
    config: SessionRuntimeConfig,
) -> SessionOutcome {
    let mut deadline = Instant::now() + config.idle_timeout;

    loop {
        tokio::select! {
            maybe_event = events.recv() => match maybe_event {
                Some(event) => match machine.handle(&event) {
                    Step::Ignored => {}
                    Step::Render { prompt, snapshot } => {
                        deadline = Instant::now() + config.idle_timeout;
                        if let Err(error) = collaborators.renderer.render(&prompt, &snapshot).await {
                            let chain = format!("{error:#}");
                            tracing::error!(
                                event = "session.render_failed",
                                session_id = %machine.session_id(),
                                error = %chain,
                                "prompt render failed"
                            );
                            surface_failure(&machine, &collaborators).await;
                        }
                    }
                    Step::Confirmed(allocation) => {
                        close_confirmed(&machine, &allocation, &collaborators).await;
                        return SessionOutcome::Created;
                    }
                    Step::Cancelled => {
                        close_with_notice(
                            &machine,
                            SessionOutcome::Cancelled,
                            CANCELLED_NOTICE,
                            &collaborators,
                        )
                        .await;
                        return SessionOutcome::Cancelled;
                    }
                },
                None => {
                    // The transport went away; nothing more can arrive. Hold
                    // the session open until the idle deadline, then time out.
                    tokio::time::sleep_until(deadline).await;
                    machine.timeout();
                    close_with_notice(
                        &machine,
                        SessionOutcome::TimeoutBeforeCreation,
                        TIMEOUT_NOTICE,
                        &collaborators,
                    )
                    .await;
                    return SessionOutcome::TimeoutBeforeCreation;
                }
            },
            _ = tokio::time::sleep_until(deadline) => {
                machine.timeout();
                close_with_notice(
                    &machine,
                    SessionOutcome::TimeoutBeforeCreation,
                    TIMEOUT_NOTICE,
                    &collaborators,
                )
                .await;
                return SessionOutcome::TimeoutBeforeCreation;
            }
        }
    }
}

async fn close_confirmed(
    machine: &SessionMachine,
    allocation: &Allocation,
    collaborators: &SessionCollaborators,
) {
    tracing::info!(
        event = "session.confirmed",
        session_id = %machine.session_id(),
        slots = allocation.roster.len(),
        exhausted_pools = allocation.exhausted_pools.len(),
        "group confirmed"
    );
    if let Err(error) = collaborators
        .announcer
        .announce(&allocation.roster, machine.metadata())
        .await
    {
        let chain = format!("{error:#}");
        tracing::error!(
            event = "session.announce_failed",
            session_id = %machine.session_id(),
            error = %chain,
            "group announcement failed"
        );
        surface_failure(machine, collaborators).await;
    }
    report_outcome(machine, SessionOutcome::Created, collaborators).await;
}

async fn close_with_notice(
    machine: &SessionMachine,
    outcome: SessionOutcome,
    notice: &str,
    collaborators: &SessionCollaborators,
) {
    tracing::info!(
        event = "session.closed",
        session_id = %machine.session_id(),
        outcome = outcome.as_str(),
        "session closed"
    );
    if let Err(error) = collaborators.renderer.notify(notice).await {
        let chain = format!("{error:#}");
        tracing::warn!(
            session_id = %machine.session_id(),
            error = %chain,
            "close notice could not be delivered"
        );
    }
    report_outcome(machine, outcome, collaborators).await;
}

async fn report_outcome(
    machine: &SessionMachine,
    outcome: SessionOutcome,
    collaborators: &SessionCollaborators,
) {
    let record = OutcomeRecord {
        session_id: machine.session_id().to_string(),
        initiator_id: machine.initiator().user_id.clone(),
        outcome,
        recorded_at: Utc::now(),
    };
    if let Err(error) = collaborators.reporter.report(&record).await {
        let chain = format!("{error:#}");
        tracing::error!(
            event = "session.report_failed",
            session_id = %machine.session_id(),
            outcome = outcome.as_str(),
            error = %chain,
            "outcome report failed"
        );
        surface_failure(machine, collaborators).await;
    }
}

async fn surface_failure(machine: &SessionMachine, collaborators: &SessionCollaborators) {
    if let Err(error) = collaborators.renderer.notify(FAILURE_NOTICE).await {
        let chain = format!("{error:#}");
        tracing::warn!(
            session_id = %machine.session_id(),
            error = %chain,
            "failure notice could not be delivered"
        );
    }
}
