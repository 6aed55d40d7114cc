//! Example: drive one formation session end to end with stdout collaborators.
//!
//! Settings are optional: point `MUSTER_SETTINGS` at a YAML file to override
//! the idle timeout or the damage-pool capacity.
//!
//! Run: `cargo run -p muster-session --example local_party`

use std::sync::Arc;

use async_trait::async_trait;

use muster_core::{
    ActivityMetadata, DifficultyBand, Objective, Participant, RequirementTag, RoleId, Roster,
    SelectionSnapshot,
};
use muster_session::{
    CompositionChoice, EventKind, GroupAnnouncer, InboundEvent, OpenSessionRequest,
    OutcomeRecord, OutcomeReporter, PromptRenderer, SessionCollaborators, SessionCoordinator,
    load_runtime_settings_from_env,
};

struct StdoutRenderer;

#[async_trait]
impl PromptRenderer for StdoutRenderer {
    async fn render(&self, prompt: &str, snapshot: &SelectionSnapshot) -> anyhow::Result<()> {
        println!("prompt: {prompt}");
        println!(
            "  difficulty={:?} own_role={:?} needed={:?} requirements={:?}",
            snapshot.difficulty, snapshot.own_role, snapshot.needed_roles, snapshot.requirements
        );
        Ok(())
    }

    async fn notify(&self, notice: &str) -> anyhow::Result<()> {
        println!("notice: {notice}");
        Ok(())
    }
}

struct StdoutAnnouncer;

#[async_trait]
impl GroupAnnouncer for StdoutAnnouncer {
    async fn announce(&self, roster: &Roster, metadata: &ActivityMetadata) -> anyhow::Result<()> {
        println!(
            "group up for {} ({}):",
            metadata.activity,
            metadata.objective.as_str()
        );
        for slot in roster.slots() {
            let kind = if slot.is_placeholder { "filled" } else { "leader" };
            println!("  {:<8} {} [{kind}]", slot.role.to_string(), slot.display_label);
        }
        Ok(())
    }
}

struct StdoutReporter;

#[async_trait]
impl OutcomeReporter for StdoutReporter {
    async fn report(&self, record: &OutcomeRecord) -> anyhow::Result<()> {
        println!(
            "outcome: session={} initiator={} status={}",
            record.session_id, record.initiator_id, record.outcome
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = load_runtime_settings_from_env()?;
    let catalog = Arc::new(settings.role_catalog()?);
    let collaborators = SessionCollaborators {
        renderer: Arc::new(StdoutRenderer),
        announcer: Arc::new(StdoutAnnouncer),
        reporter: Arc::new(StdoutReporter),
    };
    let (coordinator, mut closed_rx) =
        SessionCoordinator::start(catalog, collaborators, settings.session_runtime_config());

    let ticket = coordinator.open_session(OpenSessionRequest {
        initiator: Participant::new("leader-1", "Keyrunner"),
        metadata: ActivityMetadata::new("Ara-Kara, City of Echoes", Objective::Time),
        band: DifficultyBand::from_channel_name("lfg-m2-m10")?,
    });

    for kind in [
        EventKind::Difficulty(7),
        EventKind::OwnRole(RoleId::from("Tank")),
        EventKind::Composition(CompositionChoice::Roles(
            [RoleId::from("Healer"), RoleId::from("DPS1")]
                .into_iter()
                .collect(),
        )),
        EventKind::Requirements([RequirementTag::Bloodlust].into_iter().collect()),
        EventKind::Confirm,
    ] {
        ticket.events.send(InboundEvent::new("leader-1", kind)).await?;
    }

    if let Some(closed) = closed_rx.recv().await {
        println!("session {} closed: {}", closed.session_id, closed.outcome);
    }
    Ok(())
}
