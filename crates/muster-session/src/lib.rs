//! Formation-session runtime.
//!
//! Typed inbound events, the per-session state machine, the actor loop with
//! its idle-timeout race, and the multi-session coordinator. Rendering,
//! transport, announcement formatting, and outcome persistence live behind
//! the collaborator traits and are implemented elsewhere.

mod collaborators;
mod config;
mod coordinator;
mod events;
mod machine;
mod runtime;
#[doc(hidden)]
pub mod test_support;

pub use collaborators::{GroupAnnouncer, OutcomeRecord, OutcomeReporter, PromptRenderer};
pub use config::{
    CatalogSettings, RuntimeSettings, SETTINGS_PATH_ENV, SessionSettings, load_runtime_settings,
    load_runtime_settings_from_env,
};
pub use coordinator::{OpenSessionRequest, SessionClosed, SessionCoordinator, SessionTicket};
pub use events::{CompositionChoice, EventKind, InboundEvent};
pub use machine::{SessionMachine, SessionOutcome, SessionPhase, Step};
pub use runtime::{
    DEFAULT_IDLE_TIMEOUT_MS, DEFAULT_INBOUND_QUEUE_CAPACITY, SessionCollaborators,
    SessionRuntimeConfig,
};
