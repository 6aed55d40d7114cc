//! Recording collaborator doubles for tests and examples.

use std::sync::Mutex as StdMutex;

use async_trait::async_trait;

use muster_core::{ActivityMetadata, Roster, SelectionSnapshot};

use crate::collaborators::{GroupAnnouncer, OutcomeRecord, OutcomeReporter, PromptRenderer};

fn lock<T>(mutex: &StdMutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Captures every render and notify call.
#[derive(Default)]
pub struct RecordingRenderer {
    renders: StdMutex<Vec<(String, SelectionSnapshot)>>,
    notices: StdMutex<Vec<String>>,
}

impl RecordingRenderer {
    /// All `(prompt, snapshot)` pairs seen so far.
    pub fn renders(&self) -> Vec<(String, SelectionSnapshot)> {
        lock(&self.renders).clone()
    }

    /// All notices seen so far.
    pub fn notices(&self) -> Vec<String> {
        lock(&self.notices).clone()
    }
}

#[async_trait]
impl PromptRenderer for RecordingRenderer {
    async fn render(&self, prompt: &str, snapshot: &SelectionSnapshot) -> anyhow::Result<()> {
        lock(&self.renders).push((prompt.to_string(), snapshot.clone()));
        Ok(())
    }

    async fn notify(&self, notice: &str) -> anyhow::Result<()> {
        lock(&self.notices).push(notice.to_string());
        Ok(())
    }
}

/// Captures announce calls; optionally fails every call.
#[derive(Default)]
pub struct RecordingAnnouncer {
    announcements: StdMutex<Vec<(Roster, ActivityMetadata)>>,
    fail: bool,
}

impl RecordingAnnouncer {
    /// A double whose `announce` always fails.
    pub fn failing() -> Self {
        Self {
            announcements: StdMutex::new(Vec::new()),
            fail: true,
        }
    }

    /// All `(roster, metadata)` pairs seen so far.
    pub fn announcements(&self) -> Vec<(Roster, ActivityMetadata)> {
        lock(&self.announcements).clone()
    }
}

#[async_trait]
impl GroupAnnouncer for RecordingAnnouncer {
    async fn announce(&self, roster: &Roster, metadata: &ActivityMetadata) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("announcer offline");
        }
        lock(&self.announcements).push((roster.clone(), metadata.clone()));
        Ok(())
    }
}

/// Captures outcome reports.
#[derive(Default)]
pub struct RecordingReporter {
    records: StdMutex<Vec<OutcomeRecord>>,
}

impl RecordingReporter {
    /// All records seen so far.
    pub fn records(&self) -> Vec<OutcomeRecord> {
        lock(&self.records).clone()
    }
}

#[async_trait]
impl OutcomeReporter for RecordingReporter {
    async fn report(&self, record: &OutcomeRecord) -> anyhow::Result<()> {
        lock(&self.records).push(record.clone());
        Ok(())
    }
}
