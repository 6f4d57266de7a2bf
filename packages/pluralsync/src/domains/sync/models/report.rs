use std::fmt;

/// Write step that can fail without aborting the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    UpdateMember,
    SyncFronters,
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStep::UpdateMember => write!(f, "update member"),
            SyncStep::SyncFronters => write!(f, "sync fronters"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub step: SyncStep,
    /// Member name or id the step was working on
    pub subject: String,
    pub error: String,
}

/// Outcome of one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub matched: usize,
    /// Names of eligible source members without a mirror counterpart
    pub unmatched: Vec<String>,
    /// Mirror ids that were updated (or would be, in a dry run)
    pub updated: Vec<String>,
    pub unchanged: usize,
    /// Lineup sent to the mirror, if fronters differed
    pub switch: Option<Vec<String>>,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record_failure(
        &mut self,
        step: SyncStep,
        subject: impl Into<String>,
        error: &anyhow::Error,
    ) {
        self.failures.push(SyncFailure {
            step,
            subject: subject.into(),
            error: format!("{:#}", error),
        });
    }
}
