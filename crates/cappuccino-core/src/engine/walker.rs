use super::{Engine, Outcome};
use crate::error::Result;
use crate::manifest::Plan;
use crate::report::Status;
use crate::runtime::git;

/// Counts for a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Operations that ran to completion
    pub completed: usize,
    /// Operations skipped as unrecognized or with no marker match
    pub skipped: usize,
}

impl Engine<'_> {
    /// Remove the git metadata, then run every operation of `plan` in order.
    ///
    /// The first failing operation ends the run; nothing after it executes and
    /// nothing before it is undone.
    pub async fn execute(&self, plan: &Plan) -> Result<RunSummary> {
        self.reporter.info("Starting execution of actions");

        self.reporter
            .report(Status::Action, "Removing existing .git folder");
        git::remove_vcs_metadata(&self.root).await?;

        let mut summary = RunSummary::default();

        for step in &plan.steps {
            self.reporter.report(Status::Action, &step.name);

            for operation in &step.operations {
                match self.dispatch(operation).await? {
                    Outcome::Completed => summary.completed += 1,
                    Outcome::Skipped(_) => summary.skipped += 1,
                }
            }
        }

        Ok(summary)
    }
}
