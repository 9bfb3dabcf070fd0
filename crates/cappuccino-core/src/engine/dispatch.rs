use super::Engine;
use crate::error::Result;
use crate::fsops;
use crate::manifest::Operation;
use crate::report::Status;
use crate::runtime::command;
use crate::substitute;

/// Result of dispatching one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operation ran to completion
    Completed,
    /// Nothing was done and the run continues
    Skipped(SkipReason),
}

/// Why an operation did nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The resolved type has no handler
    UnrecognizedType(String),
    /// A replace or substitute found no occurrence of its marker
    MarkerNotFound,
}

impl Engine<'_> {
    /// Report the operation, then perform it
    pub async fn dispatch(&self, operation: &Operation) -> Result<Outcome> {
        self.reporter.report(Status::Step, &operation.to_string());

        match operation {
            Operation::Exec { command } => {
                command::run_command(&self.root, command, self.exec_timeout).await?;
            }
            Operation::Copy {
                source,
                destination,
            } => {
                fsops::copy_file(&self.root.join(source), &self.root.join(destination)).await?;
            }
            Operation::Template { path } => {
                let source = Operation::template_source(path);
                fsops::copy_file(&self.root.join(source), &self.root.join(path)).await?;
            }
            Operation::Move {
                source,
                destination,
            } => {
                fsops::move_file(&self.root.join(source), &self.root.join(destination)).await?;
            }
            Operation::Delete { path } => {
                fsops::delete_file(&self.root.join(path)).await?;
            }
            Operation::Substitute {
                scope,
                marker,
                value,
                indent,
            } => {
                let stats = substitute::substitute(&self.root, scope, marker, value, *indent).await?;
                tracing::debug!(
                    marker = %marker,
                    files = stats.files_changed,
                    occurrences = stats.occurrences,
                    "substituted"
                );
                if stats.occurrences == 0 {
                    return Ok(Outcome::Skipped(SkipReason::MarkerNotFound));
                }
            }
            Operation::Unrecognized { kind } => {
                tracing::debug!(kind = %kind, "no handler for type");
                return Ok(Outcome::Skipped(SkipReason::UnrecognizedType(kind.clone())));
            }
        }

        Ok(Outcome::Completed)
    }
}
