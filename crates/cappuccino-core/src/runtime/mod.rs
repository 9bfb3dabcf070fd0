//! External processes: `exec` commands and git

pub mod command;
pub mod git;

pub use command::{run_command, split_command, CommandOutput};
pub use git::{clone_repository, remove_vcs_metadata, verify_git_url};
