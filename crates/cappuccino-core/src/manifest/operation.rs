//! Validated operations built from raw manifest entries
//!
//! Each [`ContentEntry`] is checked once, before anything runs, and turned into
//! an [`Operation`] that carries only the fields its kind needs. A manifest that
//! fails validation never touches the working tree.

use super::model::{Action, ContentEntry, Manifest};
use crate::error::{EngineError, Result};
use crate::{TEMPLATE_DIR, VARIABLE_PREFIX};
use std::fmt;
use std::path::PathBuf;

/// Where a substitution looks for its marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// A single file, relative to the working tree root
    File(PathBuf),
    /// Every regular file under the working tree root
    Tree,
}

/// One executable step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Run a command from the working tree root
    Exec {
        command: String,
    },
    /// Copy `source` to `destination`
    Copy {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Copy from the template staging directory onto the same relative path
    Template {
        path: PathBuf,
    },
    /// Copy then delete the source
    Move {
        source: PathBuf,
        destination: PathBuf,
    },
    Delete {
        path: PathBuf,
    },
    /// Covers both `replace` (literal marker) and `substitute` (framed marker)
    Substitute {
        scope: Scope,
        marker: String,
        value: String,
        indent: Option<usize>,
    },
    /// Type with no handler; executes as a no-op
    Unrecognized {
        kind: String,
    },
}

impl Operation {
    /// Validate one entry against its resolved type
    pub fn from_entry(action: &Action, entry: &ContentEntry) -> std::result::Result<Self, String> {
        let kind = entry.resolved_type(action);

        let operation = match kind {
            "exec" => Operation::Exec {
                command: required(&entry.command, "command")?.trim().to_string(),
            },
            "copy" => Operation::Copy {
                source: required(&entry.source, "source")?.into(),
                destination: required(&entry.destination, "destination")?.into(),
            },
            "move" => Operation::Move {
                source: required(&entry.source, "source")?.into(),
                destination: required(&entry.destination, "destination")?.into(),
            },
            "template" => Operation::Template {
                path: required(&entry.path, "path")?.into(),
            },
            "delete" => Operation::Delete {
                path: required(&entry.path, "path")?.into(),
            },
            "replace" => {
                let text = if entry.text.is_empty() {
                    &entry.variable
                } else {
                    &entry.text
                };
                Operation::Substitute {
                    scope: Scope::from_path(&entry.path),
                    marker: required(text, "text")?.to_string(),
                    value: entry.value.trim().to_string(),
                    indent: entry.indent,
                }
            }
            "substitute" => Operation::Substitute {
                scope: Scope::from_path(&entry.path),
                marker: variable_marker(required(&entry.variable, "variable")?),
                value: entry.value.trim().to_string(),
                indent: entry.indent,
            },
            other => Operation::Unrecognized {
                kind: other.to_string(),
            },
        };

        Ok(operation)
    }

    /// Source file of a template entry
    pub fn template_source(path: &std::path::Path) -> PathBuf {
        PathBuf::from(TEMPLATE_DIR).join(path)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Exec { command } => write!(f, "{}", command),
            Operation::Copy {
                source,
                destination,
            }
            | Operation::Move {
                source,
                destination,
            } => write!(f, "{} -> {}", source.display(), destination.display()),
            Operation::Template { path } => write!(
                f,
                "{} -> {}",
                Operation::template_source(path).display(),
                path.display()
            ),
            Operation::Delete { path } => write!(f, "{}", path.display()),
            Operation::Substitute { scope, marker, .. } => match scope {
                Scope::File(path) => write!(f, "{} in {}", marker, path.display()),
                Scope::Tree => write!(f, "{} in all files", marker),
            },
            Operation::Unrecognized { kind } => write!(f, "unrecognized type '{}', skipped", kind),
        }
    }
}

impl Scope {
    fn from_path(path: &str) -> Self {
        if path.is_empty() {
            Scope::Tree
        } else {
            Scope::File(PathBuf::from(path))
        }
    }
}

/// Framed marker searched for by `substitute`, e.g. `[cappuccino-var-name]`
pub fn variable_marker(variable: &str) -> String {
    format!("[{}-{}]", VARIABLE_PREFIX, variable)
}

fn required<'a>(value: &'a str, field: &str) -> std::result::Result<&'a str, String> {
    if value.trim().is_empty() {
        Err(format!("missing '{}'", field))
    } else {
        Ok(value)
    }
}

/// A named, ordered group of validated operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Action name, reported before its operations run
    pub name: String,
    /// Operations in manifest order
    pub operations: Vec<Operation>,
}

/// Validated form of a manifest, ready to execute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Actions in manifest order
    pub steps: Vec<Step>,
}

impl Plan {
    /// Total operations across all steps
    pub fn operation_count(&self) -> usize {
        self.steps.iter().map(|step| step.operations.len()).sum()
    }
}

impl Manifest {
    /// Validate every entry, in manifest order, without touching the filesystem
    pub fn plan(&self) -> Result<Plan> {
        let steps = self
            .actions
            .iter()
            .map(|action| -> Result<Step> {
                let operations = action
                    .content
                    .iter()
                    .enumerate()
                    .map(|(idx, entry)| {
                        Operation::from_entry(action, entry).map_err(|reason| {
                            EngineError::InvalidEntry {
                                action: action.name.clone(),
                                entry: idx + 1,
                                reason,
                            }
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Step {
                    name: action.name.clone(),
                    operations,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Plan { steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(default_type: &str, content: Vec<ContentEntry>) -> Action {
        Action {
            name: "Setup".to_string(),
            default_type: default_type.to_string(),
            content,
        }
    }

    fn entry(kind: &str) -> ContentEntry {
        ContentEntry {
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_exec_inherits_action_type() {
        let e = ContentEntry {
            command: "npm install".to_string(),
            ..Default::default()
        };
        let op = Operation::from_entry(&action("exec", vec![]), &e).unwrap();
        assert_eq!(
            op,
            Operation::Exec {
                command: "npm install".to_string()
            }
        );
    }

    #[test]
    fn test_substitute_frames_variable() {
        let e = ContentEntry {
            variable: "name".to_string(),
            value: "  demo\n".to_string(),
            indent: Some(4),
            ..entry("substitute")
        };
        let op = Operation::from_entry(&action("", vec![]), &e).unwrap();
        assert_eq!(
            op,
            Operation::Substitute {
                scope: Scope::Tree,
                marker: "[cappuccino-var-name]".to_string(),
                value: "demo".to_string(),
                indent: Some(4),
            }
        );
    }

    #[test]
    fn test_replace_uses_text_verbatim() {
        let e = ContentEntry {
            text: "__NAME__".to_string(),
            variable: "ignored".to_string(),
            path: "README.md".to_string(),
            value: "demo".to_string(),
            ..entry("replace")
        };
        let op = Operation::from_entry(&action("", vec![]), &e).unwrap();
        assert_eq!(
            op,
            Operation::Substitute {
                scope: Scope::File(PathBuf::from("README.md")),
                marker: "__NAME__".to_string(),
                value: "demo".to_string(),
                indent: None,
            }
        );
    }

    #[test]
    fn test_replace_falls_back_to_variable() {
        let e = ContentEntry {
            variable: "__NAME__".to_string(),
            ..entry("replace")
        };
        match Operation::from_entry(&action("", vec![]), &e).unwrap() {
            Operation::Substitute { marker, .. } => assert_eq!(marker, "__NAME__"),
            other => panic!("unexpected operation: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_unrecognized() {
        let op = Operation::from_entry(&action("", vec![]), &entry("frobnicate")).unwrap();
        assert_eq!(
            op,
            Operation::Unrecognized {
                kind: "frobnicate".to_string()
            }
        );
    }

    #[test]
    fn test_missing_type_is_unrecognized() {
        let op = Operation::from_entry(&action("", vec![]), &entry("")).unwrap();
        assert_eq!(op, Operation::Unrecognized { kind: String::new() });
    }

    #[test]
    fn test_missing_required_fields() {
        let a = action("", vec![]);
        assert_eq!(
            Operation::from_entry(&a, &entry("exec")).unwrap_err(),
            "missing 'command'"
        );
        let copy = ContentEntry {
            source: "a".to_string(),
            ..entry("copy")
        };
        assert_eq!(
            Operation::from_entry(&a, &copy).unwrap_err(),
            "missing 'destination'"
        );
        assert_eq!(
            Operation::from_entry(&a, &entry("substitute")).unwrap_err(),
            "missing 'variable'"
        );
        assert_eq!(
            Operation::from_entry(&a, &entry("delete")).unwrap_err(),
            "missing 'path'"
        );
    }

    #[test]
    fn test_plan_reports_entry_position() {
        let manifest = Manifest {
            actions: vec![action(
                "exec",
                vec![
                    ContentEntry {
                        command: "true".to_string(),
                        ..Default::default()
                    },
                    ContentEntry::default(),
                ],
            )],
            ..Default::default()
        };

        match manifest.plan().unwrap_err() {
            EngineError::InvalidEntry { action, entry, .. } => {
                assert_eq!(action, "Setup");
                assert_eq!(entry, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_plan_preserves_order() {
        let manifest = Manifest {
            actions: vec![
                action("delete", vec![ContentEntry { path: "a".into(), ..Default::default() }]),
                action(
                    "",
                    vec![
                        ContentEntry { path: "b".into(), ..entry("template") },
                        ContentEntry { command: "ls".into(), ..entry("exec") },
                    ],
                ),
            ],
            ..Default::default()
        };

        let plan = manifest.plan().unwrap();
        assert_eq!(plan.operation_count(), 3);
        assert_eq!(plan.steps[0].operations[0], Operation::Delete { path: "a".into() });
        assert_eq!(plan.steps[1].operations[0], Operation::Template { path: "b".into() });
        assert_eq!(
            plan.steps[1].operations[1],
            Operation::Exec { command: "ls".into() }
        );
    }

    #[test]
    fn test_display_lines() {
        let template = Operation::Template { path: "config/app.yml".into() };
        assert_eq!(
            template.to_string(),
            ".cappuccino/config/app.yml -> config/app.yml"
        );
        let tree = Operation::Substitute {
            scope: Scope::Tree,
            marker: "X".into(),
            value: "Y".into(),
            indent: None,
        };
        assert_eq!(tree.to_string(), "X in all files");
    }
}
