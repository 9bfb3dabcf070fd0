//! Manifest document types, as written in `.cappuccino.yml`

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// Root manifest (`.cappuccino.yml` at the repository root)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Engine identifier, informational only
    #[serde(default)]
    pub engine: String,

    /// Manifest version shown to the user and checked against the engine version
    #[serde(default, alias = "schemaVersion", deserialize_with = "scalar_string")]
    pub version: String,

    /// Actions in execution order
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// A named group of content entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Action {
    /// Display label
    #[serde(default)]
    pub name: String,

    /// Default type for entries that do not declare their own
    #[serde(default, rename = "type", alias = "defaultType")]
    pub default_type: String,

    /// Entries in execution order
    #[serde(default)]
    pub content: Vec<ContentEntry>,
}

/// A single declared operation; which fields matter depends on the resolved type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Overrides the action's default type when non-empty
    #[serde(default, rename = "type")]
    pub kind: String,

    /// Command line for `exec`
    #[serde(default)]
    pub command: String,

    /// Source file for `copy` and `move`
    #[serde(default)]
    pub source: String,

    /// Destination file for `copy` and `move`
    #[serde(default)]
    pub destination: String,

    /// Target for `delete` and `template`; optional scope for `replace` and `substitute`
    #[serde(default)]
    pub path: String,

    /// Variable name for `substitute` (fallback search text for `replace`)
    #[serde(default, deserialize_with = "scalar_string")]
    pub variable: String,

    /// Literal search text for `replace`
    #[serde(default, deserialize_with = "scalar_string")]
    pub text: String,

    /// Replacement value for `replace` and `substitute`
    #[serde(default, deserialize_with = "scalar_string")]
    pub value: String,

    /// Spaces prepended to every line but the first of a multi-line value
    #[serde(default)]
    pub indent: Option<usize>,
}

impl ContentEntry {
    /// Entry type if set, otherwise the owning action's default type
    pub fn resolved_type<'a>(&'a self, action: &'a Action) -> &'a str {
        if self.kind.is_empty() {
            &action.default_type
        } else {
            &self.kind
        }
    }
}

/// Accepts any YAML scalar where a string is expected, so `value: 8080` or
/// `version: 1.2` read the way they are written
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(_) => Err(D::Error::custom("expected a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
engine: cappuccino
version: 0.2.0
actions:
  - name: Install dependencies
    type: exec
    content:
      - command: npm install
      - type: copy
        source: .env.example
        destination: .env
  - name: Configure
    content:
      - type: substitute
        variable: project
        value: demo
        indent: 2
"#;

    #[test]
    fn test_parse_sample_manifest() {
        let manifest: Manifest = serde_yaml::from_str(SAMPLE).unwrap();

        assert_eq!(manifest.engine, "cappuccino");
        assert_eq!(manifest.version, "0.2.0");
        assert_eq!(manifest.actions.len(), 2);
        assert_eq!(manifest.actions[0].default_type, "exec");
        assert_eq!(manifest.actions[0].content[0].command, "npm install");
        assert_eq!(manifest.actions[1].content[0].indent, Some(2));
        assert_eq!(manifest.actions[1].content[0].path, "");
    }

    #[test]
    fn test_entry_type_overrides_action_type() {
        let manifest: Manifest = serde_yaml::from_str(SAMPLE).unwrap();
        let action = &manifest.actions[0];

        assert_eq!(action.content[0].resolved_type(action), "exec");
        assert_eq!(action.content[1].resolved_type(action), "copy");
    }

    #[test]
    fn test_schema_version_alias() {
        let manifest: Manifest =
            serde_yaml::from_str("engine: x\nschemaVersion: '1.0'\nactions: []\n").unwrap();
        assert_eq!(manifest.version, "1.0");
    }

    #[test]
    fn test_numeric_scalars_read_as_strings() {
        let manifest: Manifest = serde_yaml::from_str(
            "version: 2\nactions:\n  - content:\n      - type: replace\n        text: PORT\n        value: 8080\n",
        )
        .unwrap();

        assert_eq!(manifest.version, "2");
        assert_eq!(manifest.actions[0].content[0].value, "8080");
    }

    #[test]
    fn test_empty_document_fields_default() {
        let manifest: Manifest = serde_yaml::from_str("engine: x").unwrap();
        assert!(manifest.actions.is_empty());
        assert!(manifest.version.is_empty());
    }
}
