//! Translation between tool-specific server entries and the canonical record.
//!
//! Every tool stores MCP servers differently (see [`crate::tools`]). This
//! module is the single place that knows those shapes: [`extract_servers`]
//! normalizes whatever a tool wrote into [`ServerRecord`]s, and
//! [`inject_server`] / [`remove_server`] edit a [`ConfigTree`] in the
//! tool's native shape.
//!
//! Malformed entries (no command, or a command of the wrong type) are
//! silently excluded during extraction. One broken entry must never stop
//! the install-state scan, and the entry stays untouched in the file.

use crate::dialect::ConfigTree;
use crate::tools::ServerSchema;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use toml_edit::{Item, Table, value};

/// Canonical description of a configured MCP server.
///
/// This is what every tool-specific entry shape normalizes to: the
/// executable, its arguments, and environment variables for the spawned
/// process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerRecord {
    /// Executable to spawn
    pub command: String,
    /// Arguments passed to the executable
    pub args: Vec<String>,
    /// Environment variables for the spawned process
    pub env: BTreeMap<String, String>,
}

impl ServerRecord {
    /// Create a record with just a command and args.
    #[must_use]
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self { command: command.into(), args, env: BTreeMap::new() }
    }
}

/// Extract all well-formed server entries from a config tree.
///
/// Returns `(key, record)` pairs in document order. An absent container
/// means no servers. Entries without a usable command are skipped.
#[must_use]
pub fn extract_servers(tree: &ConfigTree, schema: ServerSchema) -> Vec<(String, ServerRecord)> {
    match tree {
        ConfigTree::Object(root) => extract_json(root, schema),
        ConfigTree::Table(doc) => extract_toml(doc, schema),
    }
}

fn extract_json(root: &Value, schema: ServerSchema) -> Vec<(String, ServerRecord)> {
    let Some(container) = root.get(schema.container_key()).and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut servers = Vec::new();
    for (key, entry) in container {
        let Some(entry) = entry.as_object() else { continue };

        let record = match schema {
            ServerSchema::LocalCommandArray => from_local_entry(entry),
            _ => from_standard_entry(entry),
        };

        if let Some(record) = record {
            servers.push((key.clone(), record));
        }
    }
    servers
}

/// Normalize a `{command, args, env}` entry. Entries without a non-empty
/// string command are malformed and yield `None`.
fn from_standard_entry(entry: &Map<String, Value>) -> Option<ServerRecord> {
    let command = entry.get("command")?.as_str()?.trim();
    if command.is_empty() {
        return None;
    }

    Some(ServerRecord {
        command: command.to_string(),
        args: string_array(entry.get("args")),
        env: string_map(entry.get("env")),
    })
}

/// Normalize an OpenCode `{type, command: [..], environment}` entry.
///
/// The command may be an array (`[exe, ...args]`) or, in older configs,
/// a plain string; both are accepted.
fn from_local_entry(entry: &Map<String, Value>) -> Option<ServerRecord> {
    let (command, args) = match entry.get("command")? {
        Value::Array(parts) => {
            let parts: Vec<&str> = parts.iter().filter_map(Value::as_str).collect();
            let (first, rest) = parts.split_first()?;
            (first.to_string(), rest.iter().map(ToString::to_string).collect())
        }
        Value::String(s) => (s.clone(), Vec::new()),
        _ => return None,
    };

    if command.trim().is_empty() {
        return None;
    }

    Some(ServerRecord { command, args, env: string_map(entry.get("environment")) })
}

fn extract_toml(doc: &toml_edit::DocumentMut, schema: ServerSchema) -> Vec<(String, ServerRecord)> {
    let Some(container) = doc.get(schema.container_key()).and_then(Item::as_table) else {
        return Vec::new();
    };

    let mut servers = Vec::new();
    for (key, entry) in container {
        let Some(entry) = entry.as_table_like() else { continue };

        let Some(command) = entry.get("command").and_then(|i| i.as_str()) else { continue };
        if command.trim().is_empty() {
            continue;
        }

        let args = entry
            .get("args")
            .and_then(|i| i.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_str().map(ToString::to_string)).collect())
            .unwrap_or_default();

        let env = entry
            .get("env")
            .and_then(|i| i.as_table_like())
            .map(|t| {
                t.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.to_string(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        servers.push((key.to_string(), ServerRecord { command: command.to_string(), args, env }));
    }
    servers
}

/// Insert or overwrite a server entry under `key`, creating the container
/// if the config has never held one.
pub fn inject_server(tree: &mut ConfigTree, schema: ServerSchema, key: &str, record: &ServerRecord) {
    match tree {
        ConfigTree::Object(root) => inject_json(root, schema, key, record),
        ConfigTree::Table(doc) => inject_toml(doc, schema, key, record),
    }
}

fn inject_json(root: &mut Value, schema: ServerSchema, key: &str, record: &ServerRecord) {
    let entry = match schema {
        ServerSchema::LocalCommandArray => {
            let mut command = vec![record.command.clone()];
            command.extend(record.args.iter().cloned());
            json!({
                "type": "local",
                "command": command,
                "environment": record.env,
            })
        }
        _ => json!({
            "command": record.command,
            "args": record.args,
            "env": record.env,
        }),
    };

    let Some(root) = root.as_object_mut() else { return };
    let container = root
        .entry(schema.container_key().to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    // A container of the wrong type gets replaced; the tool itself would
    // reject it anyway.
    if !container.is_object() {
        *container = Value::Object(Map::new());
    }
    if let Some(container) = container.as_object_mut() {
        container.insert(key.to_string(), entry);
    }
}

fn inject_toml(
    doc: &mut toml_edit::DocumentMut,
    schema: ServerSchema,
    key: &str,
    record: &ServerRecord,
) {
    let container = doc
        .entry(schema.container_key())
        .or_insert_with(|| {
            let mut table = Table::new();
            table.set_implicit(true);
            Item::Table(table)
        });

    if !container.is_table() {
        let mut table = Table::new();
        table.set_implicit(true);
        *container = Item::Table(table);
    }

    let mut entry = Table::new();
    entry["command"] = value(record.command.clone());

    let mut args = toml_edit::Array::new();
    for arg in &record.args {
        args.push(arg.clone());
    }
    entry["args"] = value(args);

    if !record.env.is_empty() {
        let mut env = toml_edit::InlineTable::new();
        for (k, v) in &record.env {
            env.insert(k, v.clone().into());
        }
        entry["env"] = value(env);
    }

    if let Some(container) = container.as_table_mut() {
        container.insert(key, Item::Table(entry));
    }
}

/// Remove a server entry by key. Idempotent: an absent container or key
/// is a no-op returning `false`, letting callers skip the file write.
pub fn remove_server(tree: &mut ConfigTree, schema: ServerSchema, key: &str) -> bool {
    match tree {
        ConfigTree::Object(root) => root
            .get_mut(schema.container_key())
            .and_then(Value::as_object_mut)
            .and_then(|container| container.remove(key))
            .is_some(),
        ConfigTree::Table(doc) => doc
            .get_mut(schema.container_key())
            .and_then(Item::as_table_mut)
            .and_then(|container| container.remove(key))
            .is_some(),
    }
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(|v| v.as_str().map(ToString::to_string)).collect())
        .unwrap_or_default()
}

fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}
