//! The host settings document and the pure merge over it.
//!
//! `merge` reconciles a distributed document into whatever the user
//! already has without dropping anything of theirs: permission sets
//! union, keyed sections (hooks, MCP servers, unknown fields) keep the
//! existing entry on conflict. The function touches no filesystem;
//! backup-then-write lives with the caller in `install`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// One host settings document. Permission entries are ordered sets, so
/// uniqueness and lexicographic order hold by construction. Hook and
/// server descriptors are opaque JSON to this crate. Top-level fields
/// we do not model round-trip through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SettingsDoc {
    #[serde(default, skip_serializing_if = "Permissions::is_empty")]
    pub permissions: Permissions,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub hooks: BTreeMap<String, Value>,
    #[serde(rename = "statusLine", default, skip_serializing_if = "Option::is_none")]
    pub status_line: Option<Value>,
    #[serde(rename = "mcpServers", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mcp_servers: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Permissions {
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub allow: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub deny: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub ask: BTreeSet<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Permissions {
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.deny.is_empty() && self.ask.is_empty() && self.extra.is_empty()
    }
}

/// Merge `incoming` into `existing`, returning the reconciled document.
///
/// - absent existing: the result is `incoming` unchanged
/// - permission sets: union
/// - hooks / mcpServers / unknown fields: inserted only where the key
///   is absent; an existing entry always wins since it may carry user
///   customization
/// - statusLine: taken from incoming only when existing has none
///
/// Merging the same incoming a second time changes nothing.
pub fn merge(existing: Option<SettingsDoc>, incoming: SettingsDoc) -> SettingsDoc {
    let Some(mut doc) = existing else {
        return incoming;
    };

    doc.permissions.allow.extend(incoming.permissions.allow);
    doc.permissions.deny.extend(incoming.permissions.deny);
    doc.permissions.ask.extend(incoming.permissions.ask);
    for (key, value) in incoming.permissions.extra {
        doc.permissions.extra.entry(key).or_insert(value);
    }

    for (key, value) in incoming.hooks {
        doc.hooks.entry(key).or_insert(value);
    }
    if doc.status_line.is_none() {
        doc.status_line = incoming.status_line;
    }
    for (key, value) in incoming.mcp_servers {
        doc.mcp_servers.entry(key).or_insert(value);
    }
    for (key, value) in incoming.extra {
        doc.extra.entry(key).or_insert(value);
    }

    doc
}
