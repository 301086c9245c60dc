//! Pre-execution command safety gate.
//!
//! Pure pattern matching over normalized command text; no shell grammar
//! parsing. The policy is deliberately conservative: a force+recursive
//! delete is blocked no matter what it targets, because force makes the
//! deletion unrecoverable. Recursive-only deletes are blocked only
//! against protected paths.

use crate::config::GateConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verdict {
    Allow,
    Block,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Allow => "ALLOW",
            Verdict::Block => "BLOCK",
        }
    }

    /// The host's permission vocabulary for this verdict.
    pub fn permission_decision(self) -> &'static str {
        match self {
            Verdict::Allow => "allow",
            Verdict::Block => "deny",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GateMatch {
    pub verdict: Verdict,
    pub reason: String,
}

/// Flags and targets of one delete-command occurrence.
#[derive(Debug, Default)]
struct DeleteInvocation {
    recursive: bool,
    force: bool,
    targets: Vec<String>,
}

pub struct Gate {
    delete_commands: Vec<String>,
    protected_paths: Vec<String>,
}

impl Gate {
    pub fn from_config(config: &GateConfig) -> Self {
        // Matching happens over lowercased text, so fold the lists too.
        Self {
            delete_commands: config
                .delete_commands
                .iter()
                .map(|c| c.to_lowercase())
                .collect(),
            protected_paths: config
                .protected_paths
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        }
    }

    /// Evaluate one command string. Pure, deterministic, no I/O.
    ///
    /// Every occurrence of a delete command in the text is checked, so
    /// compound commands (`cd /tmp && rm -rf /`) are caught without any
    /// dedicated compound handling.
    pub fn evaluate(&self, command: &str) -> GateMatch {
        let normalized = normalize(command);
        let words = tokenize(&normalized);

        for (i, word) in words.iter().enumerate() {
            if !self.delete_commands.iter().any(|c| c == word) {
                continue;
            }
            let inv = parse_invocation(&words[i + 1..]);

            if inv.recursive && inv.force {
                return GateMatch {
                    verdict: Verdict::Block,
                    reason: format!("{word} with combined force and recursive flags"),
                };
            }

            if inv.recursive
                && let Some(target) = inv.targets.iter().find(|t| self.is_protected(t))
            {
                return GateMatch {
                    verdict: Verdict::Block,
                    reason: format!("recursive {word} against protected path {target}"),
                };
            }
        }

        GateMatch {
            verdict: Verdict::Allow,
            reason: "no destructive deletion pattern".into(),
        }
    }

    /// Protected targets: filesystem root, configured system prefixes
    /// (and anything beneath them), and unexpanded home or variable
    /// references. Root is special-cased in code — a "/" list entry
    /// would prefix-match every absolute path.
    fn is_protected(&self, target: &str) -> bool {
        if target == "/" || target == "/*" {
            return true;
        }
        if target == "~" || target.starts_with("~/") {
            return true;
        }
        if target.starts_with('$') || target.contains("$home") {
            return true;
        }
        self.protected_paths.iter().any(|p| {
            target == p
                || target
                    .strip_prefix(p.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

/// Collapse internal whitespace and lowercase, so flag spelling and
/// spacing variants all reduce to one form.
fn normalize(command: &str) -> String {
    command
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Tokenize into words using shlex (POSIX word splitting).
fn tokenize(command: &str) -> Vec<String> {
    shlex::split(command).unwrap_or_else(|| {
        // Fallback: simple whitespace splitting if shlex can't parse
        command.split_whitespace().map(String::from).collect()
    })
}

fn is_operator(word: &str) -> bool {
    matches!(word, "&&" | "||" | ";" | "|" | "|&")
}

/// Collect flags and targets following a delete command, up to the next
/// shell operator token. Combined short flags (`-rf`, `-fr`, `-rfv`)
/// count for each contained letter; `-r -f` in either order and the
/// long spellings are equivalent.
fn parse_invocation(words: &[String]) -> DeleteInvocation {
    let mut inv = DeleteInvocation::default();
    for word in words {
        if is_operator(word) {
            break;
        }
        if let Some(long) = word.strip_prefix("--") {
            match long {
                "recursive" => inv.recursive = true,
                "force" => inv.force = true,
                _ => {}
            }
        } else if let Some(short) = word.strip_prefix('-') {
            if !short.is_empty() && short.chars().all(|c| c.is_ascii_alphanumeric()) {
                if short.contains('r') {
                    inv.recursive = true;
                }
                if short.contains('f') {
                    inv.force = true;
                }
            }
        } else {
            inv.targets.push(word.clone());
        }
    }
    inv
}
