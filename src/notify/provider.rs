//! Voice provider capability: availability flag plus one-shot invoke.

use crate::config::ProviderConfig;
use crate::identity;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// One notification backend. Rank is list position in the dispatcher;
/// descriptors are built once at startup and never adjusted afterward.
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;
    fn available(&self) -> bool;
    /// One blocking invocation. The dispatcher never retries a failed
    /// invocation on a lower-ranked provider.
    fn invoke(&self, text: &str) -> io::Result<()>;
}

/// Provider that shells out to a configured argv with the spoken text
/// appended as the final argument. Cloud credentials reach the child
/// through the process environment, already populated from `.env` at
/// startup.
pub struct CommandProvider {
    name: String,
    command: Vec<String>,
    available: bool,
}

impl CommandProvider {
    /// Availability is settled here, once: a provider with a credential
    /// requirement needs the credential present and its command on
    /// PATH; one without is a terminal fallback and always reports
    /// available.
    pub fn from_config(config: &ProviderConfig) -> Self {
        let available = match &config.key_env {
            None => true,
            Some(key) => {
                identity::credential(key).is_some()
                    && config.command.first().is_some_and(|bin| binary_resolves(bin))
            }
        };
        Self {
            name: config.name.clone(),
            command: config.command.clone(),
            available,
        }
    }
}

impl Provider for CommandProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn available(&self) -> bool {
        self.available
    }

    fn invoke(&self, text: &str) -> io::Result<()> {
        let Some((bin, args)) = self.command.split_first() else {
            return Err(io::Error::other(format!(
                "provider {} has no command configured",
                self.name
            )));
        };
        let status = Command::new(bin)
            .args(args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "provider {} exited with {status}",
                self.name
            )))
        }
    }
}

/// PATH lookup for bare command names; paths with a separator are
/// checked directly.
fn binary_resolves(bin: &str) -> bool {
    if bin.contains('/') {
        return Path::new(bin).is_file();
    }
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| dir.join(bin).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str, key_env: Option<&str>, command: &[&str]) -> ProviderConfig {
        ProviderConfig {
            name: name.to_string(),
            key_env: key_env.map(str::to_string),
            command: command.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn credential_less_provider_always_available() {
        let provider = CommandProvider::from_config(&config("offline", None, &["espeak"]));
        assert!(provider.available());
    }

    #[test]
    fn missing_credential_makes_provider_unavailable() {
        let provider = CommandProvider::from_config(&config(
            "cloud",
            Some("CC_HOOKKIT_TEST_KEY_THAT_IS_NEVER_SET"),
            &["sh"],
        ));
        assert!(!provider.available());
    }

    #[test]
    fn invoke_with_empty_command_errors() {
        let provider = CommandProvider::from_config(&config("broken", None, &[]));
        assert!(provider.invoke("hello").is_err());
    }

    #[test]
    fn invoke_missing_binary_errors() {
        let provider = CommandProvider::from_config(&config(
            "ghost",
            None,
            &["cc-hookkit-no-such-binary"],
        ));
        assert!(provider.invoke("hello").is_err());
    }

    #[test]
    fn binary_resolution() {
        assert!(binary_resolves("sh"));
        assert!(!binary_resolves("cc-hookkit-no-such-binary"));
        assert!(!binary_resolves("./no/such/relative/path"));
    }
}
