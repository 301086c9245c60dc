//! Audio notification dispatch with ranked provider fallback.
//!
//! Providers are ordered at construction and never reordered. `speak`
//! picks the first available provider and invokes it exactly once; an
//! invocation failure is logged and swallowed, never retried on a
//! lower-ranked provider. A missed announcement must not fail the hook.

pub mod classify;
pub mod provider;

pub use classify::Urgency;
pub use provider::{CommandProvider, Provider};

use crate::config::{Config, NotifyConfig, Phrases};
use crate::identity::Identity;
use serde::Serialize;

/// Placeholder in phrase templates replaced with the display name.
const ENGINEER_PLACEHOLDER: &str = "{engineer}";

pub struct Dispatcher {
    providers: Vec<Box<dyn Provider>>,
    display_name: String,
    /// Report availability on stderr instead of speaking.
    debug: bool,
    phrases: Phrases,
    indicators: NotifyConfig,
}

/// Which providers were available and which one `speak` would pick.
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub providers: Vec<ProviderStatus>,
    pub chosen: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProviderStatus {
    pub name: String,
    pub rank: usize,
    pub available: bool,
}

impl Dispatcher {
    pub fn from_config(config: &Config, identity: &Identity) -> Self {
        let providers = config
            .tts
            .providers
            .iter()
            .map(|p| Box::new(CommandProvider::from_config(p)) as Box<dyn Provider>)
            .collect();
        Self {
            providers,
            display_name: identity.display_name().to_string(),
            debug: identity.debug_notifications,
            phrases: config.phrases.clone(),
            indicators: config.notify.clone(),
        }
    }

    /// Classify the notification text and speak the phrase configured
    /// for its urgency class.
    pub fn notify(&self, message: &str, title: &str) {
        let urgency = classify::classify(&format!("{title} {message}"), &self.indicators);
        log::debug!("notification classified as {urgency:?}");
        let phrase = self.phrase(urgency).to_string();
        self.speak(&phrase);
    }

    /// Personalize and speak one line through the first available
    /// provider. Never propagates failure.
    pub fn speak(&self, text: &str) {
        let spoken = self.personalize(text);

        if self.debug {
            let report = self.probe();
            if let Ok(line) = serde_json::to_string(&report) {
                eprintln!("{line}");
            }
            log::debug!("debug mode, suppressed announcement: {spoken}");
            return;
        }

        let Some(provider) = self.providers.iter().find(|p| p.available()) else {
            log::warn!("no notification provider available");
            return;
        };
        log::info!("speaking via {}", provider.name());
        if let Err(e) = provider.invoke(&spoken) {
            log::warn!("provider {} failed: {e}", provider.name());
        }
    }

    /// Availability of every provider in rank order, plus the one
    /// `speak` would choose.
    pub fn probe(&self) -> ProbeReport {
        let providers: Vec<ProviderStatus> = self
            .providers
            .iter()
            .enumerate()
            .map(|(rank, p)| ProviderStatus {
                name: p.name().to_string(),
                rank,
                available: p.available(),
            })
            .collect();
        let chosen = providers
            .iter()
            .find(|status| status.available)
            .map(|status| status.name.clone());
        ProbeReport { providers, chosen }
    }

    fn phrase(&self, urgency: Urgency) -> &str {
        match urgency {
            Urgency::Input => &self.phrases.input,
            Urgency::Problem => &self.phrases.problem,
            Urgency::Completion => &self.phrases.completion,
            Urgency::Other => &self.phrases.fallback,
        }
    }

    fn personalize(&self, text: &str) -> String {
        text.replace(ENGINEER_PLACEHOLDER, &self.display_name)
    }
}
