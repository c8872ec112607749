// Voice command registry - holds the commands registered by host pages

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Actions the engine performs itself instead of handing them to the host
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinAction {
    /// Speak the names of the commands eligible in the current context
    ShowHelp,
    /// Stop the recognizer
    StopListening,
    /// Finalize the active training session
    EndTraining,
}

/// Side effect requested when a command matches
///
/// The core never performs host effects directly; it hands them to an
/// `EffectHandler` (see `executor`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Navigate the host to a route (e.g., "/workflows")
    Navigate { path: String },
    /// Show a toast in the host UI
    ShowToast { message: String },
    /// Host-defined effect identified by name
    Custom {
        name: String,
        #[serde(default)]
        parameters: HashMap<String, String>,
    },
    /// Handled by the engine itself
    Builtin { action: BuiltinAction },
    /// Nothing to do beyond the spoken response
    #[default]
    None,
}

/// A voice command definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCommand {
    /// Canonical phrase, unique within the registry (e.g., "create workflow")
    pub name: String,
    /// Human-readable explanation for help listings
    #[serde(default)]
    pub description: String,
    /// Alternate phrasings matched like `name`, plus containment
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Extra phrases only considered while a training session is active
    #[serde(default)]
    pub training_phrases: Vec<String>,
    /// Contexts this command is eligible in; empty means global
    #[serde(default)]
    pub context_tags: Vec<String>,
    /// Higher priority wins when several commands are eligible
    #[serde(default)]
    pub priority: i32,
    /// Effect to run on match
    #[serde(default)]
    pub effect: Effect,
    /// Phrase spoken before the effect runs
    #[serde(default)]
    pub response_text: Option<String>,
}

impl VoiceCommand {
    /// Create a global command with no aliases
    pub fn new(name: impl Into<String>, effect: Effect) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            aliases: Vec::new(),
            training_phrases: Vec::new(),
            context_tags: Vec::new(),
            priority: 0,
            effect,
            response_text: None,
        }
    }

    /// Set the help description (builder pattern)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add alternate phrasings (builder pattern)
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Add training-only phrases (builder pattern)
    pub fn with_training_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.training_phrases
            .extend(phrases.into_iter().map(Into::into));
        self
    }

    /// Scope the command to contexts (builder pattern)
    pub fn with_context_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set the priority (builder pattern)
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the spoken response (builder pattern)
    pub fn with_response(mut self, text: impl Into<String>) -> Self {
        self.response_text = Some(text.into());
        self
    }

    /// Commands without context tags are eligible everywhere
    pub fn is_global(&self) -> bool {
        self.context_tags.is_empty()
    }
}

/// Registry for voice commands
///
/// Keyed by `name` with upsert semantics. A replaced command keeps its
/// original position so resolver tie-breaking stays stable.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    commands: Vec<VoiceCommand>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a command by name
    pub fn register(&mut self, command: VoiceCommand) {
        if command.name.trim().is_empty() {
            crate::warn!("[registry] Registering command with empty name; it can never match exactly");
        }

        match self.commands.iter_mut().find(|c| c.name == command.name) {
            Some(existing) => {
                crate::debug!("[registry] Replacing command '{}'", command.name);
                *existing = command;
            }
            None => {
                crate::debug!("[registry] Registering command '{}'", command.name);
                self.commands.push(command);
            }
        }
    }

    /// Remove a command by name; unknown names are ignored
    pub fn unregister(&mut self, name: &str) {
        let before = self.commands.len();
        self.commands.retain(|c| c.name != name);
        if self.commands.len() == before {
            crate::debug!("[registry] Unregister of unknown command '{}' ignored", name);
        }
    }

    /// Snapshot of all registered commands
    pub fn list(&self) -> Vec<VoiceCommand> {
        self.commands.clone()
    }

    /// Borrow the registered commands without cloning
    pub fn commands(&self) -> &[VoiceCommand] {
        &self.commands
    }

    /// Get a command by name
    pub fn get(&self, name: &str) -> Option<&VoiceCommand> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Get the number of commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
