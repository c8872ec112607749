// Context resolver for command eligibility
//
// Determines the effective set of commands for the current usage context
// (e.g., "workflows", "tables"). Global commands are always eligible;
// tagged commands only when one of their tags is the current context.

use crate::voice_commands::matcher::normalize;
use crate::voice_commands::registry::VoiceCommand;
use std::collections::HashSet;

/// Resolves effective commands based on the active context
#[derive(Debug, Clone)]
pub struct ContextResolver {
    /// Also accept commands whose name and the context contain one another
    legacy_name_match: bool,
}

impl Default for ContextResolver {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ContextResolver {
    /// Create a new context resolver
    pub fn new(legacy_name_match: bool) -> Self {
        Self { legacy_name_match }
    }

    /// Check whether a single command is eligible in `current_context`
    ///
    /// - no tags: global, always eligible
    /// - tags: eligible when a tag equals the context (case-sensitive)
    /// - legacy: eligible when name and context contain one another
    ///   (case-insensitive, non-empty context only)
    pub fn is_eligible(&self, command: &VoiceCommand, current_context: &str) -> bool {
        if command.is_global() {
            return true;
        }

        if command.context_tags.iter().any(|tag| tag == current_context) {
            return true;
        }

        if self.legacy_name_match {
            let context = normalize(current_context);
            if !context.is_empty() {
                let name = normalize(&command.name);
                return name.contains(&context) || context.contains(&name);
            }
        }

        false
    }

    /// Get the effective commands for `current_context`
    ///
    /// `global_commands` come first, then eligible registry commands. The
    /// result is de-duplicated by normalized name (first occurrence wins)
    /// and stable-sorted by descending priority. De-duplication runs before
    /// the sort, so a global always shadows a same-named registry command
    /// whatever its priority.
    pub fn eligible(
        &self,
        commands: &[VoiceCommand],
        current_context: &str,
        global_commands: &[VoiceCommand],
    ) -> Vec<VoiceCommand> {
        let mut seen = HashSet::new();

        let mut effective: Vec<VoiceCommand> = global_commands
            .iter()
            .chain(
                commands
                    .iter()
                    .filter(|cmd| self.is_eligible(cmd, current_context)),
            )
            .filter(|cmd| {
                let first = seen.insert(normalize(&cmd.name));
                if !first {
                    crate::debug!(
                        "[ContextResolver] '{}' hidden by an earlier command of the same name",
                        cmd.name
                    );
                }
                first
            })
            .cloned()
            .collect();

        // sort_by is stable: equal priorities keep their input order
        effective.sort_by(|a, b| b.priority.cmp(&a.priority));

        crate::trace!(
            "[ContextResolver] {} of {} commands eligible in '{}'",
            effective.len(),
            commands.len() + global_commands.len(),
            current_context
        );

        effective
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
