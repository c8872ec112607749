// Command matcher - resolves an utterance to one of the eligible commands

use crate::constants::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_SUGGESTION_THRESHOLD};
use crate::voice_commands::registry::VoiceCommand;
use serde::Serialize;
use strsim::normalized_levenshtein;

/// Whether a training session is active for this matching pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Name and alias rules only
    Standard,
    /// Additionally training phrases and similarity promotion
    Training,
}

/// Result of matching an utterance against candidate commands
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum MatchResult {
    /// Utterance equals the command name
    Exact { command: VoiceCommand },
    /// Utterance equals, contains, or is contained by an alias
    Alias { command: VoiceCommand, alias: String },
    /// Utterance contains, or is contained by, a training phrase
    TrainingPhrase { command: VoiceCommand, phrase: String },
    /// Word overlap with the name reached the similarity threshold
    Similar { command: VoiceCommand, score: f64 },
    /// No candidate matched
    NoMatch,
}

impl MatchResult {
    /// The matched command, if any
    pub fn command(&self) -> Option<&VoiceCommand> {
        match self {
            MatchResult::Exact { command }
            | MatchResult::Alias { command, .. }
            | MatchResult::TrainingPhrase { command, .. }
            | MatchResult::Similar { command, .. } => Some(command),
            MatchResult::NoMatch => None,
        }
    }

    /// Match strength: 1.0 for rule hits, the overlap score for similar matches
    pub fn score(&self) -> f64 {
        match self {
            MatchResult::Similar { score, .. } => *score,
            MatchResult::NoMatch => 0.0,
            _ => 1.0,
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, MatchResult::NoMatch)
    }
}

/// A "did you mean" candidate for an unrecognized utterance
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Suggestion {
    /// Name of the suggested command
    pub command: String,
    /// The phrase (name or alias) that was closest
    pub phrase: String,
    /// Normalized Levenshtein similarity (0.0 to 1.0)
    pub score: f64,
}

/// Configuration for the matcher
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Word-overlap score that promotes a close utterance during training
    pub similarity_threshold: f64,
    /// Minimum edit-distance similarity for a suggestion
    pub suggestion_threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
        }
    }
}

/// Normalize a phrase for comparison: lowercase and trim whitespace
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Fraction of `target`'s words found among `utterance`'s words
///
/// A target word counts as found when some utterance word contains it or
/// is contained by it. Returns 0.0 when either side has no words.
pub fn similarity(utterance: &str, target: &str) -> f64 {
    let utterance = normalize(utterance);
    let target = normalize(target);
    let spoken: Vec<&str> = utterance.split_whitespace().collect();
    let expected: Vec<&str> = target.split_whitespace().collect();

    if spoken.is_empty() || expected.is_empty() {
        return 0.0;
    }

    let found = expected
        .iter()
        .filter(|word| {
            spoken
                .iter()
                .any(|s| s.contains(*word) || word.contains(*s))
        })
        .count();

    found as f64 / expected.len() as f64
}

/// Equality or containment in either direction; empty phrases never overlap
fn overlaps(input: &str, phrase: &str) -> bool {
    !phrase.is_empty() && (input == phrase || input.contains(phrase) || phrase.contains(input))
}

/// Command matcher using exact, alias, training-phrase and similarity rules
#[derive(Debug, Clone, Default)]
pub struct CommandMatcher {
    config: MatcherConfig,
}

impl CommandMatcher {
    /// Create a new matcher with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with custom configuration
    pub fn with_config(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Apply the rule ladder to a single command
    fn match_command(
        &self,
        input: &str,
        command: &VoiceCommand,
        mode: MatchMode,
    ) -> Option<MatchResult> {
        if input == normalize(&command.name) {
            return Some(MatchResult::Exact {
                command: command.clone(),
            });
        }

        if let Some(alias) = command
            .aliases
            .iter()
            .find(|alias| overlaps(input, &normalize(alias)))
        {
            return Some(MatchResult::Alias {
                command: command.clone(),
                alias: alias.clone(),
            });
        }

        if mode == MatchMode::Training {
            if let Some(phrase) = command
                .training_phrases
                .iter()
                .find(|phrase| overlaps(input, &normalize(phrase)))
            {
                return Some(MatchResult::TrainingPhrase {
                    command: command.clone(),
                    phrase: phrase.clone(),
                });
            }
        }

        None
    }

    /// Match an utterance against candidates in resolver order
    ///
    /// The first candidate satisfying any rule wins, so earlier (higher
    /// priority) candidates take precedence. In training mode, when no rule
    /// hits, the candidate with the best word-overlap score at or above the
    /// threshold is promoted; the earliest wins ties.
    pub fn match_commands(
        &self,
        utterance: &str,
        candidates: &[VoiceCommand],
        mode: MatchMode,
    ) -> MatchResult {
        let input = normalize(utterance);
        if input.is_empty() {
            return MatchResult::NoMatch;
        }

        if let Some(result) = candidates
            .iter()
            .find_map(|cmd| self.match_command(&input, cmd, mode))
        {
            crate::debug!("[matcher] '{}' matched by rule: {:?}", input, result);
            return result;
        }

        if mode == MatchMode::Training {
            let mut best: Option<(&VoiceCommand, f64)> = None;
            for cmd in candidates {
                let score = similarity(&input, &cmd.name);
                if score.is_finite()
                    && score >= self.config.similarity_threshold
                    && best.map_or(true, |(_, top)| score > top)
                {
                    best = Some((cmd, score));
                }
            }

            if let Some((cmd, score)) = best {
                crate::debug!(
                    "[matcher] '{}' promoted to '{}' (similarity {:.2})",
                    input,
                    cmd.name,
                    score
                );
                return MatchResult::Similar {
                    command: cmd.clone(),
                    score,
                };
            }
        }

        MatchResult::NoMatch
    }

    /// Find the matching command outside of training
    pub fn find<'a>(&self, utterance: &str, candidates: &'a [VoiceCommand]) -> Option<&'a VoiceCommand> {
        let result = self.match_commands(utterance, candidates, MatchMode::Standard);
        let name = result.command().map(|c| c.name.clone())?;
        candidates.iter().find(|c| c.name == name)
    }

    /// Suggest the closest name or alias for an unrecognized utterance
    pub fn suggest(&self, utterance: &str, candidates: &[VoiceCommand]) -> Option<Suggestion> {
        let input = normalize(utterance);
        if input.is_empty() {
            return None;
        }

        let mut best: Option<Suggestion> = None;
        for cmd in candidates {
            for phrase in std::iter::once(&cmd.name).chain(cmd.aliases.iter()) {
                let score = normalized_levenshtein(&input, &normalize(phrase));
                if score < self.config.suggestion_threshold {
                    continue;
                }
                if best.as_ref().map_or(true, |b| score.total_cmp(&b.score).is_gt()) {
                    best = Some(Suggestion {
                        command: cmd.name.clone(),
                        phrase: phrase.clone(),
                        score,
                    });
                }
            }
        }
        best
    }
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
