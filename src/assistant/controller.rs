// VoiceAssistant - listening/speaking lifecycle, command dispatch and
// training sessions behind one handle.
//
// All mutable state lives in a single `AssistantState` behind one lock.
// Each operation computes its outcome under the lock, releases it, and
// only then calls capabilities, the effect handler or the emitter, so a
// host callback that re-enters the assistant never deadlocks.

use super::builtins::{builtin_commands, help_text};
use super::state::{AssistantState, AssistantStatus};
use crate::config::{AssistantConfig, ConfigError};
use crate::context::ContextResolver;
use crate::events::{
    current_timestamp, AssistantErrorPayload, AssistantEventEmitter, CommandEventEmitter,
    CommandExecutedPayload, CommandFailedPayload, CommandMatchedPayload,
    CommandNotRecognizedPayload, ListeningChangedPayload, NotificationKind, NotificationPayload,
    SessionEndReason, TrainingEndedPayload, TrainingEventEmitter, TrainingFeedbackPayload,
    TrainingStartedPayload,
};
use crate::speech::{
    RecognitionEvent, SpeechError, SpeechRecognizer, SpeechSynthesizer, SynthesisEvent,
};
use crate::training::{
    Scheduler, SessionHistoryStore, TrainingFeedback, TrainingSession, TrainingSessionManager,
    TrainingUpdate, UtteranceOutcome,
};
use crate::voice_commands::{
    BuiltinAction, CommandMatcher, Effect, EffectDispatcher, EffectError, EffectHandler,
    EffectResult, MatchMode, MatchResult, VoiceCommand,
};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

/// What happened to a recognition event
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Dropped: the assistant is disabled or the utterance was empty
    Ignored,
    /// Interim result; only the live transcript was updated
    Interim,
    /// A command matched and its effect ran
    Executed { command: String },
    /// A command matched but its effect failed
    Failed { command: String, error: EffectError },
    /// No eligible command matched
    NotRecognized { suggestion: Option<String> },
}

struct Inner<E> {
    state: Mutex<AssistantState>,
    config: AssistantConfig,
    resolver: ContextResolver,
    matcher: CommandMatcher,
    dispatcher: EffectDispatcher,
    builtins: Vec<VoiceCommand>,
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    scheduler: Arc<dyn Scheduler>,
    emitter: Arc<E>,
    history_store: Option<SessionHistoryStore>,
    persist_lock: Mutex<()>,
}

/// Builder for [`VoiceAssistant`]
pub struct VoiceAssistantBuilder<E> {
    config: AssistantConfig,
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    scheduler: Arc<dyn Scheduler>,
    emitter: Arc<E>,
    effect_handler: Option<Arc<dyn EffectHandler>>,
    history_store: Option<SessionHistoryStore>,
}

impl<E> VoiceAssistantBuilder<E>
where
    E: CommandEventEmitter + TrainingEventEmitter + AssistantEventEmitter + 'static,
{
    /// Use a non-default configuration (builder pattern)
    pub fn with_config(mut self, config: AssistantConfig) -> Self {
        self.config = config;
        self
    }

    /// Host handler for navigation, toasts and custom effects (builder pattern)
    pub fn with_effect_handler(mut self, handler: Arc<dyn EffectHandler>) -> Self {
        self.effect_handler = Some(handler);
        self
    }

    /// Persist archived training sessions (builder pattern)
    pub fn with_history_store(mut self, store: SessionHistoryStore) -> Self {
        self.history_store = Some(store);
        self
    }

    /// Validate the configuration and create the assistant
    ///
    /// When a history store is attached, its sessions seed the archive. A
    /// history file that cannot be read is logged and treated as empty.
    pub fn build(self) -> Result<VoiceAssistant<E>, ConfigError> {
        self.config.validate()?;

        let mut training =
            TrainingSessionManager::new(self.config.progress_step, self.config.no_match_policy);
        if let Some(store) = &self.history_store {
            match store.load() {
                Ok(sessions) => training.restore_history(sessions),
                Err(e) => crate::warn!("[assistant] Ignoring training history: {}", e),
            }
        }

        let dispatcher = match self.effect_handler {
            Some(handler) => EffectDispatcher::new(handler),
            None => EffectDispatcher::default(),
        };
        let builtins = if self.config.builtin_commands {
            builtin_commands()
        } else {
            Vec::new()
        };

        let inner = Inner {
            state: Mutex::new(AssistantState::new(self.config.enabled_on_start, training)),
            resolver: ContextResolver::new(self.config.legacy_context_name_match),
            matcher: CommandMatcher::with_config(self.config.matcher_config()),
            dispatcher,
            builtins,
            recognizer: self.recognizer,
            synthesizer: self.synthesizer,
            scheduler: self.scheduler,
            emitter: self.emitter,
            history_store: self.history_store,
            persist_lock: Mutex::new(()),
            config: self.config,
        };

        crate::info!(
            "[assistant] Voice assistant created (enabled={})",
            inner.config.enabled_on_start
        );
        Ok(VoiceAssistant {
            inner: Arc::new(inner),
        })
    }
}

/// The voice assistant engine
///
/// Cloning yields another handle to the same engine.
pub struct VoiceAssistant<E> {
    inner: Arc<Inner<E>>,
}

impl<E> Clone for VoiceAssistant<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E> VoiceAssistant<E>
where
    E: CommandEventEmitter + TrainingEventEmitter + AssistantEventEmitter + 'static,
{
    pub fn builder(
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        scheduler: Arc<dyn Scheduler>,
        emitter: Arc<E>,
    ) -> VoiceAssistantBuilder<E> {
        VoiceAssistantBuilder {
            config: AssistantConfig::default(),
            recognizer,
            synthesizer,
            scheduler,
            emitter,
            effect_handler: None,
            history_store: None,
        }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.inner.config
    }

    // ------------------------------------------------------------------
    // Command registry
    // ------------------------------------------------------------------

    /// Add or replace a command (keyed by name)
    ///
    /// A command sharing its normalized name with a built-in stays
    /// registered but is never eligible; the built-in wins regardless of
    /// priority.
    pub fn register_command(&self, command: VoiceCommand) {
        self.inner.state.lock().registry.register(command);
    }

    /// Remove a command; unknown names are ignored
    pub fn unregister_command(&self, name: &str) {
        self.inner.state.lock().registry.unregister(name);
    }

    /// Commands eligible in the current context, in matching order
    pub fn contextual_commands(&self) -> Vec<VoiceCommand> {
        let state = self.inner.state.lock();
        self.inner.eligible(&state)
    }

    /// `(name, description)` of every eligible command
    pub fn command_help(&self) -> Vec<(String, String)> {
        self.contextual_commands()
            .into_iter()
            .map(|c| (c.name, c.description))
            .collect()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn enable(&self) {
        let mut state = self.inner.state.lock();
        if state.enabled {
            crate::debug!("[assistant] Already enabled");
            return;
        }
        state.enabled = true;
        crate::info!("[assistant] Enabled");
    }

    /// Disable the assistant, cancelling listening and speech immediately
    pub fn disable(&self) {
        let was_listening = {
            let mut state = self.inner.state.lock();
            if !state.enabled {
                crate::debug!("[assistant] Already disabled");
                return;
            }
            let was_listening = state.listening;
            state.enabled = false;
            state.listening = false;
            state.speaking = false;
            state.interim_transcript.clear();
            was_listening
        };

        crate::info!("[assistant] Disabled");
        self.inner.synthesizer.cancel();
        if was_listening {
            self.inner.recognizer.stop();
            self.inner.emit_listening(false, "disabled");
        }
    }

    /// Flip `enabled`; returns the new value
    pub fn toggle_voice_assistant(&self) -> bool {
        if self.is_enabled() {
            self.disable();
        } else {
            self.enable();
        }
        self.is_enabled()
    }

    /// Start the recognizer; no-op while disabled or already listening
    pub fn start_listening(&self) {
        {
            let mut state = self.inner.state.lock();
            if !state.enabled || state.listening {
                crate::debug!(
                    "[assistant] start_listening ignored (enabled={}, listening={})",
                    state.enabled,
                    state.listening
                );
                return;
            }
            state.listening = true;
        }

        match self.inner.recognizer.start(&self.inner.config.speech.language) {
            Ok(()) => {
                crate::info!("[assistant] Listening started");
                self.inner.emit_listening(true, "started");
            }
            Err(e) => self.inner.fail_capability("recognition", e),
        }
    }

    /// Stop the recognizer; no-op when not listening
    pub fn stop_listening(&self) {
        {
            let mut state = self.inner.state.lock();
            if !state.listening {
                crate::debug!("[assistant] stop_listening ignored (not listening)");
                return;
            }
            state.listening = false;
            state.interim_transcript.clear();
        }

        self.inner.recognizer.stop();
        crate::info!("[assistant] Listening stopped");
        self.inner.emit_listening(false, "stopped");
    }

    /// The recognizer stopped on its own (end of a recognition run)
    ///
    /// With continuous listening on, the recognizer is restarted.
    pub fn handle_recognition_ended(&self) {
        let restart = {
            let mut state = self.inner.state.lock();
            if !state.listening {
                return;
            }
            if state.enabled && self.inner.config.continuous_listening {
                true
            } else {
                state.listening = false;
                false
            }
        };

        if !restart {
            crate::info!("[assistant] Recognizer ended");
            self.inner.emit_listening(false, "ended");
            return;
        }

        crate::debug!("[assistant] Restarting recognizer");
        if let Err(e) = self.inner.recognizer.start(&self.inner.config.speech.language) {
            self.inner.fail_capability("recognition", e);
        }
    }

    /// A hard recognizer failure (e.g., microphone permission denied)
    pub fn handle_recognition_error(&self, error: SpeechError) {
        self.inner.fail_capability("recognition", error);
    }

    // ------------------------------------------------------------------
    // Speech output
    // ------------------------------------------------------------------

    /// Speak `text`; with `interrupt`, cancel current speech first
    ///
    /// Silently ignored while disabled.
    pub fn speak_text(&self, text: &str, interrupt: bool) {
        self.inner.speak(text, interrupt);
    }

    pub fn stop_speaking(&self) {
        self.inner.synthesizer.cancel();
        self.inner.state.lock().speaking = false;
    }

    /// Progress reports from the synthesizer
    pub fn handle_synthesis_event(&self, event: SynthesisEvent) {
        match event {
            SynthesisEvent::Started => {
                let mut state = self.inner.state.lock();
                state.speaking = state.enabled;
            }
            SynthesisEvent::Finished => {
                self.inner.state.lock().speaking = false;
            }
            SynthesisEvent::Failed(error) => {
                self.inner.state.lock().speaking = false;
                self.inner.report_synthesis_error(&error);
            }
        }
    }

    // ------------------------------------------------------------------
    // Recognition dispatch
    // ------------------------------------------------------------------

    /// Process one recognition result
    ///
    /// Interim results only update the live transcript and confidence.
    /// Final results are matched against the eligible commands, scored
    /// against the active training session, and the matched effect runs
    /// at most once.
    pub fn handle_recognition(&self, event: RecognitionEvent) -> DispatchOutcome {
        let confidence = event.clamped_confidence();
        let utterance = event.utterance.trim();

        let (candidates, result, suggestion, update) = {
            let mut state = self.inner.state.lock();
            if !state.enabled {
                crate::debug!("[assistant] Recognition ignored while disabled");
                return DispatchOutcome::Ignored;
            }

            state.confidence = confidence;
            if !event.is_final {
                state.interim_transcript = utterance.to_string();
                return DispatchOutcome::Interim;
            }
            state.interim_transcript.clear();

            if utterance.is_empty() {
                return DispatchOutcome::Ignored;
            }

            let candidates = self.inner.eligible(&state);
            let mode = if state.training.is_active() {
                MatchMode::Training
            } else {
                MatchMode::Standard
            };
            let result = self.inner.matcher.match_commands(utterance, &candidates, mode);

            let (suggestion, outcome) = match result.command() {
                Some(command) => {
                    state.last_command = Some(command.name.clone());
                    (None, UtteranceOutcome::Matched)
                }
                None => {
                    let suggestion = self.inner.matcher.suggest(utterance, &candidates);
                    let phrase = suggestion.as_ref().map(|s| s.phrase.clone());
                    (phrase.clone(), UtteranceOutcome::Unmatched { suggestion: phrase })
                }
            };
            let update = state.training.record_utterance(utterance, confidence, outcome);

            (candidates, result, suggestion, update)
        };

        crate::debug!(
            "[assistant] Final utterance '{}' (confidence {:.2})",
            utterance,
            confidence
        );

        // Feedback goes out before the effect, which may end the session
        if let Some(update) = update {
            self.inner.report_training_update(
                &update,
                utterance,
                result.command().map(|c| c.name.clone()),
            );
        }

        match result.command() {
            Some(command) => self.run_command(command, &result, utterance, confidence, &candidates),
            None => self.report_not_recognized(utterance, confidence, suggestion),
        }
    }

    fn run_command(
        &self,
        command: &VoiceCommand,
        result: &MatchResult,
        utterance: &str,
        confidence: f64,
        candidates: &[VoiceCommand],
    ) -> DispatchOutcome {
        crate::info!("[assistant] Matched '{}' -> '{}'", utterance, command.name);
        self.inner.emitter.emit_command_matched(CommandMatchedPayload {
            utterance: utterance.to_string(),
            command_name: command.name.clone(),
            match_kind: match_kind(result).to_string(),
            confidence,
            score: result.score(),
        });

        if let Some(response) = &command.response_text {
            self.inner.speak(response, false);
        }

        let executed = match &command.effect {
            Effect::Builtin { action } => Ok(self.run_builtin(*action, candidates)),
            _ => self.inner.dispatcher.execute(command),
        };

        match executed {
            Ok(done) => {
                self.inner.emitter.emit_command_executed(CommandExecutedPayload {
                    command_name: command.name.clone(),
                    message: done.message,
                });
                DispatchOutcome::Executed {
                    command: command.name.clone(),
                }
            }
            Err(error) => {
                crate::warn!("[assistant] Command '{}' failed: {}", command.name, error);
                self.inner.emitter.emit_command_failed(CommandFailedPayload {
                    command_name: command.name.clone(),
                    error_code: error.code.to_string(),
                    error_message: error.message.clone(),
                });
                DispatchOutcome::Failed {
                    command: command.name.clone(),
                    error,
                }
            }
        }
    }

    fn run_builtin(&self, action: BuiltinAction, candidates: &[VoiceCommand]) -> EffectResult {
        match action {
            BuiltinAction::ShowHelp => {
                let text = help_text(candidates);
                self.inner.speak(&text, true);
                EffectResult::message(text)
            }
            BuiltinAction::StopListening => {
                self.stop_listening();
                EffectResult::message("Listening stopped")
            }
            BuiltinAction::EndTraining => match self.end_training_session() {
                Some(_) => EffectResult::message("Training session ended"),
                None => EffectResult::message("No training session was active"),
            },
        }
    }

    fn report_not_recognized(
        &self,
        utterance: &str,
        confidence: f64,
        suggestion: Option<String>,
    ) -> DispatchOutcome {
        crate::info!("[assistant] Not recognized: '{}'", utterance);
        self.inner
            .emitter
            .emit_command_not_recognized(CommandNotRecognizedPayload {
                utterance: utterance.to_string(),
                confidence,
                suggestion: suggestion.clone(),
            });

        let feedback = match &suggestion {
            Some(phrase) => format!("Sorry, I didn't catch that. Did you mean \"{}\"?", phrase),
            None => "Sorry, I didn't recognize that command.".to_string(),
        };
        self.inner.speak(&feedback, false);

        DispatchOutcome::NotRecognized { suggestion }
    }

    // ------------------------------------------------------------------
    // Context and training
    // ------------------------------------------------------------------

    /// Change the usage context
    ///
    /// An active training session for a different context is finalized
    /// before the context changes.
    pub fn set_context(&self, context: &str) {
        let ended = {
            let mut state = self.inner.state.lock();
            if state.current_context == context {
                return;
            }
            let ended = match state.training.active_context() {
                Some(active) if active != context => state.training.end(Utc::now()),
                _ => None,
            };
            state.current_context = context.to_string();
            ended
        };

        crate::info!("[assistant] Context changed to '{}'", context);
        if let Some(session) = ended {
            self.inner
                .report_session_end(session, SessionEndReason::ContextChanged);
        }
    }

    /// Start a training session, finalizing any running one first
    pub fn start_training_session(&self, context: &str) -> Uuid {
        let outcome = self.inner.state.lock().training.start(context, Utc::now());
        let session_id = outcome.session_id;

        if let Some(replaced) = outcome.replaced {
            self.inner
                .report_session_end(replaced, SessionEndReason::Replaced);
        }

        let weak = Arc::downgrade(&self.inner);
        let handle = self.inner.scheduler.schedule(
            self.inner.config.session_timeout(),
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.expire_session(session_id);
                }
            }),
        );
        self.inner
            .state
            .lock()
            .training
            .arm_timeout(session_id, handle);

        self.inner.emitter.emit_training_started(TrainingStartedPayload {
            session_id: session_id.to_string(),
            context: context.to_string(),
            timestamp: current_timestamp(),
        });
        self.inner.emitter.emit_notification(NotificationPayload::new(
            NotificationKind::Info,
            "Training started",
            format!("Practicing commands for '{}'", context),
        ));
        if self.inner.config.announce_training {
            self.inner.speak(
                &format!("Training session started for {}.", context),
                false,
            );
        }

        session_id
    }

    /// Finalize the active session; no-op while idle
    pub fn end_training_session(&self) -> Option<TrainingSession> {
        let ended = self.inner.state.lock().training.end(Utc::now());
        if let Some(session) = &ended {
            self.inner
                .report_session_end(session.clone(), SessionEndReason::Completed);
        }
        ended
    }

    /// End any active session and clear the session history
    pub fn reset_training(&self) {
        let ended = self.inner.state.lock().training.reset(Utc::now());
        match ended {
            Some(session) => self.inner.report_session_end(session, SessionEndReason::Reset),
            None => self.inner.persist_history(),
        }
    }

    /// Qualitative bucket of the current training accuracy
    pub fn training_feedback(&self) -> TrainingFeedback {
        self.inner.state.lock().training.feedback()
    }

    // ------------------------------------------------------------------
    // Observables
    // ------------------------------------------------------------------

    pub fn is_enabled(&self) -> bool {
        self.inner.state.lock().enabled
    }

    pub fn is_listening(&self) -> bool {
        self.inner.state.lock().listening
    }

    pub fn is_speaking(&self) -> bool {
        self.inner.state.lock().speaking
    }

    pub fn is_training(&self) -> bool {
        self.inner.state.lock().training.is_active()
    }

    pub fn last_command(&self) -> Option<String> {
        self.inner.state.lock().last_command.clone()
    }

    pub fn last_spoken(&self) -> Option<String> {
        self.inner.state.lock().last_spoken.clone()
    }

    pub fn confidence_level(&self) -> f64 {
        self.inner.state.lock().confidence
    }

    pub fn interim_transcript(&self) -> String {
        self.inner.state.lock().interim_transcript.clone()
    }

    pub fn current_context(&self) -> String {
        self.inner.state.lock().current_context.clone()
    }

    pub fn training_progress(&self) -> u32 {
        self.inner.state.lock().training.progress()
    }

    pub fn training_accuracy(&self) -> f64 {
        self.inner.state.lock().training.accuracy()
    }

    /// The running session, if any
    pub fn active_session(&self) -> Option<TrainingSession> {
        self.inner.state.lock().training.active_session().cloned()
    }

    /// Archived sessions, oldest first
    pub fn training_sessions(&self) -> Vec<TrainingSession> {
        self.inner.state.lock().training.history().to_vec()
    }

    pub fn status(&self) -> AssistantStatus {
        self.inner.state.lock().snapshot()
    }
}

impl<E> Inner<E>
where
    E: CommandEventEmitter + TrainingEventEmitter + AssistantEventEmitter + 'static,
{
    fn eligible(&self, state: &AssistantState) -> Vec<VoiceCommand> {
        self.resolver.eligible(
            state.registry.commands(),
            &state.current_context,
            &self.builtins,
        )
    }

    fn speak(&self, text: &str, interrupt: bool) {
        if text.trim().is_empty() {
            return;
        }
        {
            let mut state = self.state.lock();
            if !state.enabled {
                crate::debug!("[assistant] speak ignored while disabled");
                return;
            }
            state.last_spoken = Some(text.to_string());
        }

        if interrupt {
            self.synthesizer.cancel();
        }
        if let Err(e) = self.synthesizer.speak(text, &self.config.speech) {
            self.state.lock().speaking = false;
            self.report_synthesis_error(&e);
        }
    }

    /// Recognition failures disable the assistant and tell the user
    fn fail_capability(&self, source: &str, error: SpeechError) {
        let was_listening = {
            let mut state = self.state.lock();
            let was_listening = state.listening;
            state.enabled = false;
            state.listening = false;
            state.speaking = false;
            state.interim_transcript.clear();
            was_listening
        };

        crate::error!("[assistant] {} failed: {}", source, error);
        self.recognizer.stop();
        self.synthesizer.cancel();
        if was_listening {
            self.emit_listening(false, "error");
        }
        self.emitter.emit_assistant_error(AssistantErrorPayload {
            source: source.to_string(),
            message: error.to_string(),
        });
        self.emitter.emit_notification(NotificationPayload::new(
            NotificationKind::Error,
            "Voice assistant disabled",
            error.to_string(),
        ));
    }

    fn report_synthesis_error(&self, error: &SpeechError) {
        crate::error!("[assistant] synthesis failed: {}", error);
        self.emitter.emit_assistant_error(AssistantErrorPayload {
            source: "synthesis".to_string(),
            message: error.to_string(),
        });
    }

    fn emit_listening(&self, listening: bool, reason: &str) {
        self.emitter.emit_listening_changed(ListeningChangedPayload {
            listening,
            reason: reason.to_string(),
        });
    }

    fn report_training_update(
        &self,
        update: &TrainingUpdate,
        utterance: &str,
        matched_command: Option<String>,
    ) {
        self.emitter.emit_training_feedback(TrainingFeedbackPayload {
            session_id: update.session_id.to_string(),
            utterance: utterance.to_string(),
            matched_command,
            accuracy: update.accuracy,
            progress: update.progress,
            feedback: TrainingFeedback::from_accuracy(update.accuracy).to_string(),
        });
    }

    /// Timer callback; stale ids are ignored by the manager
    fn expire_session(&self, session_id: Uuid) {
        let expired = self.state.lock().training.expire(session_id, Utc::now());
        if let Some(session) = expired {
            self.report_session_end(session, SessionEndReason::Timeout);
        }
    }

    fn report_session_end(&self, session: TrainingSession, reason: SessionEndReason) {
        self.persist_history();

        self.emitter.emit_training_ended(TrainingEndedPayload {
            session_id: session.id.to_string(),
            context: session.context.clone(),
            reason,
            utterance_count: session.utterances.len(),
            accuracy: session.accuracy,
            timestamp: current_timestamp(),
        });
        self.emitter.emit_notification(NotificationPayload::new(
            NotificationKind::Success,
            "Training ended",
            format!(
                "{} utterances, {:.0}% accuracy",
                session.utterances.len(),
                session.accuracy * 100.0
            ),
        ));

        if self.config.announce_training && reason != SessionEndReason::Replaced {
            let feedback = TrainingFeedback::from_accuracy(session.accuracy);
            self.speak(
                &format!("Training session ended. {}", feedback.message()),
                false,
            );
        }
    }

    /// Write the current archive to the history store, if one is attached
    ///
    /// Snapshot and write both happen under `persist_lock`, so concurrent
    /// or re-entrant saves land in archive order.
    fn persist_history(&self) {
        let Some(store) = &self.history_store else {
            return;
        };

        let _guard = self.persist_lock.lock();
        let history = self.state.lock().training.history().to_vec();
        if let Err(e) = store.save(&history) {
            crate::warn!("[assistant] {}", e);
        }
    }
}

fn match_kind(result: &MatchResult) -> &'static str {
    match result {
        MatchResult::Exact { .. } => "exact",
        MatchResult::Alias { .. } => "alias",
        MatchResult::TrainingPhrase { .. } => "training_phrase",
        MatchResult::Similar { .. } => "similar",
        MatchResult::NoMatch => "none",
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
