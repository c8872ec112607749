// Tests for VoiceAssistant
// Capabilities are mocks, the session timer is a ManualScheduler so
// timeouts are driven by `advance`.

use super::*;
use crate::events::tests::MockEventEmitter;
use crate::events::{assistant_events, command_events, training_events};
use crate::speech::{MockRecognizer, MockSynthesizer};
use crate::training::{ManualScheduler, NoMatchPolicy};
use crate::voice_commands::executor::tests::RecordingEffectHandler;
use crate::voice_commands::EffectErrorCode;
use std::time::Duration;
use tempfile::TempDir;

struct Harness {
    assistant: VoiceAssistant<MockEventEmitter>,
    recognizer: Arc<MockRecognizer>,
    synthesizer: Arc<MockSynthesizer>,
    scheduler: Arc<ManualScheduler>,
    emitter: Arc<MockEventEmitter>,
    handler: Arc<RecordingEffectHandler>,
}

fn harness_with(config: AssistantConfig, handler: RecordingEffectHandler) -> Harness {
    let recognizer = Arc::new(MockRecognizer::new());
    let synthesizer = Arc::new(MockSynthesizer::new());
    let scheduler = Arc::new(ManualScheduler::new());
    let emitter = Arc::new(MockEventEmitter::new());
    let handler = Arc::new(handler);

    let assistant = VoiceAssistant::builder(
        recognizer.clone(),
        synthesizer.clone(),
        scheduler.clone(),
        emitter.clone(),
    )
    .with_config(config)
    .with_effect_handler(handler.clone())
    .build()
    .unwrap();

    Harness {
        assistant,
        recognizer,
        synthesizer,
        scheduler,
        emitter,
        handler,
    }
}

fn harness() -> Harness {
    harness_with(AssistantConfig::default(), RecordingEffectHandler::new_success())
}

fn create_workflow() -> VoiceCommand {
    VoiceCommand::new(
        "create workflow",
        Effect::Navigate {
            path: "/workflows/new".to_string(),
        },
    )
    .with_description("Start a new workflow")
    .with_aliases(["new workflow"])
}

fn final_event(utterance: &str, confidence: f64) -> RecognitionEvent {
    RecognitionEvent::final_result(utterance, confidence)
}

// ----------------------------------------------------------------------
// Lifecycle
// ----------------------------------------------------------------------

#[test]
fn test_start_listening_when_enabled() {
    let h = harness();
    assert!(h.assistant.is_enabled());

    h.assistant.start_listening();

    assert!(h.assistant.is_listening());
    assert_eq!(h.recognizer.start_count(), 1);
    let events = h.emitter.listening_changed_events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert!(events[0].listening);
}

#[test]
fn test_start_listening_twice_starts_once() {
    let h = harness();
    h.assistant.start_listening();
    h.assistant.start_listening();
    assert_eq!(h.recognizer.start_count(), 1);
}

#[test]
fn test_start_listening_while_disabled_is_noop() {
    let h = harness();
    h.assistant.disable();

    h.assistant.start_listening();

    assert!(!h.assistant.is_listening());
    assert_eq!(h.recognizer.start_count(), 0);
}

#[test]
fn test_stop_listening_when_idle_is_noop() {
    let h = harness();
    h.assistant.stop_listening();
    assert_eq!(h.recognizer.stop_count(), 0);
    assert!(h.emitter.listening_changed_events.lock().unwrap().is_empty());
}

#[test]
fn test_disable_cancels_listening_and_speech() {
    let h = harness();
    h.assistant.start_listening();
    h.assistant.handle_synthesis_event(SynthesisEvent::Started);
    assert!(h.assistant.is_speaking());

    h.assistant.disable();

    assert!(!h.assistant.is_enabled());
    assert!(!h.assistant.is_listening());
    assert!(!h.assistant.is_speaking());
    assert_eq!(h.recognizer.stop_count(), 1);
    assert_eq!(h.synthesizer.cancel_count(), 1);

    h.assistant.speak_text("hello there", false);
    assert!(h.synthesizer.spoken().is_empty());
    assert!(h.assistant.last_spoken().is_none());
}

#[test]
fn test_toggle_returns_new_state() {
    let h = harness();
    assert!(!h.assistant.toggle_voice_assistant());
    assert!(h.assistant.toggle_voice_assistant());
    assert!(h.assistant.is_enabled());
}

#[test]
fn test_enabled_on_start_false() {
    let config = AssistantConfig {
        enabled_on_start: false,
        ..AssistantConfig::default()
    };
    let h = harness_with(config, RecordingEffectHandler::new_success());
    assert!(!h.assistant.is_enabled());
}

#[test]
fn test_recognition_error_disables_and_notifies() {
    let h = harness();
    h.assistant.start_listening();

    h.assistant
        .handle_recognition_error(SpeechError::PermissionDenied);

    assert!(!h.assistant.is_enabled());
    assert!(!h.assistant.is_listening());

    let errors = h.emitter.error_events.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].source, "recognition");

    let notifications = h.emitter.notification_events.lock().unwrap();
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Error));
}

#[test]
fn test_recognizer_start_failure_disables() {
    let h = harness();
    h.recognizer.fail_with(SpeechError::PermissionDenied);

    h.assistant.start_listening();

    assert!(!h.assistant.is_enabled());
    assert!(!h.assistant.is_listening());
    assert_eq!(h.emitter.error_events.lock().unwrap().len(), 1);
}

#[test]
fn test_recognition_ended_restarts_when_continuous() {
    let h = harness();
    h.assistant.start_listening();

    h.assistant.handle_recognition_ended();

    assert!(h.assistant.is_listening());
    assert_eq!(h.recognizer.start_count(), 2);
}

#[test]
fn test_recognition_ended_stops_when_not_continuous() {
    let config = AssistantConfig {
        continuous_listening: false,
        ..AssistantConfig::default()
    };
    let h = harness_with(config, RecordingEffectHandler::new_success());
    h.assistant.start_listening();

    h.assistant.handle_recognition_ended();

    assert!(!h.assistant.is_listening());
    assert_eq!(h.recognizer.start_count(), 1);
}

// ----------------------------------------------------------------------
// Speech output
// ----------------------------------------------------------------------

#[test]
fn test_speak_with_interrupt_cancels_first() {
    let h = harness();

    h.assistant.speak_text("first", false);
    h.assistant.speak_text("second", true);

    assert_eq!(h.synthesizer.spoken(), vec!["first", "second"]);
    assert_eq!(h.synthesizer.cancel_count(), 1);
    assert_eq!(h.assistant.last_spoken().as_deref(), Some("second"));
}

#[test]
fn test_synthesis_events_track_speaking() {
    let h = harness();

    h.assistant.handle_synthesis_event(SynthesisEvent::Started);
    assert!(h.assistant.is_speaking());

    h.assistant.handle_synthesis_event(SynthesisEvent::Finished);
    assert!(!h.assistant.is_speaking());

    h.assistant.handle_synthesis_event(SynthesisEvent::Started);
    h.assistant.stop_speaking();
    assert!(!h.assistant.is_speaking());
}

#[test]
fn test_synthesis_failure_reports_without_disabling() {
    let h = harness();
    h.synthesizer
        .fail_with(SpeechError::Backend("no voices".to_string()));

    h.assistant.speak_text("hello", false);

    assert!(h.assistant.is_enabled());
    let errors = h.emitter.error_events.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].source, "synthesis");
}

// ----------------------------------------------------------------------
// Recognition dispatch
// ----------------------------------------------------------------------

#[test]
fn test_interim_updates_display_only() {
    let h = harness();
    h.assistant.register_command(create_workflow());

    let outcome = h
        .assistant
        .handle_recognition(RecognitionEvent::interim("create workflow", 0.4));

    assert_eq!(outcome, DispatchOutcome::Interim);
    assert_eq!(h.assistant.interim_transcript(), "create workflow");
    assert!((h.assistant.confidence_level() - 0.4).abs() < 1e-9);
    assert_eq!(h.handler.count(), 0);
    assert!(h.assistant.last_command().is_none());
}

#[test]
fn test_final_match_executes_effect_once() {
    let h = harness();
    h.assistant.register_command(create_workflow());
    h.assistant
        .handle_recognition(RecognitionEvent::interim("create", 0.3));

    let outcome = h
        .assistant
        .handle_recognition(final_event("Create Workflow", 0.95));

    assert_eq!(
        outcome,
        DispatchOutcome::Executed {
            command: "create workflow".to_string()
        }
    );
    assert_eq!(h.handler.count(), 1);
    assert_eq!(h.assistant.last_command().as_deref(), Some("create workflow"));
    assert_eq!(h.assistant.interim_transcript(), "");

    let matched = h.emitter.command_matched_events.lock().unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].match_kind, "exact");
    assert_eq!(h.emitter.command_executed_events.lock().unwrap().len(), 1);
}

#[test]
fn test_final_results_processed_without_listening() {
    let h = harness();
    h.assistant.register_command(create_workflow());
    assert!(!h.assistant.is_listening());

    let outcome = h.assistant.handle_recognition(final_event("new workflow", 0.8));

    assert!(matches!(outcome, DispatchOutcome::Executed { .. }));
}

#[test]
fn test_recognition_ignored_while_disabled() {
    let h = harness();
    h.assistant.register_command(create_workflow());
    h.assistant.disable();

    let outcome = h
        .assistant
        .handle_recognition(final_event("create workflow", 0.9));

    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert_eq!(h.handler.count(), 0);
}

#[test]
fn test_empty_final_utterance_is_ignored() {
    let h = harness();
    h.assistant.start_training_session("zaps");

    let outcome = h.assistant.handle_recognition(final_event("   ", 0.9));

    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert!(h.assistant.active_session().unwrap().utterances.is_empty());
}

#[test]
fn test_response_text_spoken_before_effect() {
    let h = harness();
    h.assistant
        .register_command(create_workflow().with_response("Creating a workflow"));

    h.assistant
        .handle_recognition(final_event("create workflow", 0.9));

    assert_eq!(h.synthesizer.spoken(), vec!["Creating a workflow"]);
    assert_eq!(h.handler.count(), 1);
}

#[test]
fn test_effect_failure_reported() {
    let h = harness_with(
        AssistantConfig::default(),
        RecordingEffectHandler::new_failure(EffectErrorCode::NotFound, "no such route"),
    );
    h.assistant.register_command(create_workflow());

    let outcome = h
        .assistant
        .handle_recognition(final_event("create workflow", 0.9));

    match outcome {
        DispatchOutcome::Failed { command, error } => {
            assert_eq!(command, "create workflow");
            assert_eq!(error.code, EffectErrorCode::NotFound);
        }
        other => panic!("expected failure, got {:?}", other),
    }
    let failed = h.emitter.command_failed_events.lock().unwrap();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].error_code, "NOT_FOUND");
}

#[test]
fn test_no_match_suggests_closest_command() {
    let h = harness();
    h.assistant.register_command(create_workflow());

    let outcome = h
        .assistant
        .handle_recognition(final_event("create workflw", 0.7));

    assert_eq!(
        outcome,
        DispatchOutcome::NotRecognized {
            suggestion: Some("create workflow".to_string())
        }
    );
    assert_eq!(h.handler.count(), 0);
    assert!(h.synthesizer.spoken()[0].contains("Did you mean"));
    assert_eq!(
        h.emitter.command_not_recognized_events.lock().unwrap().len(),
        1
    );
}

#[test]
fn test_context_scoped_command_not_matched_elsewhere() {
    let h = harness();
    h.assistant.register_command(
        VoiceCommand::new("run zap", Effect::None).with_context_tags(["workflows"]),
    );
    h.assistant.set_context("tables");

    assert!(!h
        .assistant
        .contextual_commands()
        .iter()
        .any(|c| c.name == "run zap"));
    let outcome = h.assistant.handle_recognition(final_event("run zap", 0.9));
    assert!(matches!(outcome, DispatchOutcome::NotRecognized { .. }));

    h.assistant.set_context("workflows");
    let outcome = h.assistant.handle_recognition(final_event("run zap", 0.9));
    assert!(matches!(outcome, DispatchOutcome::Executed { .. }));
}

#[test]
fn test_registration_visible_to_next_match() {
    let h = harness();
    h.assistant.register_command(create_workflow());
    h.assistant.unregister_command("create workflow");
    h.assistant.unregister_command("never registered");

    let outcome = h
        .assistant
        .handle_recognition(final_event("create workflow", 0.9));
    assert!(matches!(outcome, DispatchOutcome::NotRecognized { .. }));
}

#[test]
fn test_command_help_includes_builtins_and_registry() {
    let h = harness();
    h.assistant.register_command(create_workflow());

    let help = h.assistant.command_help();
    let names: Vec<&str> = help.iter().map(|(name, _)| name.as_str()).collect();

    assert_eq!(
        names,
        vec!["help", "stop listening", "end training", "create workflow"]
    );
    assert_eq!(help[3].1, "Start a new workflow");
}

// ----------------------------------------------------------------------
// Built-in commands
// ----------------------------------------------------------------------

#[test]
fn test_builtin_help_speaks_command_list() {
    let h = harness();
    h.assistant.register_command(create_workflow());

    let outcome = h.assistant.handle_recognition(final_event("what can I say", 0.9));

    assert_eq!(
        outcome,
        DispatchOutcome::Executed {
            command: "help".to_string()
        }
    );
    let spoken = h.synthesizer.spoken();
    assert!(spoken.last().unwrap().contains("create workflow"));
    assert_eq!(h.handler.count(), 0);
}

#[test]
fn test_builtin_stop_listening() {
    let h = harness();
    h.assistant.start_listening();

    h.assistant.handle_recognition(final_event("stop listening", 0.9));

    assert!(!h.assistant.is_listening());
    assert_eq!(h.recognizer.stop_count(), 1);
}

#[test]
fn test_builtin_end_training() {
    let h = harness();
    h.assistant.start_training_session("zaps");

    h.assistant.handle_recognition(final_event("end training", 0.9));

    assert!(!h.assistant.is_training());
    let history = h.assistant.training_sessions();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].utterances, vec!["end training"]);
}

#[test]
fn test_builtins_can_be_turned_off() {
    let config = AssistantConfig {
        builtin_commands: false,
        ..AssistantConfig::default()
    };
    let h = harness_with(config, RecordingEffectHandler::new_success());

    let outcome = h.assistant.handle_recognition(final_event("help", 0.9));

    assert_eq!(outcome, DispatchOutcome::NotRecognized { suggestion: None });
    assert!(h.assistant.contextual_commands().is_empty());
}

// ----------------------------------------------------------------------
// Training sessions
// ----------------------------------------------------------------------

#[test]
fn test_end_to_end_training_match() {
    let h = harness();
    h.assistant.register_command(create_workflow());
    h.assistant.set_context("zaps");
    h.assistant.start_training_session("zaps");

    let outcome = h.assistant.handle_recognition(final_event("new workflow", 0.9));

    assert!(matches!(outcome, DispatchOutcome::Executed { .. }));
    assert_eq!(h.handler.count(), 1);
    assert!((h.assistant.training_accuracy() - 0.45).abs() < 1e-9);
    assert_eq!(h.assistant.training_progress(), 10);
    assert_eq!(
        h.assistant.training_feedback(),
        TrainingFeedback::NeedsClarity
    );

    let feedback = h.emitter.training_feedback_events.lock().unwrap();
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0].matched_command.as_deref(), Some("create workflow"));
    assert_eq!(feedback[0].progress, 10);
}

#[test]
fn test_no_match_during_training_is_feedback_only() {
    let h = harness();
    h.assistant.register_command(create_workflow());
    h.assistant.set_context("zaps");
    h.assistant.start_training_session("zaps");
    h.assistant.handle_recognition(final_event("new workflow", 0.9));

    let outcome = h
        .assistant
        .handle_recognition(final_event("frobnicate the sprocket", 0.9));

    assert!(matches!(outcome, DispatchOutcome::NotRecognized { .. }));
    assert_eq!(h.handler.count(), 1);
    assert!((h.assistant.training_accuracy() - 0.45).abs() < 1e-9);
    assert_eq!(h.assistant.training_progress(), 10);

    let session = h.assistant.active_session().unwrap();
    assert_eq!(
        session.utterances,
        vec!["new workflow", "frobnicate the sprocket"]
    );
    assert_eq!(session.improvements.len(), 1);
}

#[test]
fn test_no_match_during_training_penalized() {
    let config = AssistantConfig {
        no_match_policy: NoMatchPolicy::Penalize,
        ..AssistantConfig::default()
    };
    let h = harness_with(config, RecordingEffectHandler::new_success());
    h.assistant.register_command(create_workflow());
    h.assistant.start_training_session("zaps");
    h.assistant.handle_recognition(final_event("new workflow", 0.9));

    h.assistant
        .handle_recognition(final_event("frobnicate the sprocket", 0.9));

    assert!((h.assistant.training_accuracy() - 0.225).abs() < 1e-9);
    assert_eq!(h.assistant.training_progress(), 20);
}

#[test]
fn test_training_phrase_only_matches_in_training() {
    let h = harness();
    h.assistant.register_command(
        VoiceCommand::new("open settings", Effect::None).with_training_phrases(["preferences"]),
    );

    let outcome = h.assistant.handle_recognition(final_event("preferences", 0.9));
    assert!(matches!(outcome, DispatchOutcome::NotRecognized { .. }));

    h.assistant.start_training_session("settings");
    let outcome = h.assistant.handle_recognition(final_event("preferences", 0.9));
    assert_eq!(
        outcome,
        DispatchOutcome::Executed {
            command: "open settings".to_string()
        }
    );
}

#[test]
fn test_training_start_announced_and_notified() {
    let h = harness();

    let id = h.assistant.start_training_session("zaps");

    assert!(h.assistant.is_training());
    assert_eq!(h.assistant.active_session().unwrap().id, id);
    assert_eq!(
        h.synthesizer.spoken(),
        vec!["Training session started for zaps."]
    );
    let started = h.emitter.training_started_events.lock().unwrap();
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].context, "zaps");
    assert_eq!(h.emitter.notification_events.lock().unwrap().len(), 1);
}

#[test]
fn test_starting_again_archives_previous_session() {
    let h = harness();

    h.assistant.start_training_session("a");
    h.assistant.start_training_session("b");

    let history = h.assistant.training_sessions();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].context, "a");
    assert!(history[0].end_time.is_some());
    assert_eq!(
        h.assistant.active_session().unwrap().context,
        "b"
    );

    let ended = h.emitter.training_ended_events.lock().unwrap();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].reason, SessionEndReason::Replaced);
    // One live timer for the active session only
    assert_eq!(h.scheduler.pending_count(), 1);
}

#[test]
fn test_session_times_out_after_ten_minutes() {
    let h = harness();
    h.assistant.start_training_session("zaps");

    h.scheduler.advance(Duration::from_secs(599));
    assert!(h.assistant.is_training());

    h.scheduler.advance(Duration::from_secs(1));

    assert!(!h.assistant.is_training());
    let history = h.assistant.training_sessions();
    assert_eq!(history.len(), 1);
    assert!(history[0].end_time.is_some());

    let ended = h.emitter.training_ended_events.lock().unwrap();
    assert_eq!(ended[0].reason, SessionEndReason::Timeout);
}

#[test]
fn test_explicit_end_cancels_timeout() {
    let h = harness();
    h.assistant.start_training_session("zaps");

    let ended = h.assistant.end_training_session().unwrap();
    assert!(ended.end_time.is_some());
    assert_eq!(h.scheduler.pending_count(), 0);

    assert_eq!(h.scheduler.advance(Duration::from_secs(600)), 0);
    assert_eq!(h.assistant.training_sessions().len(), 1);
    assert_eq!(h.emitter.training_ended_events.lock().unwrap().len(), 1);
}

#[test]
fn test_replaced_session_timer_does_not_end_new_session() {
    let h = harness();
    h.assistant.start_training_session("a");
    h.scheduler.advance(Duration::from_secs(300));
    h.assistant.start_training_session("b");

    h.scheduler.advance(Duration::from_secs(300));
    assert!(h.assistant.is_training());

    h.scheduler.advance(Duration::from_secs(300));
    assert!(!h.assistant.is_training());
    assert_eq!(h.assistant.training_sessions().len(), 2);
}

#[test]
fn test_end_while_idle_is_noop() {
    let h = harness();
    assert!(h.assistant.end_training_session().is_none());
    assert!(h.emitter.training_ended_events.lock().unwrap().is_empty());
}

#[test]
fn test_context_change_ends_session() {
    let h = harness();
    h.assistant.set_context("zaps");
    h.assistant.start_training_session("zaps");

    h.assistant.set_context("zaps");
    assert!(h.assistant.is_training());

    h.assistant.set_context("tables");

    assert!(!h.assistant.is_training());
    assert_eq!(h.assistant.current_context(), "tables");
    assert_eq!(h.scheduler.pending_count(), 0);
    let ended = h.emitter.training_ended_events.lock().unwrap();
    assert_eq!(ended[0].reason, SessionEndReason::ContextChanged);
}

#[test]
fn test_reset_training_clears_history() {
    let h = harness();
    h.assistant.start_training_session("a");
    h.assistant.end_training_session();
    h.assistant.start_training_session("b");

    h.assistant.reset_training();

    assert!(!h.assistant.is_training());
    assert!(h.assistant.training_sessions().is_empty());
    assert_eq!(h.assistant.training_progress(), 0);
}

#[test]
fn test_end_announcement_can_be_turned_off() {
    let config = AssistantConfig {
        announce_training: false,
        ..AssistantConfig::default()
    };
    let h = harness_with(config, RecordingEffectHandler::new_success());

    h.assistant.start_training_session("zaps");
    h.assistant.end_training_session();

    assert!(h.synthesizer.spoken().is_empty());
}

// ----------------------------------------------------------------------
// Persistence and status
// ----------------------------------------------------------------------

#[test]
fn test_history_persisted_and_restored() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history.json");

    let build = || {
        VoiceAssistant::builder(
            Arc::new(MockRecognizer::new()),
            Arc::new(MockSynthesizer::new()),
            Arc::new(ManualScheduler::new()),
            Arc::new(MockEventEmitter::new()),
        )
        .with_history_store(SessionHistoryStore::new(&path))
        .build()
        .unwrap()
    };

    let first = build();
    first.start_training_session("zaps");
    first.end_training_session();

    let second = build();
    let history = second.training_sessions();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].context, "zaps");
}

#[test]
fn test_invalid_config_rejected_by_build() {
    let config = AssistantConfig {
        progress_step: 0,
        ..AssistantConfig::default()
    };
    let result = VoiceAssistant::builder(
        Arc::new(MockRecognizer::new()),
        Arc::new(MockSynthesizer::new()),
        Arc::new(ManualScheduler::new()),
        Arc::new(MockEventEmitter::new()),
    )
    .with_config(config)
    .build();

    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[test]
fn test_status_snapshot() {
    let h = harness();
    h.assistant.register_command(create_workflow());
    h.assistant.set_context("zaps");
    h.assistant.start_training_session("zaps");
    h.assistant.start_listening();

    let status = h.assistant.status();

    assert!(status.enabled);
    assert!(status.listening);
    assert!(status.training);
    assert_eq!(status.current_context, "zaps");
    assert_eq!(status.training_context.as_deref(), Some("zaps"));
    assert_eq!(status.command_count, 1);

    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["currentContext"], "zaps");
    assert_eq!(json["trainingProgress"], 0);
}

#[test]
fn test_clones_share_state() {
    let h = harness();
    let other = h.assistant.clone();

    other.disable();

    assert!(!h.assistant.is_enabled());
}

// ----------------------------------------------------------------------
// Event ordering and re-entrant hosts
// ----------------------------------------------------------------------

/// Records event names in emission order. When `assistant` is set, the
/// first training_ended event runs one more training session from inside
/// the callback, the way a host reacting to the event would.
#[derive(Default)]
struct SequenceEmitter {
    events: parking_lot::Mutex<Vec<&'static str>>,
    assistant: parking_lot::Mutex<Option<VoiceAssistant<SequenceEmitter>>>,
    reentered: std::sync::atomic::AtomicBool,
}

impl SequenceEmitter {
    fn record(&self, name: &'static str) {
        self.events.lock().push(name);
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.events.lock().iter().position(|e| *e == name)
    }
}

impl CommandEventEmitter for SequenceEmitter {
    fn emit_command_matched(&self, _payload: CommandMatchedPayload) {
        self.record(command_events::COMMAND_MATCHED);
    }

    fn emit_command_executed(&self, _payload: CommandExecutedPayload) {
        self.record(command_events::COMMAND_EXECUTED);
    }

    fn emit_command_failed(&self, _payload: CommandFailedPayload) {
        self.record(command_events::COMMAND_FAILED);
    }

    fn emit_command_not_recognized(&self, _payload: CommandNotRecognizedPayload) {
        self.record(command_events::COMMAND_NOT_RECOGNIZED);
    }
}

impl TrainingEventEmitter for SequenceEmitter {
    fn emit_training_started(&self, _payload: TrainingStartedPayload) {
        self.record(training_events::TRAINING_STARTED);
    }

    fn emit_training_feedback(&self, _payload: TrainingFeedbackPayload) {
        self.record(training_events::TRAINING_FEEDBACK);
    }

    fn emit_training_ended(&self, _payload: TrainingEndedPayload) {
        self.record(training_events::TRAINING_ENDED);

        let assistant = self.assistant.lock().clone();
        if let Some(assistant) = assistant {
            if !self.reentered.swap(true, std::sync::atomic::Ordering::SeqCst) {
                assistant.start_training_session("tables");
                assistant.end_training_session();
            }
        }
    }
}

impl AssistantEventEmitter for SequenceEmitter {
    fn emit_listening_changed(&self, _payload: ListeningChangedPayload) {
        self.record(assistant_events::LISTENING_CHANGED);
    }

    fn emit_assistant_error(&self, _payload: AssistantErrorPayload) {
        self.record(assistant_events::ASSISTANT_ERROR);
    }

    fn emit_notification(&self, _payload: NotificationPayload) {
        self.record(assistant_events::NOTIFICATION);
    }
}

fn sequence_assistant(
    emitter: Arc<SequenceEmitter>,
    store: Option<SessionHistoryStore>,
) -> VoiceAssistant<SequenceEmitter> {
    let mut builder = VoiceAssistant::builder(
        Arc::new(MockRecognizer::new()),
        Arc::new(MockSynthesizer::new()),
        Arc::new(ManualScheduler::new()),
        emitter,
    );
    if let Some(store) = store {
        builder = builder.with_history_store(store);
    }
    builder.build().unwrap()
}

#[test]
fn test_end_training_builtin_reports_feedback_before_session_end() {
    let emitter = Arc::new(SequenceEmitter::default());
    let assistant = sequence_assistant(emitter.clone(), None);
    assistant.start_training_session("zaps");

    assistant.handle_recognition(final_event("end training", 0.9));

    let feedback = emitter.position(training_events::TRAINING_FEEDBACK).unwrap();
    let ended = emitter.position(training_events::TRAINING_ENDED).unwrap();
    assert!(feedback < ended);
    assert!(!assistant.is_training());
}

#[test]
fn test_history_file_tracks_sessions_ended_from_callbacks() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history.json");
    let store = SessionHistoryStore::new(&path);

    let emitter = Arc::new(SequenceEmitter::default());
    let assistant = sequence_assistant(emitter.clone(), Some(store.clone()));
    *emitter.assistant.lock() = Some(assistant.clone());

    assistant.start_training_session("zaps");
    assistant.end_training_session();

    let in_memory: Vec<Uuid> = assistant.training_sessions().iter().map(|s| s.id).collect();
    let on_disk: Vec<Uuid> = store.load().unwrap().iter().map(|s| s.id).collect();
    assert_eq!(in_memory.len(), 2);
    assert_eq!(on_disk, in_memory);

    // Break the emitter -> assistant cycle
    emitter.assistant.lock().take();
}
