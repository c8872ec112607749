// Built-in global commands handled by the assistant itself

use crate::voice_commands::{BuiltinAction, Effect, VoiceCommand};

pub const HELP_COMMAND: &str = "help";
pub const STOP_LISTENING_COMMAND: &str = "stop listening";
pub const END_TRAINING_COMMAND: &str = "end training";

/// The commands passed to the resolver as `global_commands`
pub fn builtin_commands() -> Vec<VoiceCommand> {
    vec![
        VoiceCommand::new(
            HELP_COMMAND,
            Effect::Builtin {
                action: BuiltinAction::ShowHelp,
            },
        )
        .with_description("List the commands available here")
        .with_aliases(["what can i say", "show commands"]),
        VoiceCommand::new(
            STOP_LISTENING_COMMAND,
            Effect::Builtin {
                action: BuiltinAction::StopListening,
            },
        )
        .with_description("Stop listening for voice commands")
        .with_aliases(["stop voice", "go to sleep"]),
        VoiceCommand::new(
            END_TRAINING_COMMAND,
            Effect::Builtin {
                action: BuiltinAction::EndTraining,
            },
        )
        .with_description("Finish the current training session")
        .with_aliases(["stop training", "finish training"]),
    ]
}

/// Spoken listing of the commands available in the current context
pub fn help_text(commands: &[VoiceCommand]) -> String {
    if commands.is_empty() {
        return "No voice commands are available right now.".to_string();
    }

    let names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
    format!("You can say: {}.", names.join(", "))
}

#[cfg(test)]
#[path = "builtins_test.rs"]
mod tests;
