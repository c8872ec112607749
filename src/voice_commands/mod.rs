// Voice commands module - registration, matching and effect execution

pub mod executor;
pub mod matcher;
pub mod registry;

pub use executor::{
    EffectDispatcher, EffectError, EffectErrorCode, EffectHandler, EffectResult,
    LoggingEffectHandler,
};
pub use matcher::{similarity, CommandMatcher, MatchMode, MatchResult, MatcherConfig, Suggestion};
pub use registry::{BuiltinAction, CommandRegistry, Effect, VoiceCommand};
