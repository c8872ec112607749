// Usage-context scoping for voice commands

mod resolver;

pub use resolver::ContextResolver;
