pub mod registry;
pub mod traits;

// Advisory provider implementations
pub mod gemini;
