// Service exports
pub mod gemini;
pub mod generator;

pub use gemini::{GeminiClient, GeminiError};
pub use generator::{GenerateFuture, TextGenerator};
