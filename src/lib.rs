//! Timeline Similarity - find candidate entries whose life timelines resemble a profile's
//!
//! The similarity judgment itself is delegated to a hosted Gemini model. This
//! library builds the prompt, makes the call and turns the reply back into a
//! ranked list of at most five records.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{SimilarityRequester, SimilarityError, display_similar_entries, render_similar_entries};
pub use crate::models::{Profile, Entry, ResultSet, SimilarityOutcome, MAX_RESULTS};
pub use crate::services::{GeminiClient, GeminiError, TextGenerator};
