// Core exports
pub mod display;
pub mod parser;
pub mod prompt;
pub mod requester;

pub use display::{display_similar_entries, render_similar_entries};
pub use parser::parse_similarity_response;
pub use prompt::build_prompt;
pub use requester::{SimilarityError, SimilarityRequester};
