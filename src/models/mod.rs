// Model exports
pub mod domain;
pub mod responses;

pub use domain::{Profile, Entry, ResultSet, MAX_RESULTS};
pub use responses::{SimilarityOutcome, ParseFailure};
