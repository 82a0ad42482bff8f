use thiserror::Error;
use tracing::Instrument;

use crate::core::{parser::parse_similarity_response, prompt::{build_prompt, exceeds_limit}};
use crate::models::{Entry, Profile, ResultSet, SimilarityOutcome};
use crate::services::{GeminiError, TextGenerator};

/// Errors that stop a similarity request before a response is interpreted
#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Prompt is {size} bytes, limit is {limit}")]
    PromptTooLarge { size: usize, limit: usize },

    #[error("Generation failed: {0}")]
    Generation(#[from] GeminiError),
}

/// Asks a hosted model which candidate entries resemble a profile's timeline
///
/// # Pipeline Stages
/// 1. Prompt construction
/// 2. Prompt size guard
/// 3. One generation call
/// 4. Response interpretation and truncation
pub struct SimilarityRequester<G> {
    generator: G,
    max_prompt_bytes: usize,
}

impl<G: TextGenerator> SimilarityRequester<G> {
    pub fn new(generator: G, max_prompt_bytes: usize) -> Self {
        Self {
            generator,
            max_prompt_bytes,
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Find up to five entries whose timelines resemble the profile's
    ///
    /// Transport failures are returned as errors. A response that cannot be
    /// read as a JSON array is reported once and comes back as
    /// [`SimilarityOutcome::Unparseable`].
    pub async fn request_similarity(
        &self,
        profile: &Profile,
        entries: &[Entry],
    ) -> Result<SimilarityOutcome, SimilarityError> {
        let span = tracing::info_span!(
            "similarity_request",
            request_id = %uuid::Uuid::new_v4(),
            model = self.generator.model_name(),
            entries = entries.len(),
        );

        async move {
            let prompt = build_prompt(profile, entries)?;

            if let Some(size) = exceeds_limit(&prompt, self.max_prompt_bytes) {
                tracing::error!("Prompt of {} bytes exceeds limit of {}", size, self.max_prompt_bytes);
                return Err(SimilarityError::PromptTooLarge {
                    size,
                    limit: self.max_prompt_bytes,
                });
            }

            tracing::debug!(
                ids = ?entries.iter().filter_map(Entry::id).collect::<Vec<_>>(),
                "Submitting {} prompt bytes",
                prompt.len()
            );

            let text = self.generator.generate(&prompt).await?;
            let outcome = parse_similarity_response(&text);

            match &outcome {
                SimilarityOutcome::Matches(results) => {
                    tracing::info!("Model returned {} similar entries", results.len());
                }
                SimilarityOutcome::NoMatches => tracing::info!("Model returned no similar entries"),
                SimilarityOutcome::Unparseable(failure) => {
                    tracing::warn!(reason = %failure.reason, "Error parsing Gemini response");
                }
            }

            Ok(outcome)
        }
        .instrument(span)
        .await
    }

    /// Same as [`request_similarity`](Self::request_similarity), collapsed to a result set
    pub async fn similar_entries(
        &self,
        profile: &Profile,
        entries: &[Entry],
    ) -> Result<ResultSet, SimilarityError> {
        Ok(self.request_similarity(profile, entries).await?.into_results())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::GenerateFuture;
    use serde_json::json;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct CannedGenerator {
        reply: String,
        calls: AtomicUsize,
    }

    impl CannedGenerator {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TextGenerator for CannedGenerator {
        fn model_name(&self) -> &str {
            "canned"
        }

        fn generate<'a>(&'a self, _prompt: &'a str) -> GenerateFuture<'a> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self.reply.clone();
            Box::pin(async move { Ok(reply) })
        }
    }

    fn profile() -> Profile {
        Profile::try_from(json!({ "timeline": { "birth_year": 1990 } })).unwrap()
    }

    #[tokio::test]
    async fn test_oversized_prompt_skips_generation() {
        let requester = SimilarityRequester::new(CannedGenerator::new("[]"), 16);

        let result = requester.request_similarity(&profile(), &[]).await;

        assert!(matches!(result, Err(SimilarityError::PromptTooLarge { limit: 16, .. })));
        assert_eq!(requester.generator().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_single_generation_call() {
        let requester = SimilarityRequester::new(CannedGenerator::new(r#"[{"id":1}]"#), 100_000);

        let results = requester.similar_entries(&profile(), &[]).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(requester.generator().calls.load(Ordering::SeqCst), 1);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run one request against `reply` and count parse-failure notices in the log
    async fn parse_notices(reply: &str) -> usize {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let requester = SimilarityRequester::new(CannedGenerator::new(reply), 100_000);
        requester.request_similarity(&profile(), &[]).await.unwrap();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        output.matches("Error parsing Gemini response").count()
    }

    #[tokio::test]
    async fn test_unparseable_reply_logs_one_notice() {
        assert_eq!(parse_notices("not json").await, 1);
    }

    #[tokio::test]
    async fn test_parsed_replies_log_no_notice() {
        assert_eq!(parse_notices(r#"[{"id":1}]"#).await, 0);
        assert_eq!(parse_notices("[]").await, 0);
    }
}
