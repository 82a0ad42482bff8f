use std::future::Future;
use std::pin::Pin;

use crate::services::gemini::GeminiError;

/// Boxed future returned by [`TextGenerator::generate`]
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String, GeminiError>> + Send + 'a>>;

/// A hosted model that turns one prompt into one block of text
pub trait TextGenerator: Send + Sync {
    fn model_name(&self) -> &str;

    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;
}
