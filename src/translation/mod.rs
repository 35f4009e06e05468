mod llm;
mod service;

pub use llm::{build_translation_prompt, LlmTranslator};
pub use service::TranslationService;

use async_trait::async_trait;
use std::error::Error;

/// A text-to-text translation engine.
///
/// Engines may fail; callers go through [`TranslationService`], which falls
/// back to the source text per string.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Engine name for logs (e.g. "openai")
    fn name(&self) -> &str;

    /// Make the engine usable: download models, verify credentials.
    /// Called at most once per [`TranslationService`].
    async fn prepare(&self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Translate one piece of text
    async fn translate(&self, text: &str) -> Result<String, Box<dyn Error + Send + Sync>>;
}
