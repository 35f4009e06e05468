use log::{debug, info, warn};
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::Translator;
use crate::model::{split_steps, Ingredient};

/// Shared, fail-soft front for a [`Translator`].
///
/// Construct once and hand an `Arc` to whoever needs translations.
/// [`prepare`](Self::prepare) runs the engine's setup until it succeeds once;
/// concurrent callers share a single attempt. Every translate call returns the source text
/// when the engine fails, so callers never see per-string errors.
pub struct TranslationService {
    translator: Arc<dyn Translator>,
    ready: OnceCell<()>,
    closed: AtomicBool,
}

impl TranslationService {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            translator,
            ready: OnceCell::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Run engine setup and report whether the service is usable. A failed
    /// setup is not remembered, so the next call tries again.
    pub async fn prepare(&self) -> bool {
        if self.closed.load(Ordering::SeqCst) {
            return false;
        }

        let result = self
            .ready
            .get_or_try_init(|| async {
                self.translator.prepare().await?;
                info!("Translator '{}' is ready", self.translator.name());
                Ok::<(), Box<dyn Error + Send + Sync>>(())
            })
            .await;

        match result {
            Ok(_) => !self.closed.load(Ordering::SeqCst),
            Err(e) => {
                warn!(
                    "Translator '{}' failed to prepare: {}",
                    self.translator.name(),
                    e
                );
                false
            }
        }
    }

    /// Whether a previous [`prepare`](Self::prepare) succeeded and the
    /// service has not been shut down.
    pub fn is_ready(&self) -> bool {
        !self.closed.load(Ordering::SeqCst) && self.ready.initialized()
    }

    /// Release the engine. Later translate calls return their input.
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Translate one string, returning it unchanged when blank or on failure.
    pub async fn translate(&self, text: &str) -> String {
        if text.trim().is_empty() || self.closed.load(Ordering::SeqCst) {
            return text.to_string();
        }

        match self.translator.translate(text).await {
            Ok(translated) => translated,
            Err(e) => {
                debug!("Keeping source text {:?}: {}", text, e);
                text.to_string()
            }
        }
    }

    /// Translate each string independently.
    pub async fn translate_list(&self, texts: &[String]) -> Vec<String> {
        let mut translated = Vec::with_capacity(texts.len());
        for text in texts {
            translated.push(self.translate(text).await);
        }
        translated
    }

    /// Translate ingredient names and measures, each field on its own.
    pub async fn translate_ingredients(&self, ingredients: &[Ingredient]) -> Vec<Ingredient> {
        let mut translated = Vec::with_capacity(ingredients.len());
        for ingredient in ingredients {
            let name = self.translate(&ingredient.name).await;
            let measure = self.translate(&ingredient.measure).await;
            translated.push(Ingredient { name, measure });
        }
        translated
    }

    /// Translate instruction text line by line and join the result with `\n`.
    /// Blank lines are dropped and each step is trimmed before translation.
    pub async fn translate_instructions(&self, instructions: &str) -> String {
        if instructions.trim().is_empty() {
            return instructions.to_string();
        }

        let mut steps = Vec::new();
        for step in split_steps(instructions) {
            steps.push(self.translate(step.trim()).await);
        }
        steps.join("\n")
    }
}
