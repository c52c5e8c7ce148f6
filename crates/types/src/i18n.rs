//! Optional string localization with a guaranteed literal fallback.
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("no translation for key '{0}'")]
    Missing(String),
    #[error("translation lookup failed: {0}")]
    Lookup(String),
}

/// A source of translated UI strings, looked up by key.
///
/// Implementations may return the key itself when they have nothing better;
/// [`Localizer`] treats that the same as a miss.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, fallback: &str) -> Result<String, TranslationError>;
}

impl<F> Translator for F
where
    F: Fn(&str, &str) -> Result<String, TranslationError> + Send + Sync,
{
    fn translate(&self, key: &str, fallback: &str) -> Result<String, TranslationError> {
        self(key, fallback)
    }
}

/// A flat key → string catalog, typically loaded from JSON.
impl Translator for HashMap<String, String> {
    fn translate(&self, key: &str, _fallback: &str) -> Result<String, TranslationError> {
        self.get(key)
            .cloned()
            .ok_or_else(|| TranslationError::Missing(key.to_string()))
    }
}

/// Resolves strings through an optional [`Translator`], degrading to the
/// caller's literal whenever no usable translation comes back.
#[derive(Clone, Default)]
pub struct Localizer {
    translator: Option<Arc<dyn Translator>>,
}

impl std::fmt::Debug for Localizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer")
            .field("translator", &self.translator.is_some())
            .finish()
    }
}

impl Localizer {
    pub fn new(translator: Option<Arc<dyn Translator>>) -> Self {
        Self { translator }
    }

    pub fn untranslated() -> Self {
        Self::default()
    }

    pub fn tr(&self, key: &str, fallback: &str) -> String {
        let Some(translator) = &self.translator else {
            return fallback.to_string();
        };
        match translator.translate(key, fallback) {
            Ok(text) if !text.is_empty() && text != key => text,
            Ok(_) => fallback.to_string(),
            Err(err) => {
                log::debug!("Using fallback for '{}': {}", key, err);
                fallback.to_string()
            }
        }
    }
}
