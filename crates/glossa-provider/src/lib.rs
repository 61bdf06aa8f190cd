use serde::{Deserialize, Serialize};

pub type LanguageCode = String;

/// Lexical knowledge provider interface
#[async_trait::async_trait]
pub trait LexicalProvider: Send + Sync {
    /// Fetch structured detail for a word or phrase.
    ///
    /// `Ok(None)` means the provider answered but the payload was absent or
    /// unusable; a transport or service failure surfaces as an error.
    async fn term_details(
        &self,
        term: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<Option<WordDetail>, ProviderError>;

    /// Best-effort language detection for a block of text
    async fn detect_language(&self, text: &str) -> Result<Option<LanguageCode>, ProviderError>;

    /// Languages this provider can answer for
    fn supported_languages(&self) -> Vec<LanguageCode>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// Text-to-speech provider interface
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize encoded audio for a term; `Ok(None)` when the provider has
    /// no audio for it
    async fn synthesize(&self, term: &str) -> Result<Option<Vec<u8>>, SpeechError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// Structured lexical detail for one term, as merged from the text and audio
/// channels of a lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordDetail {
    pub definition: String,
    pub pronunciation: Option<String>,
    pub example_sentences: Vec<String>,
    pub part_of_speech: Option<String>,
    pub related_words: Vec<String>,
    pub translation: Option<String>,
    pub audio: Option<Vec<u8>>,
}

impl WordDetail {
    /// Required-field validation applied before a payload may resolve a lookup
    pub fn is_well_formed(&self) -> bool {
        !self.definition.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unsupported language: {code}")]
    UnsupportedLanguage { code: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}
