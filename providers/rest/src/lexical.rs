use async_trait::async_trait;
use glossa_provider::{
    LanguageCode, LexicalProvider, ProviderError, ProviderMetadata, WordDetail,
};

#[derive(Clone)]
pub struct RestLexicalClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl RestLexicalClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl LexicalProvider for RestLexicalClient {
    async fn term_details(
        &self,
        term: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<Option<WordDetail>, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::AuthenticationError);
        }
        if !self.supported_languages().contains(&source) {
            return Err(ProviderError::UnsupportedLanguage { code: source });
        }

        let mut params = vec![
            ("term", term.to_string()),
            ("source_lang", source.to_uppercase()),
        ];
        // Same-language lookups must not ask for a translation
        if source != target {
            params.push(("target_lang", target.to_uppercase()));
        }

        let response = self
            .client
            .post(format!("{}/lookup", self.api_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(ProviderError::RateLimitExceeded);
        }

        if response.status() == 401 || response.status() == 403 {
            return Err(ProviderError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            ProviderError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let detail = detail_from_json(&json);
        if detail.is_none() {
            tracing::debug!("lookup payload for '{}' missing required fields", term);
        }

        Ok(detail)
    }

    async fn detect_language(&self, text: &str) -> Result<Option<LanguageCode>, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::AuthenticationError);
        }

        let params = [("text", text)];

        let response = self
            .client
            .post(format!("{}/detect", self.api_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            ProviderError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        Ok(json["language"].as_str().map(|code| code.to_lowercase()))
    }

    fn supported_languages(&self) -> Vec<LanguageCode> {
        ["en", "de", "fr", "es", "it", "pt", "nl", "ja", "zh"]
            .iter()
            .map(|code| code.to_string())
            .collect()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "glossa-rest".to_string(),
            requires_api_key: true,
            free_tier_available: false,
        }
    }
}

/// Build a `WordDetail` from a lookup payload.
///
/// `None` when a required field (definition, examples) is absent; optional
/// fields degrade individually.
fn detail_from_json(value: &serde_json::Value) -> Option<WordDetail> {
    let definition = value["definition"].as_str()?.to_string();
    let example_sentences: Vec<String> = value["examples"]
        .as_array()?
        .iter()
        .filter_map(|e| e.as_str().map(str::to_string))
        .collect();

    Some(WordDetail {
        definition,
        example_sentences,
        pronunciation: value["pronunciation"].as_str().map(str::to_string),
        part_of_speech: value["part_of_speech"].as_str().map(str::to_string),
        related_words: value["related"]
            .as_array()
            .map(|words| {
                words
                    .iter()
                    .filter_map(|w| w.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
        translation: value["translation"].as_str().map(str::to_string),
        audio: None,
    })
}
