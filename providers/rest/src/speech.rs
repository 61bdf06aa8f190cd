use async_trait::async_trait;
use glossa_provider::{ProviderMetadata, SpeechError, SpeechSynthesizer};

#[derive(Clone)]
pub struct RestSpeechClient {
    client: reqwest::Client,
    speech_url: String,
}

impl RestSpeechClient {
    pub fn new(speech_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            speech_url,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for RestSpeechClient {
    async fn synthesize(&self, term: &str) -> Result<Option<Vec<u8>>, SpeechError> {
        let response = self
            .client
            .get(&self.speech_url)
            .query(&[("term", term)])
            .send()
            .await?;

        // No recording for this term
        if response.status() == 404 {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(SpeechError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            Ok(None)
        } else {
            Ok(Some(bytes.to_vec()))
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "glossa-speech".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}
