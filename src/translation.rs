use crate::config::Config;
use crate::error::Result;
use crate::i18n::{LanguageTarget, TranslationMetrics};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Output bound for a single UI string.
const MAX_TOKENS: u32 = 150;

/// Low temperature keeps translations literal.
const TEMPERATURE: f32 = 0.3;

/// OpenAI Chat Completion request for one string
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Why a single request did not yield a translation.
#[derive(Debug, thiserror::Error)]
enum RequestError {
    #[error("failed to send request to OpenAI API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("OpenAI API error ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("OpenAI response contained no translation")]
    Empty,
}

/// Value written when no credential is configured.
pub fn placeholder_translation(text: &str) -> String {
    format!("[TRANSLATED: {}]", text)
}

/// Value written when the API answered without a usable translation.
pub fn translation_error_placeholder(text: &str) -> String {
    format!("[TRANSLATION_ERROR: {}]", text)
}

/// Value written when the request itself failed (network, timeout, status, body).
pub fn api_error_placeholder(text: &str) -> String {
    format!("[API_ERROR: {}]", text)
}

/// Build the system prompt for translation
fn build_translation_system_prompt(target_language: &str) -> String {
    format!(
        "You are a professional translator. Translate the given text to {}. \
         Return only the translation, nothing else. \
         Maintain the same tone and context as the original. \
         For UI elements, use appropriate terminology for that language.",
        target_language
    )
}

/// Build the user prompt for translation
fn build_translation_user_prompt(text: &str, target_language: &str) -> String {
    format!("Translate this text to {}: {}", target_language, text)
}

/// Translates individual strings through the chat-completion API.
///
/// `translate_text` never fails: every error is folded into a placeholder
/// value so a batch run always has something to write for each key.
pub struct Translator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_url: String,
    metrics: TranslationMetrics,
}

impl Translator {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            api_key: config.openai_api_key.trim().to_string(),
            model: config.openai_model.clone(),
            api_url: config.openai_api_url.clone(),
            metrics: TranslationMetrics::new(),
        })
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Translate `text` into `target`, or return a placeholder.
    pub async fn translate_text(&self, text: &str, target: &LanguageTarget) -> String {
        if !self.has_credential() {
            self.metrics.record_placeholder();
            return placeholder_translation(text);
        }

        self.metrics.record_api_call();
        match self.request_translation(text, target).await {
            Ok(translated) => translated,
            Err(RequestError::Empty) => {
                self.metrics.record_api_failure();
                warn!("Translation failed for '{}' ({}): empty response", text, target.code());
                translation_error_placeholder(text)
            }
            Err(e) => {
                self.metrics.record_api_failure();
                warn!("API error for '{}' ({}): {}", text, target.code(), e);
                api_error_placeholder(text)
            }
        }
    }

    async fn request_translation(
        &self,
        text: &str,
        target: &LanguageTarget,
    ) -> std::result::Result<String, RequestError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: build_translation_system_prompt(target.name()),
                },
                Message {
                    role: "user",
                    content: build_translation_user_prompt(text, target.name()),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!("Requesting {} translation with model {}", target.code(), self.model);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(RequestError::Status { status, body });
        }

        let chat_response: ChatResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(RequestError::Empty)
    }
}
