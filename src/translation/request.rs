use serde::Serialize;
use url::Url;

use super::error::TranslateError;
use super::prompt::build_user_content;
use crate::config::ResolvedConfig;

/// An outbound translation request. Built fresh per invocation and immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    streaming: bool,
    model: String,
    endpoint: Url,
    credential: String,
    target_language: String,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    model: &'a str,
    stream: bool,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

impl TranslationRequest {
    /// Validates the selection and configuration and builds the request.
    ///
    /// The input is checked before the configuration, so an empty selection is
    /// always reported as an input error.
    pub fn build(text: &str, config: &ResolvedConfig) -> Result<Self, TranslateError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let credential = config
            .credential
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(TranslateError::MissingCredential)?;

        let raw_endpoint = config
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(TranslateError::MissingEndpoint)?;

        let endpoint =
            Url::parse(raw_endpoint).map_err(|source| TranslateError::InvalidEndpoint {
                url: raw_endpoint.to_string(),
                source,
            })?;

        Ok(Self {
            text: text.to_string(),
            streaming: config.streaming,
            model: config.model.clone(),
            endpoint,
            credential: credential.to_string(),
            target_language: config.target_language.clone(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn streaming(&self) -> bool {
        self.streaming
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// The JSON body sent to the chat-completions endpoint.
    pub fn body(&self) -> ChatCompletionRequest<'_> {
        ChatCompletionRequest {
            model: &self.model,
            stream: self.streaming,
            messages: vec![Message {
                role: "user",
                content: build_user_content(&self.target_language, &self.text),
            }],
        }
    }
}
