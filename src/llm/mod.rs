mod azure;
mod groq;
mod openai;
mod togetherai;

pub use azure::AzureClient;
pub use groq::GroqClient;
pub use openai::OpenAIClient;
pub use togetherai::TogetherAIClient;

use crate::error::RepoSummaryError;
use async_trait::async_trait;
use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Instant;

pub const DEFAULT_PROVIDER: &str = "openai";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Wrapper every client returns its completion text in, serialized as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub response: String,
}

#[async_trait]
pub trait SummaryClient: Send + Sync + std::fmt::Debug {
    async fn complete(&self, messages: &[Message])
        -> Result<String, Box<dyn std::error::Error>>;
    fn provider_name(&self) -> String;
}

/// Pulls the response text out of envelope text. Accepts the canonical JSON
/// form first, then the single-quoted literal form an envelope takes when it
/// has been printed rather than serialized. No match is `None`, not an error.
pub fn parse_response(text: &str) -> Option<String> {
    if let Ok(envelope) = serde_json::from_str::<Envelope>(text) {
        return Some(envelope.response);
    }

    let pattern = Regex::new(r"(?s)\{'response': '(.+?)'\}").unwrap();
    pattern
        .captures(text)
        .map(|captures| captures[1].to_string())
}

pub fn calculate_tokens(text: &str) -> usize {
    // Whitespace counting is a rough stand-in for each model's real tokenizer.
    text.split_whitespace().count()
}

pub fn log_performance(
    model: &str,
    start_time: Instant,
    input_tokens: usize,
    output_tokens: usize,
) {
    let duration = start_time.elapsed();
    let total_tokens = input_tokens + output_tokens;
    let tokens_per_second = total_tokens as f64 / duration.as_secs_f64();

    info!(
        "{} - Total duration: {:?}, Input tokens: {}, Output tokens: {}, Total tokens: {}, Tokens per second: {:.2}",
        model, duration, input_tokens, output_tokens, total_tokens, tokens_per_second
    );
}

/// Maps a provider key to a ready client. Keys must match exactly; anything
/// outside the supported set is rejected. Credentials are read from the
/// environment here, defaulting to empty strings, and are only checked by the
/// provider itself when the request goes out.
pub fn get_client(provider: &str) -> Result<Box<dyn SummaryClient>, RepoSummaryError> {
    match provider {
        "azure" => {
            let api_key = env::var("AZURE_OPENAI_API_KEY").unwrap_or_default();
            let resource = env::var("AZURE_RESOURCE_GROUP").unwrap_or_default();
            let deployment = env::var("AZURE_DEPLOYMENT_NAME").unwrap_or_default();
            Ok(Box::new(AzureClient::new(&api_key, &resource, &deployment)))
        }
        "groq" => {
            let api_key = env::var("GROQ_API_KEY").unwrap_or_default();
            Ok(Box::new(GroqClient::new(&api_key, groq::GROQ_BASE_URL)))
        }
        "openai" => {
            let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
            Ok(Box::new(OpenAIClient::new(&api_key, openai::OPENAI_BASE_URL)))
        }
        "togetherai" => {
            let api_key = env::var("TOGETHERAI_API_KEY").unwrap_or_default();
            Ok(Box::new(TogetherAIClient::new(
                &api_key,
                togetherai::TOGETHERAI_BASE_URL,
            )))
        }
        other => Err(RepoSummaryError::InvalidProvider(other.to_string())),
    }
}
