use super::{calculate_tokens, log_performance, Envelope, Message, SummaryClient};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Instant;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_MODEL: &str = "gpt-3.5-turbo-0125";

#[derive(Debug)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl OpenAIClient {
    pub fn new(api_key: &str, base_url: &str) -> Self {
        OpenAIClient {
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            client: Client::new(),
        }
    }

    pub fn model_name(&self) -> String {
        format!("OpenAI ({})", OPENAI_MODEL)
    }
}

#[async_trait]
impl SummaryClient for OpenAIClient {
    async fn complete(
        &self,
        messages: &[Message],
    ) -> Result<String, Box<dyn std::error::Error>> {
        println!("Using {}", self.provider_name());

        let start_time = Instant::now();
        let input_tokens: usize = messages
            .iter()
            .map(|message| calculate_tokens(&message.content))
            .sum();

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": OPENAI_MODEL,
                "messages": messages,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("OpenAI API error ({}): {}", status, body).into());
        }

        let body = response.json::<serde_json::Value>().await?;
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("unexpected response shape from OpenAI")?
            .to_string();

        let output_tokens = calculate_tokens(&content);
        log_performance(&self.model_name(), start_time, input_tokens, output_tokens);

        Ok(serde_json::to_string(&Envelope { response: content })?)
    }

    fn provider_name(&self) -> String {
        "OpenAI".to_string()
    }
}
