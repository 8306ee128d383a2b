use super::{calculate_tokens, log_performance, Envelope, Message, SummaryClient};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Instant;

pub const TOGETHERAI_BASE_URL: &str = "https://api.together.xyz/v1";
pub const TOGETHERAI_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

#[derive(Debug)]
pub struct TogetherAIClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl TogetherAIClient {
    pub fn new(api_key: &str, base_url: &str) -> Self {
        TogetherAIClient {
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            client: Client::new(),
        }
    }

    pub fn model_name(&self) -> String {
        format!("TogetherAI ({})", TOGETHERAI_MODEL)
    }
}

#[async_trait]
impl SummaryClient for TogetherAIClient {
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
                "model": TOGETHERAI_MODEL,
                "messages": messages,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("TogetherAI API error ({}): {}", status, body).into());
        }

        let body = response.json::<serde_json::Value>().await?;
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("unexpected response shape from TogetherAI")?
            .to_string();

        let output_tokens = calculate_tokens(&content);
        log_performance(&self.model_name(), start_time, input_tokens, output_tokens);

        Ok(serde_json::to_string(&Envelope { response: content })?)
    }

    fn provider_name(&self) -> String {
        "TogetherAI".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::parse_response;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn complete_sends_the_mixtral_model_and_bearer_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer together-key")
            .match_body(Matcher::PartialJson(json!({"model": TOGETHERAI_MODEL})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"a React app"}}]}"#,
            )
            .create_async()
            .await;

        let client = TogetherAIClient::new("together-key", &server.url());
        let envelope = client.complete(&[Message::system("hi")]).await.unwrap();

        mock.assert_async().await;
        assert_eq!(parse_response(&envelope).as_deref(), Some("a React app"));
    }

    #[tokio::test]
    async fn complete_rejects_unexpected_response_shapes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = TogetherAIClient::new("together-key", &server.url());
        let err = client.complete(&[Message::system("hi")]).await.unwrap_err();

        assert!(err.to_string().contains("unexpected response shape"));
    }
}
