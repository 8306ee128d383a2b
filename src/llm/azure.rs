use super::{calculate_tokens, log_performance, Envelope, Message, SummaryClient};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Instant;

pub const AZURE_API_VERSION: &str = "2023-12-01-preview";

/// Azure scopes requests to a deployment rather than a model name, so the
/// deployment doubles as the model identifier and the key goes in an
/// `api-key` header instead of a bearer token.
#[derive(Debug)]
pub struct AzureClient {
    api_key: String,
    resource: String,
    deployment: String,
    client: Client,
}

impl AzureClient {
    pub fn new(api_key: &str, resource: &str, deployment: &str) -> Self {
        AzureClient {
            api_key: api_key.to_string(),
            resource: resource.to_string(),
            deployment: deployment.to_string(),
            client: Client::new(),
        }
    }

    pub fn model_name(&self) -> String {
        format!("Azure OpenAI ({})", self.deployment)
    }

    fn request_url(&self) -> String {
        format!(
            "https://{}.openai.azure.com/openai/deployments/{}/chat/completions?api-version={}",
            self.resource, self.deployment, AZURE_API_VERSION
        )
    }
}

#[async_trait]
impl SummaryClient for AzureClient {
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
            .post(self.request_url())
            .header("api-key", &self.api_key)
            .json(&json!({
                "model": self.deployment,
                "messages": messages,
                "user": "summarizeapi",
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Azure OpenAI API error ({}): {}", status, body).into());
        }

        let body = response.json::<serde_json::Value>().await?;
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("unexpected response shape from Azure OpenAI")?
            .to_string();

        let output_tokens = calculate_tokens(&content);
        log_performance(&self.model_name(), start_time, input_tokens, output_tokens);

        Ok(serde_json::to_string(&Envelope { response: content })?)
    }

    fn provider_name(&self) -> String {
        "Azure OpenAI".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_embeds_resource_deployment_and_api_version() {
        let client = AzureClient::new("key", "my-resource", "gpt4-deploy");

        assert_eq!(
            client.request_url(),
            "https://my-resource.openai.azure.com/openai/deployments/gpt4-deploy\
             /chat/completions?api-version=2023-12-01-preview"
        );
    }

    #[test]
    fn model_name_carries_the_deployment() {
        let client = AzureClient::new("key", "res", "gpt4-deploy");
        assert_eq!(client.model_name(), "Azure OpenAI (gpt4-deploy)");
    }
}
