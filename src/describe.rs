// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 snapname contributors

//! Description provider: vision-model filename suggestions
//!
//! One request per file, no retries. Anything that goes wrong (transport
//! error, non-success status, unusable response) is logged and collapses to
//! "no suggestion" so the file still gets its non-AI name.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::naming::clean_suggestion;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4-vision-preview";

const PROMPT: &str = "Generate a descriptive filename for this image using a valid filename. \
    Follow these rules:\n\
    * DO NOT add any extension to the filename\n\
    * DO NOT use words like: [in, a, the, with, an]\n\
    * DO be brief but clear\n\
    * DO use _ between words: like_this_example";

/// Something that can suggest a base name for an image.
///
/// Substitutable with a stub in tests; `None` always means "use the name
/// built so far".
#[async_trait]
pub trait DescriptionProvider: Send + Sync {
    async fn describe(&self, image_base64: &str) -> Option<String>;
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: Vec<Content>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Content {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// OpenAI-backed description provider.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl OpenAiClient {
    /// Create a client with the given request timeout.
    pub fn new(api_key: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: api_key.to_string(),
            api_url: API_URL.to_string(),
        }
    }

    fn payload(image_base64: &str) -> ChatRequest {
        ChatRequest {
            model: MODEL.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    Content::Text {
                        text: PROMPT.to_string(),
                    },
                    Content::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:image/jpeg;base64,{}", image_base64),
                        },
                    },
                ],
            }],
            max_tokens: 300,
        }
    }

    async fn request(&self, image_base64: &str) -> crate::Result<String> {
        debug!("requesting description, model={}", MODEL);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&Self::payload(image_base64))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(crate::SnapnameError::Service(format!(
                "description service returned status {}",
                response.status()
            )));
        }

        let result: ChatResponse = response.json().await?;
        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| crate::SnapnameError::Service("empty response from model".to_string()))
    }
}

#[async_trait]
impl DescriptionProvider for OpenAiClient {
    async fn describe(&self, image_base64: &str) -> Option<String> {
        match self.request(image_base64).await {
            Ok(text) => {
                let clean = clean_suggestion(&text);
                if clean.is_empty() {
                    warn!("model returned no usable filename");
                    None
                } else {
                    Some(clean)
                }
            }
            Err(e) => {
                warn!("description request failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_embeds_prompt_and_data_url() {
        let json = serde_json::to_value(OpenAiClient::payload("QUJD")).unwrap();

        assert_eq!(json["model"], MODEL);
        assert_eq!(json["max_tokens"], 300);
        let content = &json["messages"][0]["content"];
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(content[1]["image_url"]["url"], "data:image/jpeg;base64,QUJD");
    }

    #[test]
    fn response_parses_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"cat_on_sofa"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "cat_on_sofa");
    }
}
