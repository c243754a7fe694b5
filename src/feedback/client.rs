//! Chat-completion client for the feedback service

use crate::config::FeedbackConfig;
use crate::error::{MatcherError, Result};
use crate::feedback::parser::parse_feedback;
use crate::feedback::prompts::{truncate_for_prompt, PromptTemplate, SYSTEM_PROMPT};
use crate::feedback::ResumeFeedback;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
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

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct FeedbackClient {
    client: Client,
    config: FeedbackConfig,
    api_key: String,
    prompt: PromptTemplate,
}

impl FeedbackClient {
    pub fn new(config: FeedbackConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            api_key,
            prompt: PromptTemplate::default(),
        })
    }

    /// Critique the resume against the job; failures become the fallback
    pub async fn get_feedback(&self, resume_text: &str, job_description: &str) -> ResumeFeedback {
        let resume = truncate_for_prompt(resume_text, self.config.max_resume_chars, "Resume");
        let job = truncate_for_prompt(job_description, self.config.max_job_chars, "Job description");
        let prompt = self.prompt.render(&resume, &job);
        debug!("Formatted prompt length: {}", prompt.chars().count());

        match self.complete(&prompt).await {
            Ok(content) => {
                debug!("Feedback response ({} chars): {}", content.chars().count(), content);
                parse_feedback(&content)
            }
            Err(e) => {
                warn!("Feedback request failed: {}", e);
                ResumeFeedback::fallback(format!("Error contacting AI service: {}", e))
            }
        }
    }

    /// Send one prompt, retrying rate limits, server errors and transport failures
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request_body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                // 1s, 2s, 4s, ...
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1).min(5)));
                warn!("Feedback attempt {} failed, retrying after {}ms", attempt, delay.as_millis());
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&self.config.api_url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    last_error = Some(MatcherError::Network(e.to_string()));
                    continue;
                }
            };

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                last_error = Some(MatcherError::Feedback(format!("service returned {}: {}", status, body)));
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(MatcherError::Feedback(format!("service returned {}: {}", status, message)));
            }

            let completion: ChatResponse = response.json().await?;
            info!("Feedback service responded after {} attempt(s)", attempt + 1);

            return completion
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .filter(|content| !content.trim().is_empty())
                .ok_or_else(|| MatcherError::Feedback("response content is empty".to_string()));
        }

        Err(last_error.unwrap_or_else(|| MatcherError::Feedback("no attempts were made".to_string())))
    }
}
