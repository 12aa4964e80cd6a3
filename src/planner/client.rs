use crate::config::PlannerConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// System instruction sent with every planning request.
pub const PLANNER_PROMPT: &str = "You are working on a multi-agent context solving a software engineering problem. You play the planner role to lead the executor agent(s) to solve the problem.
Please think like a senior software engineer and provide a detailed plan for the executor agent(s) to solve the problem.
Try to split tasks into simpler sub-tasks, specify test requirements, set clear checkpoints and tell the executor agent(s) how to check its work.
Be clear and specific, prioritize agility and don't over-design or over-engineer the solution.";

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Planner API error ({status}): {body}")]
    ApiError { status: u16, body: String },
    #[error("JSON parsing failed: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Planner returned no completion content")]
    EmptyCompletion,
    #[error("Not configured: {0}")]
    NotConfigured(String),
}

#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait]
pub trait Planner: Send + Sync {
    /// Ask the model for a plan for `task` and return its reply unmodified.
    async fn plan(&self, task: &str) -> Result<String, PlannerError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: [ChatMessage<'a>; 2],
    model: &'a str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Azure OpenAI chat-completions client. One POST per call, no retries.
pub struct PlannerClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl PlannerClient {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl Planner for PlannerClient {
    async fn plan(&self, task: &str) -> Result<String, PlannerError> {
        let body = ChatRequest {
            messages: [
                ChatMessage {
                    role: "system",
                    content: PLANNER_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: task,
                },
            ],
            model: &self.model,
        };

        log::debug!("Planner request: POST {} (model={})", self.endpoint, self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        log::debug!("Planner response status: {}", status);

        if !status.is_success() {
            let body = response.text().await?;
            log::debug!("Planner error response: {}", body);
            return Err(PlannerError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let completion: ChatResponse = serde_json::from_str(&text)?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(PlannerError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn planner_for(server: &MockServer) -> PlannerClient {
        PlannerClient::new(&PlannerConfig {
            endpoint: server.url("/openai/deployments/o3-mini/chat/completions"),
            api_key: "secret-key".to_string(),
            model: "o3-mini".to_string(),
        })
    }

    #[tokio::test]
    async fn test_plan_posts_fixed_body_and_returns_first_choice() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/openai/deployments/o3-mini/chat/completions")
                .header("api-key", "secret-key")
                .json_body(serde_json::json!({
                    "messages": [
                        { "role": "system", "content": PLANNER_PROMPT },
                        { "role": "user", "content": "Add a retry flag" }
                    ],
                    "model": "o3-mini"
                }));
            then.status(200).json_body(serde_json::json!({
                "choices": [
                    { "index": 0, "message": { "role": "assistant", "content": "1. Read the CLI\n2. Add flag" } },
                    { "index": 1, "message": { "role": "assistant", "content": "ignored" } }
                ]
            }));
        });

        let plan = planner_for(&server).plan("Add a retry flag").await.unwrap();

        mock.assert();
        assert_eq!(plan, "1. Read the CLI\n2. Add flag");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(429).body("rate limited");
        });

        let err = planner_for(&server).plan("anything").await.unwrap_err();

        match err {
            PlannerError::ApiError { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(serde_json::json!({ "choices": [] }));
        });

        let err = planner_for(&server).plan("anything").await.unwrap_err();

        assert!(matches!(err, PlannerError::EmptyCompletion));
    }
}
